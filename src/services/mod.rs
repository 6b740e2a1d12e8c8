pub mod practice_links;
pub mod scheduler;
pub mod submission_guard;
