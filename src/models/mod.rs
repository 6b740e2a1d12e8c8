pub mod form;
pub mod meeting;
pub mod notice;
