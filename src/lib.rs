//! Interview Scheduler Service
//!
//! This library schedules DSA and behavioral mock interviews as video calls.
//! A browser front end posts the scheduling form; the service validates it,
//! creates the call through the Stream video API and answers with the notices
//! to show and the meeting page to navigate to.
//!
//! # Modules
//!
//! - `client`: `VideoClient` trait and the Stream REST implementation
//! - `auth`: server token signing for the Stream video API
//! - `identity`: current-user lookup through the Clerk backend API
//! - `services`: scheduling logic, practice links and the submission guard
//! - `handlers` / `routes`: the HTTP surface
//!
//! # Authentication
//!
//! Requests to the video service carry an HS256 JWT signed with the API secret.
//! Incoming scheduling requests identify the user with an `X-Session-Id` header
//! which is resolved through the identity provider.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod handlers;
pub mod identity;
pub mod models;
pub mod routes;
pub mod services;

// Re-export the main API types for ease of use
pub use auth::StreamAuth;
pub use client::{StreamVideoClient, VideoClient};
pub use config::AppConfig;
pub use error::{ScheduleError, VideoError};
pub use handlers::api::AppState;
pub use identity::{ClerkIdentityProvider, IdentityProvider};
pub use routes::create_router;
pub use services::practice_links::resolve_practice_link;
pub use services::scheduler::{validate, MeetingScheduler};
