use axum::http::StatusCode;
use thiserror::Error;

use crate::models::notice::Notice;

/// Errors raised by the video service client
#[derive(Error, Debug)]
pub enum VideoError {
    #[error("Video service unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Video service rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Unexpected video service response: {0}")]
    InvalidResponse(String),

    #[error("Failed to sign video service token: {0}")]
    Auth(String),
}

impl VideoError {
    /// Whether retrying the same request later may succeed
    pub fn is_transient(&self) -> bool {
        match self {
            VideoError::Transport(_) => true,
            VideoError::Rejected { status, .. } => *status == 429 || *status >= 500,
            VideoError::InvalidResponse(_) | VideoError::Auth(_) => false,
        }
    }
}

/// Errors raised by the identity provider lookup
#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("Identity provider unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Identity provider returned unexpected status {status}")]
    Unexpected { status: u16 },

    #[error("Unexpected identity provider response: {0}")]
    InvalidResponse(String),

    #[error("Invalid identity provider endpoint: {0}")]
    InvalidEndpoint(String),
}

impl IdentityError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            IdentityError::Transport(_) | IdentityError::Unexpected { .. } => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            IdentityError::InvalidResponse(_) => StatusCode::BAD_GATEWAY,
            IdentityError::InvalidEndpoint(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} must be set in environment")]
    Missing(&'static str),

    #[error("{0} is not a valid value")]
    Invalid(&'static str),
}

/// Reasons a scheduling submission does not produce a meeting
#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("no start time selected")]
    MissingDateTime,

    #[error("start time is not in the future")]
    PastDateTime,

    #[error("a submission for this user is already in flight")]
    SubmissionInProgress,

    #[error("call creation failed: {0}")]
    ExternalCreationFailure(#[from] VideoError),
}

impl ScheduleError {
    /// The single user-visible notice for this failure
    pub fn notice(&self) -> Notice {
        match self {
            ScheduleError::MissingDateTime => Notice::new("Please select a date and time"),
            ScheduleError::PastDateTime => Notice::new("Please select a future date and time"),
            ScheduleError::SubmissionInProgress => {
                Notice::new("A meeting is already being created")
            }
            ScheduleError::ExternalCreationFailure(_) => Notice::new("Failed to create Meeting"),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ScheduleError::MissingDateTime | ScheduleError::PastDateTime => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ScheduleError::SubmissionInProgress => StatusCode::CONFLICT,
            ScheduleError::ExternalCreationFailure(_) => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn is_retryable(&self) -> bool {
        match self {
            ScheduleError::ExternalCreationFailure(err) => err.is_transient(),
            ScheduleError::SubmissionInProgress => true,
            ScheduleError::MissingDateTime | ScheduleError::PastDateTime => false,
        }
    }
}
