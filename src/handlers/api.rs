use axum::{
    async_trait,
    extract::{FromRequestParts, Json as ExtractJson, Path, State},
    http::{request::Parts, StatusCode},
    response::Json,
};
use chrono::Utc;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::error::ScheduleError;
use crate::identity::{AuthenticatedUser, IdentityProvider};
use crate::models::form::SchedulingRequest;
use crate::models::meeting::{PracticeLinkResponse, ScheduleResponse};
use crate::services::practice_links::resolve_practice_link;
use crate::services::scheduler::MeetingScheduler;

pub const SESSION_HEADER: &str = "x-session-id";

// AppState struct containing shared resources
pub struct AppState {
    pub scheduler: MeetingScheduler,
    pub identity: Arc<dyn IdentityProvider>,
}

/// Signed-in user behind the `X-Session-Id` header
///
/// Resolved from the request head only, so handlers taking it reject
/// anonymous requests before their body is read.
pub struct CurrentUser(pub AuthenticatedUser);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = StatusCode;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let session_id = parts
            .headers
            .get(SESSION_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| {
                warn!("Request without session header");
                StatusCode::UNAUTHORIZED
            })?;

        match state.identity.current_user(session_id).await {
            Ok(Some(user)) => Ok(CurrentUser(user)),
            Ok(None) => {
                warn!("No signed-in user for session {}", session_id);
                Err(StatusCode::UNAUTHORIZED)
            }
            Err(err) => {
                error!("Failed to resolve session {}: {}", session_id, err);
                Err(err.status_code())
            }
        }
    }
}

// Schedule interview endpoint
pub async fn schedule_interview(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    ExtractJson(request): ExtractJson<SchedulingRequest>,
) -> Result<(StatusCode, Json<ScheduleResponse>), StatusCode> {
    info!(
        "Received {} interview scheduling request from {}",
        request.meeting_type, user.id
    );

    match state.scheduler.create_meeting(&user, &request, Utc::now()).await {
        Ok(meeting) => Ok((
            StatusCode::CREATED,
            Json(ScheduleResponse {
                success: true,
                redirect: Some(meeting.route),
                call_id: Some(meeting.call_id),
                practice_link: meeting.practice_link,
                notices: meeting.notices,
                retryable: false,
                form: None,
            }),
        )),
        Err(err) => {
            let status = err.status_code();
            let retryable = err.is_retryable();
            match &err {
                ScheduleError::MissingDateTime | ScheduleError::PastDateTime => {
                    info!("Scheduling request from {} failed validation: {}", user.id, err)
                }
                ScheduleError::SubmissionInProgress => {
                    warn!("Duplicate scheduling submission from {}", user.id)
                }
                ScheduleError::ExternalCreationFailure(cause) => {
                    error!(
                        "Scheduling request from {} failed (transient: {}): {}",
                        user.id,
                        cause.is_transient(),
                        cause
                    );
                    #[cfg(feature = "sentry-monitoring")]
                    sentry::capture_error(cause);
                }
            }

            Ok((
                status,
                Json(ScheduleResponse {
                    success: false,
                    redirect: None,
                    call_id: None,
                    practice_link: None,
                    notices: vec![err.notice()],
                    retryable,
                    form: Some(request),
                }),
            ))
        }
    }
}

// Practice link lookup endpoint
pub async fn practice_link(Path(level): Path<String>) -> Json<PracticeLinkResponse> {
    let link = resolve_practice_link(&level).to_string();
    Json(PracticeLinkResponse { level, link })
}

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;
