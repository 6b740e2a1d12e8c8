use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::client::VideoClient;
use crate::error::{ScheduleError, VideoError};
use crate::identity::AuthenticatedUser;
use crate::models::form::{MeetingType, SchedulingRequest};
use crate::models::meeting::{meeting_route, CallData, CallMetadata, MeetingRef};
use crate::models::notice::Notice;
use crate::services::practice_links::practice_link_for;
use crate::services::submission_guard::SubmissionGuard;

/// Check that a start time was picked and lies strictly after `now`
pub fn validate(
    request: &SchedulingRequest,
    now: DateTime<Utc>,
) -> Result<DateTime<Utc>, ScheduleError> {
    match request.start_time {
        None => Err(ScheduleError::MissingDateTime),
        Some(start_time) if start_time <= now => Err(ScheduleError::PastDateTime),
        Some(start_time) => Ok(start_time),
    }
}

/// Turns validated scheduling requests into video calls
pub struct MeetingScheduler {
    client: Arc<dyn VideoClient>,
    call_type: String,
    guard: SubmissionGuard,
}

impl MeetingScheduler {
    pub fn new(client: Arc<dyn VideoClient>, call_type: impl Into<String>) -> Self {
        Self {
            client,
            call_type: call_type.into(),
            guard: SubmissionGuard::new(),
        }
    }

    pub fn guard(&self) -> &SubmissionGuard {
        &self.guard
    }

    pub async fn create_meeting(
        &self,
        user: &AuthenticatedUser,
        request: &SchedulingRequest,
        now: DateTime<Utc>,
    ) -> Result<MeetingRef, ScheduleError> {
        let starts_at = validate(request, now).map_err(|err| {
            warn!("Rejected scheduling request from {}: {}", user.id, err);
            err
        })?;

        let _permit = self
            .guard
            .try_acquire(&user.id)
            .ok_or(ScheduleError::SubmissionInProgress)?;

        let call_id = Uuid::new_v4().to_string();
        let data = CallData {
            starts_at,
            created_by_id: user.id.clone(),
            custom: CallMetadata::from_request(request),
        };

        info!(
            "Creating {} interview call {} for user {} at {}",
            request.meeting_type, call_id, user.id, starts_at
        );

        let created = self
            .client
            .get_or_create_call(&self.call_type, &call_id, &data)
            .await;
        let call = match created {
            Ok(call) => call,
            Err(err) => {
                match &err {
                    VideoError::Transport(_) => {
                        error!("Video service unreachable for call {}: {}", call_id, err)
                    }
                    VideoError::Rejected { status, .. } => error!(
                        "Video service rejected call {} with status {}: {}",
                        call_id, status, err
                    ),
                    VideoError::InvalidResponse(_) | VideoError::Auth(_) => {
                        error!("Failed to create call {}: {}", call_id, err)
                    }
                }
                return Err(ScheduleError::ExternalCreationFailure(err));
            }
        };

        let mut notices = Vec::new();
        let link = practice_link_for(request.effective_level());
        let practice_link = if request.meeting_type == MeetingType::Dsa && !link.is_empty() {
            let level = request.effective_level().map(|l| l.as_str()).unwrap_or_default();
            notices.push(Notice::with_link(
                "DSA Question Link",
                link,
                format!("Click here for {} level questions", level),
            ));
            Some(link.to_string())
        } else {
            None
        };

        let route = meeting_route(&call.id);
        notices.push(Notice::new("Meeting Created"));

        info!("Created call {}, redirecting to {}", call.cid, route);

        Ok(MeetingRef {
            call_id: call.id,
            route,
            practice_link,
            notices,
        })
    }
}

#[cfg(test)]
#[path = "scheduler_test.rs"]
mod scheduler_test;
