use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::form::{DsaLevel, MeetingType, SchedulingRequest};
use crate::models::notice::Notice;

// Custom payload attached to the call; the video service never interprets it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallMetadata {
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub meeting_type: MeetingType,
    pub dsa_level: Option<DsaLevel>,
}

impl CallMetadata {
    pub fn from_request(request: &SchedulingRequest) -> Self {
        let notes = request.description.trim();
        Self {
            description: request.compose_description(),
            notes: (!notes.is_empty()).then(|| notes.to_string()),
            meeting_type: request.meeting_type,
            dsa_level: request.effective_level(),
        }
    }
}

/// Fields sent when creating a call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallData {
    pub starts_at: DateTime<Utc>,
    pub created_by_id: String,
    pub custom: CallMetadata,
}

// Call as returned by the video service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallRef {
    pub id: String,
    #[serde(rename = "type")]
    pub call_type: String,
    pub cid: String,
}

/// Result of a successful scheduling submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeetingRef {
    pub call_id: String,
    pub route: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub practice_link: Option<String>,
    pub notices: Vec<Notice>,
}

pub fn meeting_route(call_id: &str) -> String {
    format!("/meeting/{}", call_id)
}

// Response structure for the scheduling endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct ScheduleResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub practice_link: Option<String>,
    pub notices: Vec<Notice>,
    pub retryable: bool,
    // Echoed back on failure so the form keeps what the user typed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form: Option<SchedulingRequest>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PracticeLinkResponse {
    pub level: String,
    pub link: String,
}
