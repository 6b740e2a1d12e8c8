use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeetingType {
    #[default]
    Dsa,
    Behavioral,
}

impl MeetingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MeetingType::Dsa => "dsa",
            MeetingType::Behavioral => "behavioral",
        }
    }
}

impl fmt::Display for MeetingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DsaLevel {
    Beginner,
    Medium,
    Hard,
}

impl DsaLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            DsaLevel::Beginner => "beginner",
            DsaLevel::Medium => "medium",
            DsaLevel::Hard => "hard",
        }
    }
}

impl fmt::Display for DsaLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scheduling parameters entered by the user for a single submission
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SchedulingRequest {
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub meeting_type: MeetingType,
    // The level picker starts out as "", which means no level was chosen
    #[serde(default, deserialize_with = "deserialize_level")]
    pub dsa_level: Option<DsaLevel>,
}

fn deserialize_level<'de, D>(deserializer: D) -> Result<Option<DsaLevel>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some("beginner") => Ok(Some(DsaLevel::Beginner)),
        Some("medium") => Ok(Some(DsaLevel::Medium)),
        Some("hard") => Ok(Some(DsaLevel::Hard)),
        Some(other) => Err(serde::de::Error::unknown_variant(
            other,
            &["beginner", "medium", "hard"],
        )),
    }
}

impl SchedulingRequest {
    /// Level that applies to this request; behavioral interviews have none
    pub fn effective_level(&self) -> Option<DsaLevel> {
        match self.meeting_type {
            MeetingType::Dsa => self.dsa_level,
            MeetingType::Behavioral => None,
        }
    }

    /// Title stored as the call description
    pub fn compose_description(&self) -> String {
        match (self.meeting_type, self.effective_level()) {
            (MeetingType::Dsa, Some(level)) => format!("DSA Mock Interview ({})", level),
            (MeetingType::Dsa, None) => "DSA Mock Interview".to_string(),
            (MeetingType::Behavioral, _) => "Behavioral Interview".to_string(),
        }
    }
}
