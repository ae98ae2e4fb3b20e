use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallRecord {
    pub id: String,
    pub assistant_id: String,
    pub recipient_phone_number: String,
    pub status: CallStatus,
    #[serde(default)]
    pub duration_secs: Option<u32>,
    #[serde(default)]
    pub transcript: Option<String>,
    #[serde(default)]
    pub recording_urls: Vec<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum CallStatus {
    Queued,
    Ringing,
    InProgress,
    Completed,
    Failed,
    Busy,
    NoAnswer,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleCallRequest {
    pub assistant_id: String,
    pub recipient_phone_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_phone_number: Option<String>,
}
