use ph_core::Sid;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    Excluded,
    MissingTimestamp,
    InvalidTimestamp { value: String },
    NotStale,
    NoLiveProfile,
    Loaded,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRecord {
    pub identity: Sid,
    pub username: String,
    #[serde(flatten)]
    pub reason: SkipReason,
}
