use ph_core::Sid;

use serde::Serialize;

/// Result of a single tracker run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TrackOutcome {
    Recorded {
        identity: Sid,
        username: String,
        last_logon: String,
    },
    /// No active session identity; nothing was written.
    IdentityUnresolved { error: String },
    StoreFailed { identity: Sid, error: String },
}

impl TrackOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Recorded { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Recorded { .. } => None,
            Self::IdentityUnresolved { error } | Self::StoreFailed { error, .. } => Some(error),
        }
    }
}
