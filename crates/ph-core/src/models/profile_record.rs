use crate::{CoreError, Result as CoreErrorResult, Sid, parse_last_logon};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Last-seen metadata for one user identity, as held by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub identity: Sid,

    /// Display name at the time of the last write. Advisory, never a key.
    pub username: String,

    /// Raw stored value; `None` when the node carries no timestamp.
    pub last_logon: Option<String>,

    pub profile_path: Option<String>,
}

impl ProfileRecord {
    pub fn new(
        identity: Sid,
        username: impl Into<String>,
        last_logon: impl Into<String>,
        profile_path: Option<String>,
    ) -> Self {
        Self {
            identity,
            username: username.into(),
            last_logon: Some(last_logon.into()),
            profile_path,
        }
    }

    /// Parsed `last_logon`, in local wall-clock time.
    #[track_caller]
    pub fn last_logon_at(&self) -> CoreErrorResult<NaiveDateTime> {
        match self.last_logon.as_deref() {
            Some(raw) => parse_last_logon(raw),
            None => Err(CoreError::missing_timestamp(self.identity.as_str())),
        }
    }
}
