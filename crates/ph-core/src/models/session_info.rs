use crate::Sid;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// The interactive session the tracker was started for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionInfo {
    pub identity: Sid,
    pub username: String,
    pub profile_path: Option<PathBuf>,
}
