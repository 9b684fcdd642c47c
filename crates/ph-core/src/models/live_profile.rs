use crate::Sid;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A profile registration as the OS currently reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveProfile {
    pub identity: Sid,
    pub local_path: PathBuf,
    /// System-owned profile (LocalSystem, service accounts).
    pub special: bool,
    /// A session is currently using the profile.
    pub loaded: bool,
}
