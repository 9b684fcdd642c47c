use crate::error::{AgentError, Result as AgentErrorResult};

use ph_core::format_last_logon;

use std::fs;
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Local};
use log::debug;
use serde::{Deserialize, Serialize};

/// Running record of tracker outcomes, kept next to the store.
///
/// Timestamps use the same local format as the store's `last_logon`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerHealth {
    pub last_success_at: Option<String>,
    pub last_failure_at: Option<String>,
    pub consecutive_failures: u32,
    pub last_error: Option<String>,
}

impl TrackerHealth {
    /// `Ok(None)` when no health file has been written yet.
    pub fn load(path: &Path) -> AgentErrorResult<Option<Self>> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(AgentError::io(path.to_path_buf(), e)),
        };

        Ok(Some(serde_json::from_str(&contents)?))
    }

    /// Write via temp file, fsync and rename so readers never see a torn file.
    pub fn save(&self, path: &Path) -> AgentErrorResult<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| AgentError::io(parent.to_path_buf(), e))?;
        }

        let json = serde_json::to_string_pretty(self)?;
        let mut temp_name = path.as_os_str().to_os_string();
        temp_name.push(format!(".tmp.{}", std::process::id()));
        let temp_path = std::path::PathBuf::from(temp_name);

        {
            let mut file =
                fs::File::create(&temp_path).map_err(|e| AgentError::io(temp_path.clone(), e))?;
            file.write_all(json.as_bytes())
                .map_err(|e| AgentError::io(temp_path.clone(), e))?;
            file.sync_all()
                .map_err(|e| AgentError::io(temp_path.clone(), e))?;
        }

        fs::rename(&temp_path, path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            AgentError::atomic_rename(temp_path, path.to_path_buf(), e)
        })?;

        debug!("Saved tracker health to {}", path.display());
        Ok(())
    }

    pub fn record_success(&mut self, at: DateTime<Local>) {
        self.last_success_at = Some(format_last_logon(&at));
        self.consecutive_failures = 0;
    }

    pub fn record_failure(&mut self, at: DateTime<Local>, error: impl Into<String>) {
        self.last_failure_at = Some(format_last_logon(&at));
        self.consecutive_failures = self.consecutive_failures.saturating_add(1);
        self.last_error = Some(error.into());
    }

    pub fn is_healthy(&self) -> bool {
        self.consecutive_failures == 0
    }
}
