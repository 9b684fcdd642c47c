use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_HEALTH_FILENAME, DEFAULT_HOOK_NAME,
    DEFAULT_TRACKER_DIR, DEFAULT_TRACKER_STEM,
};

use std::path::{Path, PathBuf};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Where the installer places the tracker executable.
    /// None = `<config_dir>/bin/logon-tracker[.exe]`
    pub artifact_path: Option<String>,
    /// Scheduler registration name for the logon hook
    pub hook_name: String,
    /// Health file, relative to the config directory
    pub health_file: String,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            artifact_path: None,
            hook_name: String::from(DEFAULT_HOOK_NAME),
            health_file: String::from(DEFAULT_HEALTH_FILENAME),
        }
    }
}

impl TrackerConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.hook_name.trim().is_empty() {
            return Err(ConfigError::tracker("tracker.hook_name cannot be empty"));
        }
        if self.hook_name.contains(['"', '\n', '\r']) {
            return Err(ConfigError::tracker(
                "tracker.hook_name cannot contain quotes or line breaks",
            ));
        }

        if let Some(ref path) = self.artifact_path
            && path.trim().is_empty()
        {
            return Err(ConfigError::tracker(
                "tracker.artifact_path cannot be empty when set",
            ));
        }

        if Path::new(&self.health_file).is_absolute() || self.health_file.contains("..") {
            return Err(ConfigError::tracker(
                "tracker.health_file must be relative and cannot contain '..'",
            ));
        }

        Ok(())
    }

    /// Resolve the tracker executable path against the config directory.
    pub fn artifact_path_in(&self, config_dir: &Path) -> PathBuf {
        match self.artifact_path {
            Some(ref path) => config_dir.join(path),
            None => config_dir.join(DEFAULT_TRACKER_DIR).join(format!(
                "{}{}",
                DEFAULT_TRACKER_STEM,
                std::env::consts::EXE_SUFFIX
            )),
        }
    }
}
