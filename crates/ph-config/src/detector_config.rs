use crate::{ConfigError, ConfigErrorResult, DEFAULT_PROFILE_THRESHOLD, MIN_PROFILE_THRESHOLD};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Profile count above which the machine needs remediation (default: 30)
    pub profile_threshold: u32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            profile_threshold: DEFAULT_PROFILE_THRESHOLD,
        }
    }
}

impl DetectorConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.profile_threshold < MIN_PROFILE_THRESHOLD {
            return Err(ConfigError::detector(format!(
                "detector.profile_threshold must be >= {}, got {}",
                MIN_PROFILE_THRESHOLD, self.profile_threshold
            )));
        }

        Ok(())
    }
}
