use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_DAYS_THRESHOLD, MAX_DAYS_THRESHOLD,
    MIN_DAYS_THRESHOLD,
};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReconcilerConfig {
    /// Days without a recorded logon before a profile is stale (default: 90)
    pub days_threshold: u32,
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self {
            days_threshold: DEFAULT_DAYS_THRESHOLD,
        }
    }
}

impl ReconcilerConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if !(MIN_DAYS_THRESHOLD..=MAX_DAYS_THRESHOLD).contains(&self.days_threshold) {
            return Err(ConfigError::reconciler(format!(
                "reconciler.days_threshold must be {}-{}, got {}",
                MIN_DAYS_THRESHOLD, MAX_DAYS_THRESHOLD, self.days_threshold
            )));
        }

        Ok(())
    }
}
