use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_LOG_DIRECTORY, DEFAULT_LOG_MAX_FILE_BYTES,
    DEFAULT_LOG_MAX_SEGMENTS, LogLevel, MAX_LOG_MAX_SEGMENTS, MIN_LOG_MAX_FILE_BYTES,
};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
    /// Audit log directory, relative to the config directory unless absolute
    pub dir: String,
    /// Active segment size that triggers rotation
    pub max_file_bytes: u64,
    /// Rotated segments kept per component
    pub max_segments: usize,
    /// Mirror log lines to stdout
    pub console: bool,
    pub colored: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            dir: String::from(DEFAULT_LOG_DIRECTORY),
            max_file_bytes: DEFAULT_LOG_MAX_FILE_BYTES,
            max_segments: DEFAULT_LOG_MAX_SEGMENTS,
            console: true,
            colored: false,
        }
    }
}

impl LoggingConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.dir.trim().is_empty() {
            return Err(ConfigError::logging("logging.dir cannot be empty"));
        }

        if self.max_file_bytes < MIN_LOG_MAX_FILE_BYTES {
            return Err(ConfigError::logging(format!(
                "logging.max_file_bytes must be >= {}, got {}",
                MIN_LOG_MAX_FILE_BYTES, self.max_file_bytes
            )));
        }

        if self.max_segments == 0 || self.max_segments > MAX_LOG_MAX_SEGMENTS {
            return Err(ConfigError::logging(format!(
                "logging.max_segments must be 1-{}, got {}",
                MAX_LOG_MAX_SEGMENTS, self.max_segments
            )));
        }

        Ok(())
    }
}
