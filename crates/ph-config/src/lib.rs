mod config;
mod detector_config;
mod error;
mod exclusion_config;
mod log_level;
mod logging_config;
mod reconciler_config;
mod store_config;
mod tracker_config;

#[cfg(test)]
mod tests;

pub use config::Config;
pub use detector_config::DetectorConfig;
pub use error::{ConfigError, ConfigErrorResult};
pub use exclusion_config::ExclusionConfig;
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use reconciler_config::ReconcilerConfig;
pub use store_config::StoreConfig;
pub use tracker_config::TrackerConfig;

/// Environment variable that overrides the config directory.
pub const CONFIG_DIR_ENV: &str = "PH_CONFIG_DIR";
pub const CONFIG_FILENAME: &str = "config.toml";

const DEFAULT_LOCAL_CONFIG_DIR: &str = ".ph";
#[cfg(windows)]
const DEFAULT_PROGRAM_DATA_DIR: &str = "ProfileHygiene";

const DEFAULT_STORE_FILENAME: &str = "profiles.db";
const DEFAULT_IDENTITY_PREFIX: &str = "S-1-5-21-";
const SID_REVISION_PREFIX: &str = "S-1-";

const DEFAULT_BUILTIN_EXCLUSIONS: [&str; 9] = [
    "Administrator",
    "Default",
    "Default User",
    "Public",
    "All Users",
    "DefaultAccount",
    "Guest",
    "WDAGUtilityAccount",
    "defaultuser0",
];

pub const DEFAULT_DAYS_THRESHOLD: u32 = 90;
pub const MIN_DAYS_THRESHOLD: u32 = 1;
pub const MAX_DAYS_THRESHOLD: u32 = 3650;

pub const DEFAULT_PROFILE_THRESHOLD: u32 = 30;
const MIN_PROFILE_THRESHOLD: u32 = 1;

const DEFAULT_HOOK_NAME: &str = "ProfileHygiene-LogonTracker";
const DEFAULT_TRACKER_DIR: &str = "bin";
const DEFAULT_TRACKER_STEM: &str = "logon-tracker";
const DEFAULT_HEALTH_FILENAME: &str = "tracker-health.json";

const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "logs";
const DEFAULT_LOG_MAX_FILE_BYTES: u64 = 5 * 1024 * 1024;
const MIN_LOG_MAX_FILE_BYTES: u64 = 1024;
const DEFAULT_LOG_MAX_SEGMENTS: usize = 5;
const MAX_LOG_MAX_SEGMENTS: usize = 100;
