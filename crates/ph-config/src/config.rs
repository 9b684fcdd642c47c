use crate::{
    CONFIG_DIR_ENV, CONFIG_FILENAME, ConfigError, ConfigErrorResult, DEFAULT_LOCAL_CONFIG_DIR,
    DetectorConfig, ExclusionConfig, LoggingConfig, ReconcilerConfig, StoreConfig, TrackerConfig,
};

use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Directory the config was loaded from; every relative path resolves here.
    #[serde(skip)]
    pub config_dir: PathBuf,
    pub store: StoreConfig,
    pub exclusions: ExclusionConfig,
    pub reconciler: ReconcilerConfig,
    pub tracker: TrackerConfig,
    pub detector: DetectorConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load config from the default config directory.
    ///
    /// Loading order:
    /// 1. PH_CONFIG_DIR env var, else %ProgramData%\ProfileHygiene on Windows, else ./.ph/
    /// 2. config.toml in that directory if it exists, else defaults
    /// 3. PH_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;
        Self::load_from(&config_dir)
    }

    /// Load config from an explicit directory. The directory is not created;
    /// read-only callers (validator, detector) must not leave traces behind.
    pub fn load_from(config_dir: &Path) -> ConfigErrorResult<Self> {
        let config_path = config_dir.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.config_dir = config_dir.to_path_buf();
        config.apply_env_overrides();

        Ok(config)
    }

    /// Load and parse TOML file with detailed error context.
    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: PH_CONFIG_DIR env var > %ProgramData%\ProfileHygiene (Windows) > ./.ph/
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        #[cfg(windows)]
        if let Ok(program_data) = std::env::var("ProgramData") {
            return Ok(PathBuf::from(program_data).join(crate::DEFAULT_PROGRAM_DATA_DIR));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_LOCAL_CONFIG_DIR))
    }

    /// Create the config directory if missing. Called by writers only.
    pub fn ensure_config_dir(&self) -> ConfigErrorResult<()> {
        if !self.config_dir.exists() {
            std::fs::create_dir_all(&self.config_dir).map_err(|e| ConfigError::Io {
                path: self.config_dir.clone(),
                source: e,
            })?;
        }
        Ok(())
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.store.validate()?;
        self.reconciler.validate()?;
        self.tracker.validate()?;
        self.detector.validate()?;
        self.logging.validate()?;

        Ok(())
    }

    /// Absolute path of the store database.
    pub fn store_path(&self) -> PathBuf {
        self.config_dir.join(&self.store.path)
    }

    /// Absolute path of the installed tracker executable.
    pub fn tracker_artifact_path(&self) -> PathBuf {
        self.tracker.artifact_path_in(&self.config_dir)
    }

    pub fn tracker_health_path(&self) -> PathBuf {
        self.config_dir.join(&self.tracker.health_file)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.config_dir.join(&self.logging.dir)
    }

    /// Built-in and configured extra exclusions, in that order.
    pub fn excluded_users(&self) -> impl Iterator<Item = &str> {
        self.exclusions
            .builtin
            .iter()
            .chain(self.exclusions.additional.iter())
            .map(String::as_str)
    }

    /// Log configuration summary.
    pub fn log_summary(&self) {
        info!("Configuration loaded from {}:", self.config_dir.display());
        info!(
            "  store: {} (identity prefixes: {})",
            self.store_path().display(),
            self.store.identity_prefixes.join(", ")
        );
        info!(
            "  exclusions: {} built-in, {} additional",
            self.exclusions.builtin.len(),
            self.exclusions.additional.len()
        );
        info!(
            "  reconciler: threshold={}d",
            self.reconciler.days_threshold
        );
        info!(
            "  tracker: {} (hook: {})",
            self.tracker_artifact_path().display(),
            self.tracker.hook_name
        );
        info!(
            "  detector: profile_threshold={}",
            self.detector.profile_threshold
        );
        info!(
            "  logging: {} -> {} (rotate at {} bytes, keep {})",
            self.logging.level,
            self.log_dir().display(),
            self.logging.max_file_bytes,
            self.logging.max_segments
        );
        if let Some(raw) = self.logging.level.rejected() {
            warn!(
                "  logging.level {:?} is not a level, using {}",
                raw,
                self.logging.level.filter()
            );
        }
    }

    fn apply_env_overrides(&mut self) {
        // Store
        Self::apply_env_string("PH_STORE_PATH", &mut self.store.path);

        // Exclusions
        if let Ok(val) = std::env::var("PH_EXCLUDE_USERS") {
            self.exclusions.additional.extend(
                val.split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(String::from),
            );
        }

        // Reconciler
        Self::apply_env_parse("PH_DAYS_THRESHOLD", &mut self.reconciler.days_threshold);

        // Tracker
        Self::apply_env_option_string(
            "PH_TRACKER_ARTIFACT_PATH",
            &mut self.tracker.artifact_path,
        );
        Self::apply_env_string("PH_TRACKER_HOOK_NAME", &mut self.tracker.hook_name);

        // Detector
        Self::apply_env_parse(
            "PH_PROFILE_THRESHOLD",
            &mut self.detector.profile_threshold,
        );

        // Logging
        Self::apply_env_parse("PH_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_string("PH_LOG_DIR", &mut self.logging.dir);
        Self::apply_env_parse("PH_LOG_MAX_FILE_BYTES", &mut self.logging.max_file_bytes);
        Self::apply_env_bool("PH_LOG_CONSOLE", &mut self.logging.console);
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
