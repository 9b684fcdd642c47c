use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_IDENTITY_PREFIX, DEFAULT_STORE_FILENAME,
    SID_REVISION_PREFIX,
};

use std::path::Path;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Database file, relative to the config directory
    pub path: String,
    /// Identity prefixes that mark a store node as a user record
    pub identity_prefixes: Vec<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: String::from(DEFAULT_STORE_FILENAME),
            identity_prefixes: vec![String::from(DEFAULT_IDENTITY_PREFIX)],
        }
    }
}

impl StoreConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        // The store must stay inside the config directory
        if self.path.trim().is_empty() {
            return Err(ConfigError::store("store.path cannot be empty"));
        }
        if Path::new(&self.path).is_absolute() || self.path.contains("..") {
            return Err(ConfigError::store(
                "store.path must be relative and cannot contain '..'",
            ));
        }

        if self.identity_prefixes.is_empty() {
            return Err(ConfigError::store(
                "store.identity_prefixes must name at least one prefix",
            ));
        }
        if let Some(bad) = self
            .identity_prefixes
            .iter()
            .find(|prefix| !prefix.starts_with(SID_REVISION_PREFIX))
        {
            return Err(ConfigError::store(format!(
                "store.identity_prefixes entries must start with '{}', got '{}'",
                SID_REVISION_PREFIX, bad
            )));
        }

        Ok(())
    }
}
