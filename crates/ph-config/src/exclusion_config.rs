use crate::DEFAULT_BUILTIN_EXCLUSIONS;

use serde::Deserialize;

/// Usernames that are never touched by the seeder or the reconciler.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExclusionConfig {
    pub builtin: Vec<String>,
    pub additional: Vec<String>,
}

impl Default for ExclusionConfig {
    fn default() -> Self {
        Self {
            builtin: DEFAULT_BUILTIN_EXCLUSIONS
                .iter()
                .map(|name| name.to_string())
                .collect(),
            additional: Vec::new(),
        }
    }
}
