use crate::{CoreError, Result as CoreErrorResult};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

const SID_PREFIX: &str = "S-1-";

/// Security identifier in string form (`S-1-5-21-...`).
///
/// Assigned by the OS and stable across account renames, so it is the only
/// key the store uses. Parsing checks the revision prefix and that every
/// sub-authority is numeric; the value is otherwise kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Sid(String);

impl Sid {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the identity starts with any of the given prefixes.
    pub fn matches_any_prefix<S: AsRef<str>>(&self, prefixes: &[S]) -> bool {
        prefixes
            .iter()
            .any(|prefix| self.0.starts_with(prefix.as_ref()))
    }

    /// Well-known service identities (LocalSystem, LocalService, NetworkService)
    /// and per-service virtual accounts.
    pub fn is_service_identity(&self) -> bool {
        matches!(self.0.as_str(), "S-1-5-18" | "S-1-5-19" | "S-1-5-20")
            || self.0.starts_with("S-1-5-80-")
    }
}

impl FromStr for Sid {
    type Err = CoreError;

    #[track_caller]
    fn from_str(s: &str) -> CoreErrorResult<Self> {
        let trimmed = s.trim();
        let Some(rest) = trimmed.strip_prefix(SID_PREFIX) else {
            return Err(CoreError::invalid_sid(s));
        };

        let parts: Vec<&str> = rest.split('-').collect();
        let well_formed = !parts.is_empty()
            && parts
                .iter()
                .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit()));

        if !well_formed {
            return Err(CoreError::invalid_sid(s));
        }

        Ok(Self(trimmed.to_string()))
    }
}

impl TryFrom<String> for Sid {
    type Error = CoreError;

    #[track_caller]
    fn try_from(value: String) -> CoreErrorResult<Self> {
        Self::from_str(&value)
    }
}

impl From<Sid> for String {
    fn from(sid: Sid) -> Self {
        sid.0
    }
}

impl AsRef<str> for Sid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Sid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
