use crate::DEFAULT_LOG_LEVEL;

use std::convert::Infallible;
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use log::LevelFilter;
use serde::{Deserialize, Deserializer};

/// Audit log verbosity.
///
/// Accepts the `log` level names in any case, `warning`, and a numeric
/// verbosity from 0 (off) to 5 (trace). Anything else keeps the default level
/// and remembers the rejected value so the loaded config can report it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLevel {
    filter: LevelFilter,
    rejected: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawLevel {
    Name(String),
    Verbosity(u64),
}

impl LogLevel {
    pub const fn new(filter: LevelFilter) -> Self {
        Self {
            filter,
            rejected: None,
        }
    }

    pub fn filter(&self) -> LevelFilter {
        self.filter
    }

    /// The configured value that was not a level, if any.
    pub fn rejected(&self) -> Option<&str> {
        self.rejected.as_deref()
    }

    fn from_verbosity(verbosity: u64) -> Option<LevelFilter> {
        match verbosity {
            0 => Some(LevelFilter::Off),
            1 => Some(LevelFilter::Error),
            2 => Some(LevelFilter::Warn),
            3 => Some(LevelFilter::Info),
            4 => Some(LevelFilter::Debug),
            5 => Some(LevelFilter::Trace),
            _ => None,
        }
    }

    fn from_name(name: &str) -> Option<LevelFilter> {
        let name = name.trim();
        if name.eq_ignore_ascii_case("warning") {
            return Some(LevelFilter::Warn);
        }
        if let Ok(verbosity) = name.parse::<u64>() {
            return Self::from_verbosity(verbosity);
        }
        LevelFilter::from_str(name).ok()
    }

    fn rejecting(raw: impl Into<String>) -> Self {
        Self {
            filter: DEFAULT_LOG_LEVEL,
            rejected: Some(raw.into()),
        }
    }
}

impl Default for LogLevel {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_LEVEL)
    }
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let level = match RawLevel::deserialize(deserializer) {
            Ok(RawLevel::Name(name)) => Self::from_str(&name).unwrap_or_default(),
            Ok(RawLevel::Verbosity(verbosity)) => match Self::from_verbosity(verbosity) {
                Some(filter) => Self::new(filter),
                None => Self::rejecting(verbosity.to_string()),
            },
            Err(_) => Self::rejecting("<not a string or number>"),
        };

        Ok(level)
    }
}

impl FromStr for LogLevel {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match Self::from_name(s) {
            Some(filter) => Self::new(filter),
            None => Self::rejecting(s),
        })
    }
}

impl From<LogLevel> for LevelFilter {
    fn from(log_level: LogLevel) -> Self {
        log_level.filter
    }
}

impl Deref for LogLevel {
    type Target = LevelFilter;

    fn deref(&self) -> &Self::Target {
        &self.filter
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.rejected {
            Some(raw) => write!(f, "{} (unrecognized {:?})", self.filter, raw),
            None => write!(f, "{}", self.filter),
        }
    }
}
