use crate::error::{AgentError, Result as AgentErrorResult};

use ph_config::{Config, MAX_DAYS_THRESHOLD, MIN_DAYS_THRESHOLD};

use chrono::{DateTime, Local, NaiveDateTime, TimeDelta};

/// Per-run inputs. Exclusions here add to the configured ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileOptions {
    pub days_threshold: u32,
    pub exclude_users: Vec<String>,
    pub dry_run: bool,
}

impl ReconcileOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            days_threshold: config.reconciler.days_threshold,
            exclude_users: Vec::new(),
            dry_run: false,
        }
    }

    pub fn with_days_threshold(mut self, days: Option<u32>) -> Self {
        if let Some(days) = days {
            self.days_threshold = days;
        }
        self
    }

    pub fn with_exclude_users<I, S>(mut self, users: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_users.extend(users.into_iter().map(Into::into));
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Local wall-clock instant before which a last logon is stale.
    ///
    /// Rejects thresholds outside the configurable range and any that would
    /// reach before the earliest representable date.
    pub fn cutoff(&self, now: DateTime<Local>) -> AgentErrorResult<NaiveDateTime> {
        if !(MIN_DAYS_THRESHOLD..=MAX_DAYS_THRESHOLD).contains(&self.days_threshold) {
            return Err(AgentError::invalid_options(format!(
                "days_threshold must be {}-{}, got {}",
                MIN_DAYS_THRESHOLD, MAX_DAYS_THRESHOLD, self.days_threshold
            )));
        }

        TimeDelta::try_days(i64::from(self.days_threshold))
            .and_then(|days| now.naive_local().checked_sub_signed(days))
            .ok_or_else(|| {
                AgentError::invalid_options(format!(
                    "days_threshold {} reaches past the earliest representable date",
                    self.days_threshold
                ))
            })
    }
}
