use crate::error::Result as AgentErrorResult;
use crate::seeder::seed_report::{
    SeedEntry, SeedFailure, SeedReport, SeedSkip, SeedSkipReason, TimestampSource,
};

use ph_config::Config;
use ph_core::{
    ExclusionPolicy, LiveProfile, ProfileRecord, ProfileSource, format_last_logon,
    username_from_profile_path,
};
use ph_db::ProfileRecordRepository;

use std::io::ErrorKind;

use chrono::{DateTime, Local};
use log::{debug, info, warn};
use sqlx::SqlitePool;

/// Populates the store from the profiles already registered on the machine.
///
/// Only the built-in exclusions apply here; operator-supplied names are a
/// reconciliation concern and still get a record.
pub struct Seeder<'a> {
    profiles: &'a dyn ProfileSource,
    exclusions: ExclusionPolicy,
}

enum Survey {
    Entry(SeedEntry),
    Skip(SeedSkip),
    Failure(SeedFailure),
}

impl<'a> Seeder<'a> {
    pub fn new(config: &Config, profiles: &'a dyn ProfileSource) -> Self {
        Self {
            profiles,
            exclusions: ExclusionPolicy::new(&config.exclusions.builtin),
        }
    }

    /// Perform every read and decision without writing.
    pub fn plan(&self, now: DateTime<Local>) -> AgentErrorResult<SeedReport> {
        let profiles = self.profiles.list_profiles()?;
        info!("Seeder (what-if): {} profiles discovered", profiles.len());

        let mut report = Self::empty_report(true, profiles.len());
        for profile in &profiles {
            match self.survey(profile, now) {
                Survey::Entry(entry) => {
                    info!(
                        "[what-if] Would seed {} ({}) with {}",
                        entry.username, entry.identity, entry.last_logon
                    );
                    report.entries.push(entry);
                }
                Survey::Skip(skip) => report.skipped.push(skip),
                Survey::Failure(failure) => report.failures.push(failure),
            }
        }

        Ok(report)
    }

    /// Upsert one record per eligible profile. Re-running overwrites.
    pub async fn run(&self, pool: &SqlitePool, now: DateTime<Local>) -> AgentErrorResult<SeedReport> {
        let profiles = self.profiles.list_profiles()?;
        info!("Seeder: {} profiles discovered", profiles.len());

        let mut report = Self::empty_report(false, profiles.len());
        for profile in &profiles {
            let entry = match self.survey(profile, now) {
                Survey::Entry(entry) => entry,
                Survey::Skip(skip) => {
                    report.skipped.push(skip);
                    continue;
                }
                Survey::Failure(failure) => {
                    report.failures.push(failure);
                    continue;
                }
            };

            let record = ProfileRecord::new(
                entry.identity.clone(),
                entry.username.clone(),
                entry.last_logon.clone(),
                Some(entry.profile_path.clone()),
            );

            match ProfileRecordRepository::upsert(pool, &record).await {
                Ok(()) => {
                    info!(
                        "Seeded {} ({}) with {}",
                        entry.username, entry.identity, entry.last_logon
                    );
                    report.entries.push(entry);
                }
                Err(e) => {
                    warn!("Failed to seed {}: {e}", entry.identity);
                    report.failures.push(SeedFailure {
                        identity: entry.identity,
                        error: e.to_string(),
                    });
                }
            }
        }

        info!(
            "Seeder finished: {} seeded, {} skipped, {} failed",
            report.seeded(),
            report.skipped.len(),
            report.failures.len()
        );

        Ok(report)
    }

    fn empty_report(what_if: bool, discovered: usize) -> SeedReport {
        SeedReport {
            what_if,
            discovered,
            entries: Vec::new(),
            skipped: Vec::new(),
            failures: Vec::new(),
        }
    }

    fn survey(&self, profile: &LiveProfile, now: DateTime<Local>) -> Survey {
        if profile.special {
            debug!("Skipping special profile {}", profile.identity);
            return Survey::Skip(SeedSkip {
                identity: profile.identity.clone(),
                reason: SeedSkipReason::SpecialProfile,
            });
        }

        let Some(username) = username_from_profile_path(&profile.local_path) else {
            warn!(
                "Cannot derive a username for {} from {}",
                profile.identity,
                profile.local_path.display()
            );
            return Survey::Failure(SeedFailure {
                identity: profile.identity.clone(),
                error: format!(
                    "no username in profile path {}",
                    profile.local_path.display()
                ),
            });
        };

        if self.exclusions.is_excluded(&username) {
            debug!("Skipping excluded profile {username} ({})", profile.identity);
            return Survey::Skip(SeedSkip {
                identity: profile.identity.clone(),
                reason: SeedSkipReason::Excluded { username },
            });
        }

        let (last_logon, source) = Self::profile_timestamp(profile, now);

        Survey::Entry(SeedEntry {
            identity: profile.identity.clone(),
            username,
            last_logon: format_last_logon(&last_logon),
            profile_path: profile.local_path.to_string_lossy().into_owned(),
            source,
        })
    }

    /// Profile directory mtime, else `now`.
    fn profile_timestamp(
        profile: &LiveProfile,
        now: DateTime<Local>,
    ) -> (DateTime<Local>, TimestampSource) {
        match std::fs::metadata(&profile.local_path).and_then(|m| m.modified()) {
            Ok(modified) => (DateTime::<Local>::from(modified), TimestampSource::ProfileModified),
            Err(e) if e.kind() == ErrorKind::NotFound => (now, TimestampSource::Now),
            Err(e) => {
                warn!(
                    "Cannot read modification time of {}, using now: {e}",
                    profile.local_path.display()
                );
                (now, TimestampSource::Now)
            }
        }
    }
}
