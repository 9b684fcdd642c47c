use crate::disk_usage::directory_size;
use crate::error::Result as AgentErrorResult;
use crate::reconciler::{
    candidate_report::{CandidateReport, CandidateStatus},
    reconcile_options::ReconcileOptions,
    reconcile_report::{ReconcileReport, ReconcileSummary},
    skip_reason::{SkipReason, SkippedRecord},
    step_outcome::{RemovalStep, StepOutcome, StepResult},
};

use ph_config::Config;
use ph_core::{
    AccountManager, CoreError, ExclusionPolicy, LAST_LOGON_FORMAT, LiveProfile, ProfileRecord,
    ProfileRemover, ProfileSource, Sid,
};
use ph_db::ProfileRecordRepository;

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{DateTime, Local, NaiveDateTime};
use log::{debug, error, info, warn};
use sqlx::SqlitePool;

/// Decides which stored profiles are stale and removes them.
pub struct Reconciler<'a> {
    config: &'a Config,
    profiles: &'a dyn ProfileSource,
    accounts: &'a dyn AccountManager,
    remover: &'a dyn ProfileRemover,
}

/// A stale record that passed every check.
struct Candidate<'r> {
    record: &'r ProfileRecord,
    last_logon: NaiveDateTime,
    days_inactive: i64,
    path: PathBuf,
    size_bytes: u64,
}

impl<'a> Reconciler<'a> {
    pub fn new(
        config: &'a Config,
        profiles: &'a dyn ProfileSource,
        accounts: &'a dyn AccountManager,
        remover: &'a dyn ProfileRemover,
    ) -> Self {
        Self {
            config,
            profiles,
            accounts,
            remover,
        }
    }

    /// One scan-decide-delete cycle.
    ///
    /// Errors when the options are out of range or when the store or the live
    /// profile list cannot be read. Per-candidate failures are recorded in the
    /// report.
    pub async fn run(
        &self,
        pool: &SqlitePool,
        options: &ReconcileOptions,
        now: DateTime<Local>,
    ) -> AgentErrorResult<ReconcileReport> {
        let started = Instant::now();
        let mode = if options.dry_run { "dry-run" } else { "live" };
        let threshold = options.cutoff(now)?;
        let now = now.naive_local();

        let records =
            ProfileRecordRepository::list_matching(pool, &self.config.store.identity_prefixes)
                .await?;
        let live: HashMap<Sid, LiveProfile> = self
            .profiles
            .list_profiles()?
            .into_iter()
            .map(|profile| (profile.identity.clone(), profile))
            .collect();

        let exclusions = ExclusionPolicy::new(self.config.excluded_users())
            .with_additional(&options.exclude_users);

        info!(
            "Reconciliation started ({mode}): {} records, {} live profiles, threshold {} ({} days), {} exclusions",
            records.len(),
            live.len(),
            threshold.format(LAST_LOGON_FORMAT),
            options.days_threshold,
            exclusions.len()
        );

        let mut summary = ReconcileSummary {
            scanned: records.len(),
            ..ReconcileSummary::default()
        };
        let mut skipped = Vec::new();
        let mut candidates = Vec::new();

        for record in &records {
            let candidate = match Self::evaluate(record, &live, &exclusions, threshold, now) {
                Ok(candidate) => candidate,
                Err(reason) => {
                    skipped.push(SkippedRecord {
                        identity: record.identity.clone(),
                        username: record.username.clone(),
                        reason,
                    });
                    continue;
                }
            };
            summary.stale += 1;

            let report = if options.dry_run {
                Self::simulate(&candidate)
            } else {
                self.remove(pool, &candidate).await
            };

            match report.status {
                CandidateStatus::Success | CandidateStatus::Simulated => {
                    summary.removed += 1;
                    summary.reclaimed_bytes += report.size_bytes;
                }
                CandidateStatus::Partial => summary.partial += 1,
            }
            candidates.push(report);
        }

        summary.skipped = skipped.len();
        summary.elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        info!(
            "Reconciliation finished ({mode}): scanned={}, stale={}, removed={}, partial={}, skipped={}, reclaimed={} bytes, {} ms",
            summary.scanned,
            summary.stale,
            summary.removed,
            summary.partial,
            summary.skipped,
            summary.reclaimed_bytes,
            summary.elapsed_ms
        );

        Ok(ReconcileReport {
            dry_run: options.dry_run,
            days_threshold: options.days_threshold,
            threshold_instant: threshold.format(LAST_LOGON_FORMAT).to_string(),
            candidates,
            skipped,
            summary,
        })
    }

    /// Apply the exclusion, age and liveness checks in order.
    fn evaluate<'r>(
        record: &'r ProfileRecord,
        live: &HashMap<Sid, LiveProfile>,
        exclusions: &ExclusionPolicy,
        threshold: NaiveDateTime,
        now: NaiveDateTime,
    ) -> Result<Candidate<'r>, SkipReason> {
        if exclusions.is_excluded(&record.username) {
            debug!("Excluded: {} ({})", record.username, record.identity);
            return Err(SkipReason::Excluded);
        }

        let last_logon = match record.last_logon_at() {
            Ok(at) => at,
            Err(CoreError::MissingTimestamp { .. }) => {
                warn!("No LastLogon for {} ({}), skipping", record.username, record.identity);
                return Err(SkipReason::MissingTimestamp);
            }
            Err(e) => {
                warn!("Unparsable LastLogon for {}: {e}", record.identity);
                return Err(SkipReason::InvalidTimestamp {
                    value: record.last_logon.clone().unwrap_or_default(),
                });
            }
        };

        // Exactly at the threshold is not stale
        if last_logon >= threshold {
            return Err(SkipReason::NotStale);
        }

        let Some(profile) = live.get(&record.identity) else {
            warn!(
                "Stale record {} ({}) has no live profile, skipping",
                record.username, record.identity
            );
            return Err(SkipReason::NoLiveProfile);
        };

        if profile.loaded {
            warn!(
                "Profile of {} ({}) is loaded, skipping",
                record.username, record.identity
            );
            return Err(SkipReason::Loaded);
        }

        let path = Self::profile_path(record, profile);
        let size_bytes = directory_size(&path);

        Ok(Candidate {
            record,
            last_logon,
            days_inactive: (now - last_logon).num_days(),
            path,
            size_bytes,
        })
    }

    /// The live registration path wins over the advisory stored one.
    fn profile_path(record: &ProfileRecord, profile: &LiveProfile) -> PathBuf {
        if !profile.local_path.as_os_str().is_empty() {
            return profile.local_path.clone();
        }
        record
            .profile_path
            .as_deref()
            .map(PathBuf::from)
            .unwrap_or_default()
    }

    fn simulate(candidate: &Candidate<'_>) -> CandidateReport {
        info!(
            "[dry-run] Would remove {} ({}), last logon {} ({} days), {} bytes at {}",
            candidate.record.username,
            candidate.record.identity,
            candidate.last_logon.format(LAST_LOGON_FORMAT),
            candidate.days_inactive,
            candidate.size_bytes,
            candidate.path.display()
        );

        let steps = [RemovalStep::Account, RemovalStep::Profile, RemovalStep::Record]
            .into_iter()
            .map(|step| StepResult {
                step,
                outcome: StepOutcome::Simulated,
            })
            .collect();

        Self::candidate_report(candidate, CandidateStatus::Simulated, steps, Vec::new())
    }

    async fn remove(&self, pool: &SqlitePool, candidate: &Candidate<'_>) -> CandidateReport {
        let record = candidate.record;
        info!(
            "Removing {} ({}), last logon {} ({} days), {} bytes at {}",
            record.username,
            record.identity,
            candidate.last_logon.format(LAST_LOGON_FORMAT),
            candidate.days_inactive,
            candidate.size_bytes,
            candidate.path.display()
        );

        let steps = vec![
            StepResult {
                step: RemovalStep::Account,
                outcome: self.remove_account(&record.username),
            },
            StepResult {
                step: RemovalStep::Profile,
                outcome: self.remove_profile(&record.identity, &candidate.path),
            },
            StepResult {
                step: RemovalStep::Record,
                outcome: Self::remove_record(pool, &record.identity).await,
            },
        ];

        let failed_steps: Vec<RemovalStep> = steps
            .iter()
            .filter(|result| result.outcome.is_failure())
            .map(|result| result.step)
            .collect();

        let status = if failed_steps.is_empty() {
            info!("Removed {} ({})", record.username, record.identity);
            CandidateStatus::Success
        } else {
            error!(
                "Partial removal of {} ({}): failed steps {:?}",
                record.username, record.identity, failed_steps
            );
            CandidateStatus::Partial
        };

        Self::candidate_report(candidate, status, steps, failed_steps)
    }

    fn remove_account(&self, username: &str) -> StepOutcome {
        match self.accounts.account_exists(username) {
            Ok(false) => {
                info!("Account {username} not found");
                StepOutcome::NotFound
            }
            Ok(true) => match self.accounts.delete_account(username) {
                Ok(()) => {
                    info!("Deleted account {username}");
                    StepOutcome::Done
                }
                Err(e) => {
                    error!("Failed to delete account {username}: {e}");
                    StepOutcome::Failed {
                        error: e.to_string(),
                    }
                }
            },
            Err(e) => {
                error!("Failed to look up account {username}: {e}");
                StepOutcome::Failed {
                    error: e.to_string(),
                }
            }
        }
    }

    fn remove_profile(&self, identity: &Sid, path: &Path) -> StepOutcome {
        let primary_error = match self.remover.delete_profile(identity) {
            Ok(()) => {
                info!("Deleted profile registration {identity}");
                return StepOutcome::Done;
            }
            Err(e) => e.to_string(),
        };

        warn!(
            "Profile removal for {identity} failed ({primary_error}), removing {} directly",
            path.display()
        );

        if path.as_os_str().is_empty() {
            error!("No profile directory known for {identity}");
            return StepOutcome::Failed {
                error: primary_error,
            };
        }

        match std::fs::remove_dir_all(path) {
            Ok(()) => {
                info!("Removed profile directory {}", path.display());
                StepOutcome::DirectoryRemoved { primary_error }
            }
            Err(e) => {
                error!("Failed to remove profile directory {}: {e}", path.display());
                StepOutcome::Failed {
                    error: format!("{primary_error}; directory removal: {e}"),
                }
            }
        }
    }

    async fn remove_record(pool: &SqlitePool, identity: &Sid) -> StepOutcome {
        match ProfileRecordRepository::delete(pool, identity).await {
            Ok(true) => {
                info!("Deleted store record {identity}");
                StepOutcome::Done
            }
            Ok(false) => StepOutcome::NotFound,
            Err(e) => {
                error!("Failed to delete store record {identity}: {e}");
                StepOutcome::Failed {
                    error: e.to_string(),
                }
            }
        }
    }

    fn candidate_report(
        candidate: &Candidate<'_>,
        status: CandidateStatus,
        steps: Vec<StepResult>,
        failed_steps: Vec<RemovalStep>,
    ) -> CandidateReport {
        CandidateReport {
            identity: candidate.record.identity.clone(),
            username: candidate.record.username.clone(),
            last_logon: candidate.last_logon.format(LAST_LOGON_FORMAT).to_string(),
            days_inactive: candidate.days_inactive,
            profile_path: candidate.path.to_string_lossy().into_owned(),
            size_bytes: candidate.size_bytes,
            status,
            steps,
            failed_steps,
        }
    }
}
