use crate::error::Result as AgentErrorResult;
use crate::tracker::{track_outcome::TrackOutcome, tracker_health::TrackerHealth};

use ph_config::Config;
use ph_core::{ProfileRecord, ProfileSource, format_last_logon, sanitize_username};
use ph_db::{ProfileRecordRepository, StoreConnection};

use chrono::{DateTime, Local};
use log::{info, warn};

/// Stamps the active session's identity with the current time.
///
/// Never fails to the caller: every problem becomes a [`TrackOutcome`] and a
/// log line, and the health file is updated on a best-effort basis.
pub struct Tracker<'a> {
    config: &'a Config,
    profiles: &'a dyn ProfileSource,
}

impl<'a> Tracker<'a> {
    pub fn new(config: &'a Config, profiles: &'a dyn ProfileSource) -> Self {
        Self { config, profiles }
    }

    pub async fn run(&self, now: DateTime<Local>) -> TrackOutcome {
        let outcome = self.record(now).await;

        match outcome {
            TrackOutcome::Recorded {
                ref identity,
                ref username,
                ref last_logon,
            } => info!("Recorded logon for {username} ({identity}) at {last_logon}"),
            TrackOutcome::IdentityUnresolved { ref error } => {
                warn!("Could not resolve the session identity: {error}")
            }
            TrackOutcome::StoreFailed {
                ref identity,
                ref error,
            } => warn!("Could not record logon for {identity}: {error}"),
        }

        self.update_health(&outcome, now);
        outcome
    }

    async fn record(&self, now: DateTime<Local>) -> TrackOutcome {
        let session = match self.profiles.current_session() {
            Ok(session) => session,
            Err(e) => {
                return TrackOutcome::IdentityUnresolved {
                    error: e.to_string(),
                };
            }
        };

        let username = sanitize_username(&session.username);
        // The hook runs as SYSTEM, so the process environment says nothing
        // about the user's profile. No path from the session means none stored.
        let profile_path = session
            .profile_path
            .map(|path| path.to_string_lossy().into_owned());
        let last_logon = format_last_logon(&now);

        let record = ProfileRecord::new(
            session.identity.clone(),
            username.clone(),
            last_logon.clone(),
            profile_path,
        );

        match self.write(&record).await {
            Ok(()) => TrackOutcome::Recorded {
                identity: session.identity,
                username,
                last_logon,
            },
            Err(e) => TrackOutcome::StoreFailed {
                identity: session.identity,
                error: e.to_string(),
            },
        }
    }

    async fn write(&self, record: &ProfileRecord) -> AgentErrorResult<()> {
        let pool = StoreConnection::open(&self.config.store_path()).await?;
        let result = ProfileRecordRepository::upsert(&pool, record).await;
        pool.close().await;
        Ok(result?)
    }

    fn update_health(&self, outcome: &TrackOutcome, now: DateTime<Local>) {
        let path = self.config.tracker_health_path();

        let mut health = match TrackerHealth::load(&path) {
            Ok(existing) => existing.unwrap_or_default(),
            Err(e) => {
                warn!("Resetting unreadable tracker health file: {e}");
                TrackerHealth::default()
            }
        };

        match outcome.error() {
            None => health.record_success(now),
            Some(error) => health.record_failure(now, error),
        }

        if let Err(e) = health.save(&path) {
            warn!("Failed to save tracker health: {e}");
        }
    }
}
