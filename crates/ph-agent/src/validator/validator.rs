use crate::tracker::tracker_health::TrackerHealth;
use crate::validator::{
    check_result::{
        CheckResult, LOGON_HOOK_CHECK, PROFILE_RECORDS_CHECK, STORE_ROOT_CHECK,
        TRACKER_ARTIFACT_CHECK, TRACKER_HEALTH_CHECK, VERSION_MARKER_CHECK,
    },
    validation_report::ValidationReport,
};

use ph_config::Config;
use ph_core::LogonHook;
use ph_db::{ProfileRecordRepository, StoreConnection, StoreMetaRepository};

use log::{info, warn};
use sqlx::SqlitePool;

const MANDATORY: bool = true;
const INFORMATIONAL: bool = false;

/// Read-only install consistency check. Never creates or modifies state.
pub struct Validator<'a> {
    config: &'a Config,
    hook: &'a dyn LogonHook,
}

impl<'a> Validator<'a> {
    pub fn new(config: &'a Config, hook: &'a dyn LogonHook) -> Self {
        Self { config, hook }
    }

    pub async fn run(&self) -> ValidationReport {
        let (store_check, pool) = self.check_store_root().await;

        let checks = vec![
            store_check,
            self.check_tracker_artifact(),
            Self::check_version_marker(pool.as_ref()).await,
            self.check_logon_hook(),
            self.check_profile_records(pool.as_ref()).await,
            self.check_tracker_health(),
        ];

        if let Some(pool) = pool {
            pool.close().await;
        }

        for check in &checks {
            if check.passed {
                info!("[PASS] {}: {}", check.name, check.detail);
            } else {
                warn!("[FAIL] {}: {}", check.name, check.detail);
            }
        }

        let report = ValidationReport::from_checks(checks);
        info!(
            "Validation finished: compliant={}, failed={:?}",
            report.compliant, report.failed_checks
        );
        report
    }

    async fn check_store_root(&self) -> (CheckResult, Option<SqlitePool>) {
        let path = self.config.store_path();

        let pool = match StoreConnection::open_read_only(&path).await {
            Ok(pool) => pool,
            Err(e) if e.is_not_found() => {
                return (
                    CheckResult::fail(
                        STORE_ROOT_CHECK,
                        MANDATORY,
                        format!("no store at {}", path.display()),
                    ),
                    None,
                );
            }
            Err(e) => {
                return (
                    CheckResult::fail(STORE_ROOT_CHECK, MANDATORY, e.to_string()),
                    None,
                );
            }
        };

        match StoreConnection::schema_present(&pool).await {
            Ok(true) => (
                CheckResult::pass(STORE_ROOT_CHECK, MANDATORY, path.display().to_string()),
                Some(pool),
            ),
            Ok(false) => {
                pool.close().await;
                (
                    CheckResult::fail(
                        STORE_ROOT_CHECK,
                        MANDATORY,
                        format!("{} has no store schema", path.display()),
                    ),
                    None,
                )
            }
            Err(e) => {
                pool.close().await;
                (
                    CheckResult::fail(STORE_ROOT_CHECK, MANDATORY, e.to_string()),
                    None,
                )
            }
        }
    }

    fn check_tracker_artifact(&self) -> CheckResult {
        let path = self.config.tracker_artifact_path();
        if path.is_file() {
            CheckResult::pass(TRACKER_ARTIFACT_CHECK, MANDATORY, path.display().to_string())
        } else {
            CheckResult::fail(
                TRACKER_ARTIFACT_CHECK,
                MANDATORY,
                format!("missing at {}", path.display()),
            )
        }
    }

    async fn check_version_marker(pool: Option<&SqlitePool>) -> CheckResult {
        let Some(pool) = pool else {
            return CheckResult::fail(VERSION_MARKER_CHECK, MANDATORY, "store unavailable");
        };

        match StoreMetaRepository::version(pool).await {
            Ok(Some(version)) if !version.trim().is_empty() => {
                CheckResult::pass(VERSION_MARKER_CHECK, MANDATORY, version)
            }
            Ok(_) => CheckResult::fail(VERSION_MARKER_CHECK, MANDATORY, "no version recorded"),
            Err(e) => CheckResult::fail(VERSION_MARKER_CHECK, MANDATORY, e.to_string()),
        }
    }

    fn check_logon_hook(&self) -> CheckResult {
        let name = &self.config.tracker.hook_name;
        match self.hook.query(name) {
            Ok(Some(status)) if status.is_runnable() => CheckResult::pass(
                LOGON_HOOK_CHECK,
                MANDATORY,
                format!("{name} ({})", status.state),
            ),
            Ok(Some(status)) => CheckResult::fail(
                LOGON_HOOK_CHECK,
                MANDATORY,
                format!(
                    "{name} is registered but not runnable (enabled={}, state={})",
                    status.enabled, status.state
                ),
            ),
            Ok(None) => CheckResult::fail(
                LOGON_HOOK_CHECK,
                MANDATORY,
                format!("{name} is not registered"),
            ),
            Err(e) => CheckResult::fail(LOGON_HOOK_CHECK, MANDATORY, e.to_string()),
        }
    }

    async fn check_profile_records(&self, pool: Option<&SqlitePool>) -> CheckResult {
        let Some(pool) = pool else {
            return CheckResult::fail(PROFILE_RECORDS_CHECK, INFORMATIONAL, "store unavailable");
        };

        match ProfileRecordRepository::count_matching(pool, &self.config.store.identity_prefixes)
            .await
        {
            Ok(0) => CheckResult::fail(PROFILE_RECORDS_CHECK, INFORMATIONAL, "no user records"),
            Ok(count) => {
                CheckResult::pass(PROFILE_RECORDS_CHECK, INFORMATIONAL, format!("{count} records"))
            }
            Err(e) => CheckResult::fail(PROFILE_RECORDS_CHECK, INFORMATIONAL, e.to_string()),
        }
    }

    fn check_tracker_health(&self) -> CheckResult {
        match TrackerHealth::load(&self.config.tracker_health_path()) {
            Ok(None) => {
                CheckResult::pass(TRACKER_HEALTH_CHECK, INFORMATIONAL, "no tracker runs recorded")
            }
            Ok(Some(health)) if health.is_healthy() => CheckResult::pass(
                TRACKER_HEALTH_CHECK,
                INFORMATIONAL,
                format!(
                    "last success at {}",
                    health.last_success_at.as_deref().unwrap_or("unknown")
                ),
            ),
            Ok(Some(health)) => CheckResult::fail(
                TRACKER_HEALTH_CHECK,
                INFORMATIONAL,
                format!(
                    "{} consecutive failures, last error: {}",
                    health.consecutive_failures,
                    health.last_error.as_deref().unwrap_or("unknown")
                ),
            ),
            Err(e) => CheckResult::fail(
                TRACKER_HEALTH_CHECK,
                INFORMATIONAL,
                format!("unreadable health file: {e}"),
            ),
        }
    }
}
