use crate::command_output::{CommandOutput, EXIT_FINDING, EXIT_OK};

use ph_agent::{
    Detector, Installer, ReconcileOptions, Reconciler, Result as AgentErrorResult, Validator,
};
use ph_config::Config;
use ph_core::{AccountManager, LogonHook, ProfileRemover, ProfileSource};
use ph_db::StoreConnection;

use chrono::{DateTime, Local};
use log::{error, warn};
use serde_json::json;

pub async fn install(
    config: &Config,
    profiles: &dyn ProfileSource,
    hook: &dyn LogonHook,
    uninstall: bool,
    what_if: bool,
    now: DateTime<Local>,
) -> AgentErrorResult<CommandOutput> {
    let installer = Installer::new(config, profiles, hook);
    let report = if uninstall {
        installer.uninstall(what_if).await
    } else {
        installer.install(what_if, now).await
    };

    if !report.succeeded() {
        warn!("{:?} finished with failed steps", report.action);
    }

    Ok(CommandOutput::new(EXIT_OK, &report)?)
}

pub async fn validate(config: &Config, hook: &dyn LogonHook) -> AgentErrorResult<CommandOutput> {
    let report = Validator::new(config, hook).run().await;
    let exit_code = if report.compliant { EXIT_OK } else { EXIT_FINDING };

    Ok(CommandOutput::new(exit_code, &report)?)
}

/// Run one reconciliation against the installed store.
///
/// A dry run opens the store read-only; neither mode creates a missing store.
pub async fn reconcile(
    config: &Config,
    profiles: &dyn ProfileSource,
    accounts: &dyn AccountManager,
    remover: &dyn ProfileRemover,
    options: &ReconcileOptions,
    now: DateTime<Local>,
) -> AgentErrorResult<CommandOutput> {
    let path = config.store_path();
    let pool = if options.dry_run {
        StoreConnection::open_read_only(&path).await?
    } else {
        StoreConnection::open_existing(&path).await?
    };

    let result = Reconciler::new(config, profiles, accounts, remover)
        .run(&pool, options, now)
        .await;
    pool.close().await;

    let report = result.inspect_err(|e| error!("Reconciliation aborted: {e}"))?;
    Ok(CommandOutput::new(EXIT_OK, &report)?)
}

pub fn count_profiles(
    config: &Config,
    profiles: &dyn ProfileSource,
    threshold: Option<u32>,
) -> AgentErrorResult<CommandOutput> {
    let report = Detector::new(config, profiles)
        .with_threshold(threshold)
        .run()?;
    let exit_code = if report.exceeded { EXIT_FINDING } else { EXIT_OK };

    let body = json!({
        "count": report.count,
        "threshold": report.threshold,
        "exceeded": report.exceeded,
        "message": report.message(),
    });
    Ok(CommandOutput::new(exit_code, &body)?)
}
