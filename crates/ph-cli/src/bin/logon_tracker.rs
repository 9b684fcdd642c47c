//! logon-tracker - records the active session's logon time
//!
//! Runs from the logon hook with no arguments. Always exits 0 so that a
//! tracking problem never disturbs the logon; failures go to the audit log
//! and the tracker health file.

use ph_agent::{Component, SystemBackend, Tracker, logger};
use ph_config::Config;

use std::process::ExitCode;

use chrono::Local;
use log::warn;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let mut config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::SUCCESS;
        }
    };

    // No console behind a logon task
    config.logging.console = false;

    if let Err(e) = logger::initialize(Component::Tracker, &config) {
        eprintln!("Warning: {}", e);
    }

    if let Err(e) = config.validate() {
        warn!("Invalid configuration, tracking skipped: {}", e);
        return ExitCode::SUCCESS;
    }

    let system = SystemBackend::new();
    Tracker::new(&config, &system).run(Local::now()).await;

    ExitCode::SUCCESS
}
