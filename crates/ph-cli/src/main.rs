//! profile-hygiene - stale profile hygiene for shared Windows machines
//!
//! # Examples
//!
//! ```bash
//! # Install the logon tracker and seed the store
//! profile-hygiene install
//!
//! # Preview a cleanup with a longer window
//! profile-hygiene reconcile --dry-run --days-threshold 120 --exclude-users kiosk,lab
//!
//! # Check the installation
//! profile-hygiene validate --pretty
//! ```

use ph_agent::{ReconcileOptions, SystemBackend, logger};
use ph_cli::{Cli, Commands, handlers};

use std::process::ExitCode;

use chrono::Local;
use clap::Parser;
use log::error;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let failure = ExitCode::from(cli.command.error_exit_code());

    let config = match cli.load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return failure;
        }
    };

    if let Err(e) = logger::initialize(cli.command.component(), &config) {
        eprintln!("Warning: {}", e);
    }
    config.log_summary();

    let system = SystemBackend::new();
    let now = Local::now();

    let result = match cli.command {
        Commands::Install { uninstall, what_if } => {
            handlers::install(&config, &system, &system, uninstall, what_if, now).await
        }
        Commands::Validate => handlers::validate(&config, &system).await,
        Commands::Reconcile {
            days_threshold,
            exclude_users,
            dry_run,
        } => {
            let options = ReconcileOptions::from_config(&config)
                .with_days_threshold(days_threshold)
                .with_exclude_users(exclude_users)
                .with_dry_run(dry_run);
            handlers::reconcile(&config, &system, &system, &system, &options, now).await
        }
        Commands::CountProfiles { profile_threshold } => {
            handlers::count_profiles(&config, &system, profile_threshold)
        }
    };

    // Handle result
    let output = match result {
        Ok(output) => output,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            return failure;
        }
    };

    match output.render(cli.pretty) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::from(output.exit_code)
        }
        Err(e) => {
            eprintln!("Error serializing response: {}", e);
            failure
        }
    }
}
