use crate::command_output::{EXIT_ERROR, EXIT_FINDING, EXIT_OK};

use ph_agent::Component;

use clap::{Subcommand, value_parser};

#[derive(Subcommand)]
pub enum Commands {
    /// Place the logon tracker, register its hook and seed the store
    Install {
        /// Remove the hook, the tracker and the store instead
        #[arg(long)]
        uninstall: bool,

        /// Report what would change without changing anything
        #[arg(long)]
        what_if: bool,
    },

    /// Check that the agent is installed and consistent (read-only)
    Validate,

    /// Remove profiles whose last logon is older than the threshold
    Reconcile {
        /// Days without a logon before a profile is stale (default from config)
        #[arg(long, value_parser = value_parser!(u32).range(1..=3650))]
        days_threshold: Option<u32>,

        /// Additional usernames to keep, comma separated
        #[arg(long, value_delimiter = ',')]
        exclude_users: Vec<String>,

        /// Report candidates without removing anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Count user profiles against a threshold
    CountProfiles {
        /// Maximum acceptable profile count (default from config)
        #[arg(long, value_parser = value_parser!(u32).range(1..))]
        profile_threshold: Option<u32>,
    },
}

impl Commands {
    /// Audit log the command writes to.
    pub fn component(&self) -> Component {
        match self {
            Commands::Install { .. } => Component::Installer,
            Commands::Validate => Component::Validator,
            Commands::Reconcile { .. } => Component::Reconciler,
            Commands::CountProfiles { .. } => Component::Detector,
        }
    }

    /// Exit code when the command cannot produce its report.
    ///
    /// Install always exits 0; its report carries per-step failures.
    pub fn error_exit_code(&self) -> u8 {
        match self {
            Commands::Install { .. } => EXIT_OK,
            Commands::Reconcile { .. } => EXIT_FINDING,
            Commands::Validate | Commands::CountProfiles { .. } => EXIT_ERROR,
        }
    }
}
