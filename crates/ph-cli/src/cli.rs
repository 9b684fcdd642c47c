use crate::commands::Commands;

use ph_config::{Config, ConfigErrorResult};

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(name = "profile-hygiene")]
#[command(about = "Finds and removes stale user profiles on shared Windows machines")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config directory (default: PH_CONFIG_DIR, then %ProgramData%\ProfileHygiene)
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,
}

impl Cli {
    /// Load and validate the config from `--config-dir` or the default location.
    pub fn load_config(&self) -> ConfigErrorResult<Config> {
        let config = match self.config_dir {
            Some(ref dir) => Config::load_from(dir)?,
            None => Config::load()?,
        };
        config.validate()?;
        Ok(config)
    }
}
