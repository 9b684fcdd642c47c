//! ph-cli library
//!
//! Argument parsing and command handlers behind the `profile-hygiene` binary,
//! exported for tests.

pub mod cli;
pub mod command_output;
pub mod commands;
pub mod handlers;

#[cfg(test)]
mod tests;

pub use cli::Cli;
pub use command_output::{CommandOutput, EXIT_ERROR, EXIT_FINDING, EXIT_OK};
pub use commands::Commands;
