pub mod audit_file;
pub mod component;

use crate::error::{AgentError, Result as AgentErrorResult};
use crate::logger::component::Component;

use ph_config::Config;

use std::io::Write;
use std::path::PathBuf;
use std::time::SystemTime;

use fern::Dispatch;
use fern::colors::{Color, ColoredLevelConfig};
use log::{info, warn};

/// Where log lines end up after initialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// Audit file, optionally mirrored to the console.
    File { path: PathBuf, console: bool },
    /// Console only, either by configuration or because the file could not be opened.
    Console { fallback_reason: Option<String> },
}

/// Build the dispatch for `component` without installing it.
///
/// The audit file is `<log_dir>/<component>.log`. When it cannot be opened the
/// dispatch writes to the console instead, even if console output is disabled.
pub fn build(component: Component, config: &Config) -> (Dispatch, LogTarget) {
    let logging = &config.logging;
    let path = config.log_dir().join(component.log_file_name());

    let root = Dispatch::new().level(*logging.level);

    match audit_file::open(&path, logging.max_file_bytes, logging.max_segments) {
        Ok(file) => {
            let writer: Box<dyn Write + Send> = Box::new(file);
            let mut root = root.chain(plain_dispatch().chain(writer));
            if logging.console {
                root = root.chain(console_dispatch(logging.colored));
            }
            (
                root,
                LogTarget::File {
                    path,
                    console: logging.console,
                },
            )
        }
        Err(e) => (
            root.chain(console_dispatch(logging.colored)),
            LogTarget::Console {
                fallback_reason: Some(format!("{}: {}", path.display(), e)),
            },
        ),
    }
}

/// Initialize the process-wide logger for `component`.
///
/// Can only succeed once per process.
#[track_caller]
pub fn initialize(component: Component, config: &Config) -> AgentErrorResult<LogTarget> {
    let (dispatch, target) = build(component, config);

    dispatch
        .apply()
        .map_err(|e| AgentError::logger(format!("Failed to initialize logger: {e}")))?;

    match target {
        LogTarget::File { ref path, .. } => info!(
            "Logger initialized for {}: level={:?}, file={}",
            component,
            *config.logging.level,
            path.display()
        ),
        LogTarget::Console {
            fallback_reason: Some(ref reason),
        } => warn!("Audit log unavailable for {component}, using console: {reason}"),
        LogTarget::Console {
            fallback_reason: None,
        } => info!(
            "Logger initialized for {}: level={:?}, console",
            component, *config.logging.level
        ),
    }

    Ok(target)
}

fn plain_dispatch() -> Dispatch {
    Dispatch::new().format(|out, message, record| {
        out.finish(format_args!(
            "[{date} - {level}] {message} [{file}:{line}]",
            date = humantime::format_rfc3339(SystemTime::now()),
            level = record.level(),
            message = message,
            file = record.file().unwrap_or("unknown"),
            line = record.line().unwrap_or(0),
        ))
    })
}

/// Console lines go to stderr; stdout carries command output.
fn console_dispatch(colored: bool) -> Dispatch {
    if !colored {
        return plain_dispatch().chain(std::io::stderr());
    }

    let colors = ColoredLevelConfig::new()
        .trace(Color::Magenta)
        .debug(Color::Blue)
        .info(Color::Green)
        .warn(Color::Yellow)
        .error(Color::Red);

    Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{date} - {level}] {message} [{file}:{line}]",
                date = humantime::format_rfc3339(SystemTime::now()),
                level = colors.color(record.level()),
                message = message,
                file = record.file().unwrap_or("unknown"),
                line = record.line().unwrap_or(0),
            ))
        })
        .chain(std::io::stderr())
}
