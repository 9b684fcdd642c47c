use crate::system::task_scheduler::{
    SCHTASKS, create_args, delete_args, parse_query_output, query_args,
};

use ph_core::{HookStatus, SystemError, SystemResult};

use std::path::Path;
use std::process::{Command, Output};

use log::debug;

fn run(operation: &str, args: &[String]) -> SystemResult<Output> {
    Command::new(SCHTASKS)
        .args(args)
        .output()
        .map_err(|e| SystemError::io(operation, e))
}

fn failure(operation: &str, output: &Output) -> SystemError {
    let stderr = String::from_utf8_lossy(&output.stderr);
    SystemError::command(
        operation,
        format!("{} ({})", stderr.trim(), output.status),
    )
}

pub(super) fn query(name: &str) -> SystemResult<Option<HookStatus>> {
    let output = run("schtasks /Query", &query_args(name))?;

    if !output.status.success() {
        debug!(
            "schtasks /Query {name}: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        );
        return Ok(None);
    }

    Ok(parse_query_output(
        name,
        &String::from_utf8_lossy(&output.stdout),
    ))
}

pub(super) fn register(name: &str, command: &Path) -> SystemResult<()> {
    let output = run("schtasks /Create", &create_args(name, command))?;

    if !output.status.success() {
        return Err(failure("schtasks /Create", &output));
    }

    Ok(())
}

pub(super) fn unregister(name: &str) -> SystemResult<bool> {
    if query(name)?.is_none() {
        return Ok(false);
    }

    let output = run("schtasks /Delete", &delete_args(name))?;

    if !output.status.success() {
        return Err(failure("schtasks /Delete", &output));
    }

    Ok(true)
}
