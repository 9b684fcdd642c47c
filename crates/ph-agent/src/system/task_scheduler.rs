//! `schtasks.exe` command lines and output parsing for the logon hook.

use ph_core::HookStatus;

use std::path::Path;

pub const SCHTASKS: &str = "schtasks.exe";

const DISABLED_STATUS: &str = "Disabled";

/// Run `command` at every logon as SYSTEM with highest privileges, replacing
/// any task of the same name.
pub fn create_args(name: &str, command: &Path) -> Vec<String> {
    vec![
        "/Create".to_string(),
        "/TN".to_string(),
        name.to_string(),
        "/TR".to_string(),
        format!("\"{}\"", command.display()),
        "/SC".to_string(),
        "ONLOGON".to_string(),
        "/RU".to_string(),
        "SYSTEM".to_string(),
        "/RL".to_string(),
        "HIGHEST".to_string(),
        "/F".to_string(),
    ]
}

pub fn query_args(name: &str) -> Vec<String> {
    vec![
        "/Query".to_string(),
        "/TN".to_string(),
        name.to_string(),
        "/FO".to_string(),
        "CSV".to_string(),
        "/NH".to_string(),
    ]
}

pub fn delete_args(name: &str) -> Vec<String> {
    vec![
        "/Delete".to_string(),
        "/TN".to_string(),
        name.to_string(),
        "/F".to_string(),
    ]
}

/// Parse `/Query /FO CSV /NH` output: `"TaskName","Next Run Time","Status"`.
///
/// Only the first row is read; blank lines before it are skipped.
pub fn parse_query_output(name: &str, stdout: &str) -> Option<HookStatus> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(stdout.as_bytes());

    let row = reader.records().next()?.ok()?;
    let state = row.get(2)?.to_string();

    Some(HookStatus {
        name: name.to_string(),
        enabled: !state.eq_ignore_ascii_case(DISABLED_STATUS),
        state,
    })
}
