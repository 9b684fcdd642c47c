//! `LastLogon` wire format.
//!
//! Values are local wall-clock time with second precision. The store keeps
//! them as text so administrative edits and legacy values survive a round
//! trip; parsing is the point where bad values are detected.

use crate::{CoreError, Result as CoreErrorResult};

use chrono::{DateTime, NaiveDateTime, TimeZone};

/// Canonical format written by the seeder and the tracker.
pub const LAST_LOGON_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const ALTERNATE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Format a timestamp in the canonical store format, local wall-clock.
pub fn format_last_logon<Tz: TimeZone>(at: &DateTime<Tz>) -> String {
    at.naive_local().format(LAST_LOGON_FORMAT).to_string()
}

/// Parse a stored `LastLogon` value into naive local time.
///
/// Accepts the canonical format, `T`-separated ISO-8601 and RFC 3339. An
/// RFC 3339 value keeps its own wall-clock reading; the offset is dropped.
#[track_caller]
pub fn parse_last_logon(value: &str) -> CoreErrorResult<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::invalid_timestamp(value));
    }

    if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, LAST_LOGON_FORMAT) {
        return Ok(parsed);
    }

    for format in ALTERNATE_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(parsed);
        }
    }

    DateTime::parse_from_rfc3339(trimmed)
        .map(|parsed| parsed.naive_local())
        .map_err(|_| CoreError::invalid_timestamp(value))
}
