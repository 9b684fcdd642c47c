use crate::{LAST_LOGON_FORMAT, format_last_logon, parse_last_logon};

use chrono::{FixedOffset, NaiveDate, TimeZone};
use googletest::assert_that;
use googletest::prelude::{anything, eq, err, ok};

fn expected() -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 5, 10)
        .unwrap()
        .and_hms_opt(8, 30, 15)
        .unwrap()
}

#[test]
fn given_canonical_value_when_parsed_then_ok() {
    assert_eq!(parse_last_logon("2026-05-10 08:30:15").unwrap(), expected());
}

#[test]
fn given_iso_t_separator_when_parsed_then_ok() {
    assert_eq!(parse_last_logon("2026-05-10T08:30:15").unwrap(), expected());
}

#[test]
fn given_rfc3339_when_parsed_then_wall_clock_is_kept() {
    assert_eq!(
        parse_last_logon("2026-05-10T08:30:15+02:00").unwrap(),
        expected()
    );
}

#[test]
fn given_garbage_when_parsed_then_error() {
    for value in ["", "   ", "yesterday", "2026-13-40 99:99:99", "10/05/2026"] {
        assert_that!(parse_last_logon(value), err(anything()));
    }
}

#[test]
fn given_datetime_when_formatted_then_uses_local_wall_clock() {
    let offset = FixedOffset::east_opt(5 * 3600).unwrap();
    let at = offset.from_local_datetime(&expected()).unwrap();

    let formatted = format_last_logon(&at);

    assert_that!(formatted.as_str(), eq("2026-05-10 08:30:15"));
    assert_that!(
        chrono::NaiveDateTime::parse_from_str(&formatted, LAST_LOGON_FORMAT),
        ok(anything())
    );
}
