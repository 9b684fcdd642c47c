use crate::Sid;

use std::str::FromStr;

use googletest::assert_that;
use googletest::prelude::{anything, eq, err};

#[test]
fn given_domain_user_sid_when_parsed_then_value_is_kept() {
    let sid = Sid::from_str("S-1-5-21-1004336348-1177238915-682003330-1001").unwrap();

    assert_that!(
        sid.as_str(),
        eq("S-1-5-21-1004336348-1177238915-682003330-1001")
    );
}

#[test]
fn given_surrounding_whitespace_when_parsed_then_trimmed() {
    let sid = Sid::from_str("  S-1-5-18 \n").unwrap();

    assert_that!(sid.as_str(), eq("S-1-5-18"));
}

#[test]
fn given_malformed_values_when_parsed_then_error() {
    for value in ["", "S-1-", "S-1-5-", "S-2-5-21", "1-5-21-1", "S-1-5-21-abc", "S-1--5"] {
        assert_that!(Sid::from_str(value), err(anything()));
    }
}

#[test]
fn test_sid_prefix_matching() {
    let sid = Sid::from_str("S-1-5-21-1-2-3-500").unwrap();

    assert!(sid.matches_any_prefix(&["S-1-12-1-", "S-1-5-21-"]));
    assert!(!sid.matches_any_prefix(&["S-1-12-1-"]));
    assert!(!sid.matches_any_prefix::<&str>(&[]));
}

#[test]
fn test_service_identities() {
    for value in ["S-1-5-18", "S-1-5-19", "S-1-5-20", "S-1-5-80-123-456"] {
        assert!(Sid::from_str(value).unwrap().is_service_identity());
    }
    assert!(!Sid::from_str("S-1-5-21-1-2-3-1001").unwrap().is_service_identity());
}

#[test]
fn test_sid_display_and_string_conversion_match() {
    let sid = Sid::from_str("S-1-5-21-1-2-3-1001").unwrap();

    assert_eq!(sid.to_string(), "S-1-5-21-1-2-3-1001");
    assert_eq!(String::from(sid), "S-1-5-21-1-2-3-1001");
}
