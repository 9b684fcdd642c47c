use ph_core::{ProfileRecord, Sid};

use std::str::FromStr;

/// Builds a user identity with the given relative id
pub fn test_sid(rid: u32) -> Sid {
    Sid::from_str(&format!("S-1-5-21-1111111111-2222222222-3333333333-{rid}")).unwrap()
}

/// Creates a ProfileRecord with a fixed timestamp
pub fn create_test_record(rid: u32, username: &str) -> ProfileRecord {
    create_test_record_at(rid, username, "2026-01-15 09:00:00")
}

/// Creates a ProfileRecord with an explicit timestamp value
pub fn create_test_record_at(rid: u32, username: &str, last_logon: &str) -> ProfileRecord {
    ProfileRecord::new(
        test_sid(rid),
        username,
        last_logon,
        Some(format!(r"C:\Users\{username}")),
    )
}
