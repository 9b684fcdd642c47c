use ph_core::Sid;

use serde::Serialize;

/// Outcome of one seeding pass. In what-if mode `entries` are the upserts
/// that would have been written.
#[derive(Debug, Clone, Serialize)]
pub struct SeedReport {
    pub what_if: bool,
    pub discovered: usize,
    pub entries: Vec<SeedEntry>,
    pub skipped: Vec<SeedSkip>,
    pub failures: Vec<SeedFailure>,
}

impl SeedReport {
    pub fn seeded(&self) -> usize {
        self.entries.len()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SeedEntry {
    pub identity: Sid,
    pub username: String,
    pub last_logon: String,
    pub profile_path: String,
    pub source: TimestampSource,
}

/// Where a seeded `LastLogon` came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampSource {
    ProfileModified,
    Now,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeedSkip {
    pub identity: Sid,
    pub reason: SeedSkipReason,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SeedSkipReason {
    SpecialProfile,
    Excluded { username: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct SeedFailure {
    pub identity: Sid,
    pub error: String,
}
