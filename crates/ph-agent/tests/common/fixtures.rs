use ph_config::Config;
use ph_core::{LAST_LOGON_FORMAT, ProfileRecord, Sid};
use ph_db::{ProfileRecordRepository, StoreConnection};

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{DateTime, Duration, Local, TimeZone};
use sqlx::SqlitePool;
use tempfile::TempDir;

/// Temp config directory plus a config rooted in it.
pub struct TestEnv {
    pub dir: TempDir,
    pub config: Config,
}

impl TestEnv {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let config = Config {
            config_dir: dir.path().to_path_buf(),
            ..Config::default()
        };
        Self { dir, config }
    }

    /// Root for fake profile directories, outside the config directory's files.
    pub fn users_dir(&self) -> PathBuf {
        self.dir.path().join("Users")
    }

    pub async fn store(&self) -> SqlitePool {
        StoreConnection::open(&self.config.store_path())
            .await
            .expect("Failed to open store")
    }

    pub async fn records(&self) -> Vec<ProfileRecord> {
        let pool = self.store().await;
        let records = ProfileRecordRepository::list(&pool).await.unwrap();
        pool.close().await;
        records
    }
}

/// Noon, mid-June: away from any daylight saving transition.
pub fn fixed_now() -> DateTime<Local> {
    Local
        .with_ymd_and_hms(2026, 6, 15, 12, 0, 0)
        .single()
        .expect("unambiguous local time")
}

/// Wall-clock `days` before `now`, in the stored format.
pub fn days_ago(now: DateTime<Local>, days: i64) -> String {
    (now.naive_local() - Duration::days(days))
        .format(LAST_LOGON_FORMAT)
        .to_string()
}

pub fn sid(rid: u32) -> Sid {
    Sid::from_str(&format!("S-1-5-21-1004336348-1177238915-682003330-{rid}")).unwrap()
}

pub fn record(identity: Sid, username: &str, last_logon: &str, path: &Path) -> ProfileRecord {
    ProfileRecord::new(
        identity,
        username,
        last_logon,
        Some(path.to_string_lossy().into_owned()),
    )
}

pub async fn stored_record(pool: &SqlitePool, record: &ProfileRecord) {
    ProfileRecordRepository::upsert(pool, record).await.unwrap();
}

/// A profile directory holding one file of `bytes` bytes.
pub fn profile_dir(root: &Path, username: &str, bytes: usize) -> PathBuf {
    let dir = root.join(username);
    write_bytes(&dir.join("NTUSER.DAT"), bytes);
    dir
}

pub fn write_bytes(path: &Path, bytes: usize) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, vec![0u8; bytes]).unwrap();
}
