use ph_db::StoreConnection;

use std::path::PathBuf;

use sqlx::SqlitePool;
use tempfile::TempDir;

/// A migrated store in a temp directory; the directory lives as long as this.
pub struct TestStore {
    pub dir: TempDir,
    pub path: PathBuf,
    pub pool: SqlitePool,
}

/// Creates a fresh store file with migrations applied
pub async fn create_test_store() -> TestStore {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("profiles.db");

    let pool = StoreConnection::open(&path)
        .await
        .expect("Failed to open test store");

    TestStore { dir, path, pool }
}
