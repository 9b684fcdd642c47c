mod common;

use common::{create_test_record, create_test_store};

use ph_db::{DbError, ProfileRecordRepository, StoreConnection, StoreMetaRepository};

use googletest::prelude::*;
use tempfile::TempDir;

#[tokio::test]
async fn given_missing_parent_directory_when_opening_then_created_with_schema() {
    // Given: A path whose directory does not exist
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("profiles.db");

    // When
    let pool = StoreConnection::open(&path).await.unwrap();

    // Then
    assert!(path.exists());
    assert_that!(StoreConnection::schema_present(&pool).await.unwrap(), eq(true));
}

#[tokio::test]
async fn given_no_store_file_when_opening_read_only_then_store_missing() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("profiles.db");

    let result = StoreConnection::open_read_only(&path).await;

    assert!(matches!(result, Err(DbError::StoreMissing { .. })));
    assert!(result.unwrap_err().is_not_found());
    assert!(!path.exists());
}

#[tokio::test]
async fn given_populated_store_when_opening_read_only_then_data_visible() {
    // Given: A store with a version marker and one record
    let store = create_test_store().await;
    StoreMetaRepository::set_version(&store.pool, "0.1.0")
        .await
        .unwrap();
    ProfileRecordRepository::upsert(&store.pool, &create_test_record(1001, "olduser"))
        .await
        .unwrap();
    store.pool.close().await;

    // When
    let pool = StoreConnection::open_read_only(&store.path).await.unwrap();

    // Then
    assert_that!(StoreConnection::schema_present(&pool).await.unwrap(), eq(true));
    assert_that!(
        StoreMetaRepository::version(&pool).await.unwrap(),
        some(eq("0.1.0"))
    );
    let records = ProfileRecordRepository::list(&pool).await.unwrap();
    assert_that!(records, len(eq(1)));
}

#[tokio::test]
async fn given_read_only_pool_when_writing_then_error() {
    let store = create_test_store().await;
    store.pool.close().await;
    let pool = StoreConnection::open_read_only(&store.path).await.unwrap();

    let result = StoreMetaRepository::set_version(&pool, "0.1.0").await;

    assert_that!(result, err(anything()));
}

#[tokio::test]
async fn given_foreign_sqlite_file_when_checking_schema_then_false() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("other.db");
    let options = sqlx::sqlite::SqliteConnectOptions::new()
        .filename(&path)
        .create_if_missing(true);
    let pool = sqlx::SqlitePool::connect_with(options).await.unwrap();
    sqlx::query("CREATE TABLE unrelated (id INTEGER)")
        .execute(&pool)
        .await
        .unwrap();

    assert_that!(StoreConnection::schema_present(&pool).await.unwrap(), eq(false));
}

#[tokio::test]
async fn given_existing_store_when_removed_then_file_and_sidecars_gone() {
    let store = create_test_store().await;
    store.pool.close().await;

    let removed = StoreConnection::remove(&store.path).unwrap();
    let removed_again = StoreConnection::remove(&store.path).unwrap();

    assert_that!(removed, eq(true));
    assert_that!(removed_again, eq(false));
    assert!(!store.path.exists());
    let mut wal = store.path.clone().into_os_string();
    wal.push("-wal");
    assert!(!std::path::PathBuf::from(wal).exists());
}

#[tokio::test]
async fn given_no_store_file_when_opening_existing_then_store_missing_and_nothing_created() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("profiles.db");

    let result = StoreConnection::open_existing(&path).await;

    assert!(matches!(result, Err(DbError::StoreMissing { .. })));
    assert!(!path.exists());
}
