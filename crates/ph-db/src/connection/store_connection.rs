use crate::{DbError, Result};

use std::panic::Location;
use std::path::{Path, PathBuf};
use std::time::Duration;

use error_location::ErrorLocation;
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);
const SIDECAR_SUFFIXES: [&str; 2] = ["-wal", "-shm"];

/// Opens the store database.
///
/// Writers (installer, seeder, tracker, reconciler) use [`StoreConnection::open`],
/// which creates the store root on first use. The validator uses
/// [`StoreConnection::open_read_only`] so that checking never creates state.
pub struct StoreConnection;

impl StoreConnection {
    /// Open (creating if missing) and migrate the store at `path`.
    pub async fn open(path: &Path) -> Result<SqlitePool> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .map_err(|e| DbError::io(parent.to_path_buf(), e))?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(BUSY_TIMEOUT);

        // Single writer per process
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        Self::run_migrations(&pool).await?;

        Ok(pool)
    }

    /// Open and migrate a store that must already exist.
    ///
    /// Returns [`DbError::StoreMissing`] when no database file exists.
    pub async fn open_existing(path: &Path) -> Result<SqlitePool> {
        if !path.is_file() {
            return Err(DbError::store_missing(path.to_path_buf()));
        }

        Self::open(path).await
    }

    /// Open an existing store without creating or migrating it.
    ///
    /// Returns [`DbError::StoreMissing`] when no database file exists.
    pub async fn open_read_only(path: &Path) -> Result<SqlitePool> {
        if !path.is_file() {
            return Err(DbError::store_missing(path.to_path_buf()));
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .read_only(true)
            .busy_timeout(BUSY_TIMEOUT);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        Ok(pool)
    }

    /// True when the store tables exist in the opened database.
    pub async fn schema_present(pool: &SqlitePool) -> Result<bool> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM sqlite_master \
             WHERE type = 'table' AND name IN ('store_meta', 'profile_records')",
        )
        .fetch_one(pool)
        .await?;

        Ok(count == 2)
    }

    /// Delete the store database and its WAL sidecars.
    ///
    /// Returns `false` when there was no store to delete. Close every pool on
    /// the file first.
    pub fn remove(path: &Path) -> Result<bool> {
        let existed = path.exists();

        for candidate in std::iter::once(path.to_path_buf()).chain(Self::sidecars(path)) {
            match std::fs::remove_file(&candidate) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(DbError::io(candidate, e)),
            }
        }

        Ok(existed)
    }

    fn sidecars(path: &Path) -> impl Iterator<Item = PathBuf> + '_ {
        SIDECAR_SUFFIXES.iter().map(move |suffix| {
            let mut name = path.as_os_str().to_os_string();
            name.push(suffix);
            PathBuf::from(name)
        })
    }

    async fn run_migrations(pool: &SqlitePool) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(pool)
            .await
            .map_err(|e| DbError::Migration {
                message: format!("Migration failed: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(())
    }
}
