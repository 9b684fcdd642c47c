use crate::Result as DbErrorResult;

use ph_core::{ProfileRecord, Sid};

use std::str::FromStr;

use chrono::Utc;
use log::warn;
use sqlx::FromRow;

#[derive(Debug, FromRow)]
struct ProfileRecordRow {
    identity: String,
    username: String,
    last_logon: Option<String>,
    profile_path: Option<String>,
}

impl ProfileRecordRow {
    /// Rows whose key is not a valid identity were written by hand; they are
    /// reported and left alone.
    fn into_record(self) -> Option<ProfileRecord> {
        match Sid::from_str(&self.identity) {
            Ok(identity) => Some(ProfileRecord {
                identity,
                username: self.username,
                last_logon: self.last_logon,
                profile_path: self.profile_path,
            }),
            Err(e) => {
                warn!("Ignoring store node with invalid identity: {e}");
                None
            }
        }
    }
}

pub struct ProfileRecordRepository;

impl ProfileRecordRepository {
    /// Insert or overwrite the node for `record.identity`.
    ///
    /// A `None` profile path keeps whatever path the node already holds.
    pub async fn upsert<'e, E>(executor: E, record: &ProfileRecord) -> DbErrorResult<()>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let updated_at = Utc::now().timestamp();

        sqlx::query(
            r#"
              INSERT INTO profile_records (identity, username, last_logon, profile_path, updated_at)
              VALUES (?, ?, ?, ?, ?)
              ON CONFLICT(identity) DO UPDATE SET
                  username = excluded.username,
                  last_logon = excluded.last_logon,
                  profile_path = COALESCE(excluded.profile_path, profile_records.profile_path),
                  updated_at = excluded.updated_at
              "#,
        )
        .bind(record.identity.as_str())
        .bind(&record.username)
        .bind(record.last_logon.as_deref())
        .bind(record.profile_path.as_deref())
        .bind(updated_at)
        .execute(executor)
        .await?;

        Ok(())
    }

    pub async fn find_by_identity<'e, E>(
        executor: E,
        identity: &Sid,
    ) -> DbErrorResult<Option<ProfileRecord>>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let row = sqlx::query_as::<_, ProfileRecordRow>(
            r#"
              SELECT identity, username, last_logon, profile_path
              FROM profile_records
              WHERE identity = ?
              "#,
        )
        .bind(identity.as_str())
        .fetch_optional(executor)
        .await?;

        Ok(row.and_then(ProfileRecordRow::into_record))
    }

    /// Every node in the store, ordered by identity.
    pub async fn list<'e, E>(executor: E) -> DbErrorResult<Vec<ProfileRecord>>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let rows = sqlx::query_as::<_, ProfileRecordRow>(
            r#"
              SELECT identity, username, last_logon, profile_path
              FROM profile_records
              ORDER BY identity
              "#,
        )
        .fetch_all(executor)
        .await?;

        Ok(rows
            .into_iter()
            .filter_map(ProfileRecordRow::into_record)
            .collect())
    }

    /// Nodes whose identity starts with any of `prefixes`.
    pub async fn list_matching<'e, E, S>(
        executor: E,
        prefixes: &[S],
    ) -> DbErrorResult<Vec<ProfileRecord>>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
        S: AsRef<str>,
    {
        Ok(Self::list(executor)
            .await?
            .into_iter()
            .filter(|record| record.identity.matches_any_prefix(prefixes))
            .collect())
    }

    pub async fn count_matching<'e, E, S>(executor: E, prefixes: &[S]) -> DbErrorResult<usize>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
        S: AsRef<str>,
    {
        Ok(Self::list_matching(executor, prefixes).await?.len())
    }

    /// Returns `false` when there was no node to delete.
    pub async fn delete<'e, E>(executor: E, identity: &Sid) -> DbErrorResult<bool>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let result = sqlx::query("DELETE FROM profile_records WHERE identity = ?")
            .bind(identity.as_str())
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
