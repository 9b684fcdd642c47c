use crate::{Result as DbErrorResult, VERSION_KEY};

pub struct StoreMetaRepository;

impl StoreMetaRepository {
    pub async fn get<'e, E>(executor: E, key: &str) -> DbErrorResult<Option<String>>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let value = sqlx::query_scalar::<_, String>("SELECT value FROM store_meta WHERE key = ?")
            .bind(key)
            .fetch_optional(executor)
            .await?;

        Ok(value)
    }

    pub async fn set<'e, E>(executor: E, key: &str, value: &str) -> DbErrorResult<()>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        sqlx::query(
            r#"
              INSERT INTO store_meta (key, value) VALUES (?, ?)
              ON CONFLICT(key) DO UPDATE SET value = excluded.value
              "#,
        )
        .bind(key)
        .bind(value)
        .execute(executor)
        .await?;

        Ok(())
    }

    /// Version marker written by the installer.
    pub async fn version<'e, E>(executor: E) -> DbErrorResult<Option<String>>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        Self::get(executor, VERSION_KEY).await
    }

    pub async fn set_version<'e, E>(executor: E, version: &str) -> DbErrorResult<()>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        Self::set(executor, VERSION_KEY, version).await
    }
}
