//! `SQLite` implementation of the `IdentifierStore` trait.

use async_trait::async_trait;
use sqlx::SqlitePool;

use kpm_core::{IdentifierStore, PluginIdentifier, RepositoryError};

use super::row_mappers::{
    IDENTIFIER_SELECT_COLUMNS, IdentifierRow, map_sqlx_error, now_timestamp,
};

/// Identifier ledger stored in the `plugin_identifiers` table.
pub struct SqliteIdentifierRepository {
    pool: SqlitePool,
}

impl SqliteIdentifierRepository {
    /// Create a new `SQLite` identifier repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IdentifierStore for SqliteIdentifierRepository {
    async fn list_identifiers(&self) -> Result<Vec<PluginIdentifier>, RepositoryError> {
        let query =
            format!("SELECT {IDENTIFIER_SELECT_COLUMNS} FROM plugin_identifiers ORDER BY plugin_key");
        let rows = sqlx::query_as::<_, IdentifierRow>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(PluginIdentifier::from).collect())
    }

    async fn get(&self, plugin_key: &str) -> Result<PluginIdentifier, RepositoryError> {
        let query =
            format!("SELECT {IDENTIFIER_SELECT_COLUMNS} FROM plugin_identifiers WHERE plugin_key = ?");
        sqlx::query_as::<_, IdentifierRow>(&query)
            .bind(plugin_key)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?
            .map(PluginIdentifier::from)
            .ok_or_else(|| RepositoryError::NotFound(format!("plugin '{plugin_key}'")))
    }

    async fn upsert(&self, record: &PluginIdentifier) -> Result<(), RepositoryError> {
        if record.plugin_key.trim().is_empty() {
            return Err(RepositoryError::Constraint(
                "plugin key must not be empty".to_string(),
            ));
        }

        sqlx::query(
            r#"
            INSERT INTO plugin_identifiers
                (plugin_key, plugin_name, group_id, artifact_id, packaging, classifier, version, language, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(plugin_key) DO UPDATE SET
                plugin_name = excluded.plugin_name,
                group_id = excluded.group_id,
                artifact_id = excluded.artifact_id,
                packaging = excluded.packaging,
                classifier = excluded.classifier,
                version = excluded.version,
                language = excluded.language,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(&record.plugin_key)
        .bind(&record.plugin_name)
        .bind(&record.group_id)
        .bind(&record.artifact_id)
        .bind(&record.packaging)
        .bind(&record.classifier)
        .bind(&record.version)
        .bind(&record.language)
        .bind(now_timestamp())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        tracing::debug!(plugin_key = %record.plugin_key, "Stored plugin identifier");
        Ok(())
    }

    async fn remove(&self, plugin_key: &str) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM plugin_identifiers WHERE plugin_key = ?")
            .bind(plugin_key)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("plugin '{plugin_key}'")));
        }
        tracing::debug!(plugin_key, "Removed plugin identifier");
        Ok(())
    }
}
