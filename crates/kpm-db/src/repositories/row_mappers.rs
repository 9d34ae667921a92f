//! Row mapping helpers for `SQLite` queries.

use kpm_core::{PluginIdentifier, RepositoryError};

/// Shared SELECT column list for identifier queries.
pub const IDENTIFIER_SELECT_COLUMNS: &str =
    "plugin_key, plugin_name, group_id, artifact_id, packaging, classifier, version, language";

/// One row of `plugin_identifiers`.
#[derive(sqlx::FromRow)]
pub struct IdentifierRow {
    plugin_key: String,
    plugin_name: Option<String>,
    group_id: Option<String>,
    artifact_id: Option<String>,
    packaging: Option<String>,
    classifier: Option<String>,
    version: Option<String>,
    language: Option<String>,
}

impl From<IdentifierRow> for PluginIdentifier {
    fn from(row: IdentifierRow) -> Self {
        Self {
            plugin_key: row.plugin_key,
            plugin_name: row.plugin_name,
            group_id: row.group_id,
            artifact_id: row.artifact_id,
            packaging: row.packaging,
            classifier: row.classifier,
            version: row.version,
            language: row.language,
        }
    }
}

/// Current time in the format stored in `updated_at` columns.
pub fn now_timestamp() -> String {
    chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Map `SQLx` errors to `RepositoryError`.
pub fn map_sqlx_error(e: sqlx::Error) -> RepositoryError {
    let msg = e.to_string();
    if msg.contains("UNIQUE constraint failed") || msg.contains("NOT NULL constraint failed") {
        return RepositoryError::Constraint(msg);
    }
    RepositoryError::Storage(msg)
}
