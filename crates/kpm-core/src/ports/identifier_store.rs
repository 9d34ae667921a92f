//! Identifier store port.
//!
//! The identifier store is the local ledger of plugins that were resolved (and
//! usually installed) before. The resolver only ever reads it through
//! [`IdentifierStore::list_identifiers`]; writes are the caller's business.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::PluginIdentifier;

/// Persistence for plugin identifier records, one per plugin key.
///
/// # Design Rules
///
/// - No storage types (`sqlx`, file handles) in signatures
/// - `list_identifiers` returns a finite snapshot with no ordering guarantee
/// - `upsert` replaces the whole record for its key
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentifierStore: Send + Sync {
    /// List every record in the store.
    async fn list_identifiers(&self) -> Result<Vec<PluginIdentifier>, RepositoryError>;

    /// Get the record for `plugin_key`.
    ///
    /// Returns `RepositoryError::NotFound` if there is none.
    async fn get(&self, plugin_key: &str) -> Result<PluginIdentifier, RepositoryError>;

    /// Insert or replace the record for `record.plugin_key`.
    async fn upsert(&self, record: &PluginIdentifier) -> Result<(), RepositoryError>;

    /// Remove the record for `plugin_key`.
    ///
    /// Returns `RepositoryError::NotFound` if there is none.
    async fn remove(&self, plugin_key: &str) -> Result<(), RepositoryError>;
}
