//! Composition utilities for building [`Repos`] with local storage backends.
//!
//! Construction only; no domain logic.

use std::path::Path;
use std::sync::Arc;

use sqlx::SqlitePool;

use kpm_core::{IdentifierBackend, IdentifierStore, Repos};

use crate::repositories::{
    JsonIdentifierFile, SqliteIdentifierRepository, SqliteSettingsRepository,
};

/// Factory for repository instances.
pub struct CoreFactory;

impl CoreFactory {
    /// Create a `SQLite` connection pool.
    ///
    /// * `db_url` - `SQLite` connection URL (e.g., "sqlite:/var/lib/kpm/kpm.db")
    pub async fn create_pool(db_url: &str) -> anyhow::Result<SqlitePool> {
        let pool = SqlitePool::connect(db_url).await?;
        Ok(pool)
    }

    /// Build all repositories.
    ///
    /// Settings always live in the database; identifiers go wherever
    /// `backend` says. `identifiers_file` is only read for the JSON backend.
    pub fn build_repos(
        pool: SqlitePool,
        backend: IdentifierBackend,
        identifiers_file: &Path,
    ) -> Repos {
        Repos::new(
            Self::identifier_store(pool.clone(), backend, identifiers_file),
            Arc::new(SqliteSettingsRepository::new(pool)),
        )
    }

    /// Create the identifier store for `backend`.
    pub fn identifier_store(
        pool: SqlitePool,
        backend: IdentifierBackend,
        identifiers_file: &Path,
    ) -> Arc<dyn IdentifierStore> {
        tracing::debug!(%backend, "Selecting identifier store");
        match backend {
            IdentifierBackend::Sqlite => Arc::new(SqliteIdentifierRepository::new(pool)),
            IdentifierBackend::Json => Arc::new(JsonIdentifierFile::new(identifiers_file)),
        }
    }

    /// Create a settings repository from a pool.
    pub fn settings_repository(pool: SqlitePool) -> Arc<SqliteSettingsRepository> {
        Arc::new(SqliteSettingsRepository::new(pool))
    }
}

/// In-memory database with the production schema applied.
#[cfg(any(test, feature = "test-utils"))]
pub struct TestDb {
    pool: SqlitePool,
}

#[cfg(any(test, feature = "test-utils"))]
impl TestDb {
    /// Create a new in-memory test database.
    pub async fn new() -> anyhow::Result<Self> {
        let pool = crate::setup::setup_test_database().await?;
        Ok(Self { pool })
    }

    /// Get the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create an identifier repository using this test database.
    pub fn identifier_repository(&self) -> SqliteIdentifierRepository {
        SqliteIdentifierRepository::new(self.pool.clone())
    }

    /// Create a settings repository using this test database.
    pub fn settings_repository(&self) -> SqliteSettingsRepository {
        SqliteSettingsRepository::new(self.pool.clone())
    }
}
