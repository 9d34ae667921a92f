//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No `sqlx`, `reqwest` or YAML types in any signature
//! - Failures are typed errors, never empty results
//! - Traits are minimal; the resolver only needs the read side

pub mod catalog_provider;
pub mod identifier_store;
pub mod settings_repository;

use std::sync::Arc;

use thiserror::Error;

pub use catalog_provider::{CatalogError, CatalogProvider};
pub use identifier_store::IdentifierStore;
pub use settings_repository::SettingsRepository;

#[cfg(test)]
pub use catalog_provider::MockCatalogProvider;
#[cfg(test)]
pub use identifier_store::MockIdentifierStore;

/// Container for all repository trait objects.
///
/// Lets adapters wire storage without depending on concrete
/// implementations; `kpm-db` builds one, the CLI consumes it.
#[derive(Clone)]
pub struct Repos {
    /// Identifier ledger.
    pub identifiers: Arc<dyn IdentifierStore>,
    /// Application settings.
    pub settings: Arc<dyn SettingsRepository>,
}

impl Repos {
    /// Create a new Repos container.
    pub fn new(
        identifiers: Arc<dyn IdentifierStore>,
        settings: Arc<dyn SettingsRepository>,
    ) -> Self {
        Self {
            identifiers,
            settings,
        }
    }
}

/// Domain-specific errors for repository operations.
///
/// Abstracts away storage implementation details (sqlx errors, file I/O).
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The requested entity was not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Storage backend error (database, filesystem, etc.).
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A constraint was violated (e.g. empty key).
    #[error("Constraint violation: {0}")]
    Constraint(String),
}

/// Core error type for semantic domain errors.
///
/// Adapters map this to their own error types (CLI exit codes).
#[derive(Debug, Error)]
pub enum CoreError {
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Catalog operation failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Resolution failed.
    #[error(transparent)]
    Resolve(#[from] crate::services::ResolveError),

    /// Settings validation error.
    #[error(transparent)]
    Settings(#[from] crate::settings::SettingsError),

    /// Path resolution error.
    #[error(transparent)]
    Path(#[from] crate::paths::PathError),

    /// Validation error (invalid input).
    #[error("Validation error: {0}")]
    Validation(String),
}
