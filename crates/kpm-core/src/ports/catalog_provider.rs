//! Catalog provider port.
//!
//! A catalog provider answers "which plugins exist for this host release, and
//! at which coordinates". Implementations may fetch over the network and keep
//! their own cache; `force_refresh` asks them to bypass it.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::PluginCatalog;

/// Errors that can occur while producing a catalog.
///
/// A failing provider must return one of these rather than an empty catalog,
/// so callers can tell "no data" apart from "source failed".
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// The host version cannot be mapped to a catalog version line.
    #[error("Invalid host version: {0}")]
    InvalidHostVersion(String),

    /// The catalog could not be fetched.
    #[error("Catalog unavailable: {0}")]
    Unavailable(String),

    /// The catalog was fetched but could not be parsed.
    #[error("Malformed catalog: {0}")]
    Malformed(String),

    /// Provider misconfiguration (bad URL, etc.).
    #[error("Catalog configuration error: {0}")]
    Configuration(String),
}

/// Port for fetching the plugin catalog of a host release.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Produce the catalog for `host_version`.
    ///
    /// With `force_refresh` set, any cached copy must be ignored and replaced.
    async fn get_catalog(
        &self,
        host_version: &str,
        force_refresh: bool,
    ) -> Result<PluginCatalog, CatalogError>;
}
