//! Plugin directory client.
//!
//! Fetches `plugins_directory.yml`, reduces it to the catalog of one host
//! version line and caches the result per line.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use url::Url;

use kpm_core::{HostVersion, PluginCatalog};

use crate::cache::CatalogCache;
use crate::config::DirectoryClientConfig;
use crate::error::DirectoryResult;
use crate::http::{HttpBackend, ReqwestBackend};
use crate::parsing::{catalog_for, parse_directory};

// ============================================================================
// Type Aliases
// ============================================================================

/// Directory client using the reqwest backend.
pub type DefaultDirectoryClient = DirectoryClient<ReqwestBackend>;

// ============================================================================
// Client
// ============================================================================

/// Client for the Kill Bill plugin directory.
///
/// Generic over the transport so it can be tested offline. Use
/// [`DefaultDirectoryClient`] in production and talk to it through
/// [`kpm_core::CatalogProvider`].
pub struct DirectoryClient<B: HttpBackend> {
    pub(crate) backend: B,
    pub(crate) config: DirectoryClientConfig,
    cache: CatalogCache,
    // One lock per version line; refreshes of the same line run one at a time.
    refresh_locks: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl DefaultDirectoryClient {
    /// Create a new client with the given configuration.
    pub fn new(config: &DirectoryClientConfig) -> Result<Self, kpm_core::CatalogError> {
        let backend = ReqwestBackend::new(config).map_err(crate::port::map_error)?;
        Ok(Self::with_backend(config.clone(), backend))
    }
}

impl<B: HttpBackend> DirectoryClient<B> {
    /// Create a client over a custom backend.
    pub(crate) fn with_backend(config: DirectoryClientConfig, backend: B) -> Self {
        Self {
            cache: CatalogCache::new(config.cache_ttl),
            backend,
            config,
            refresh_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Catalog for `host_version`, from cache unless stale or forced.
    pub(crate) async fn catalog(
        &self,
        host_version: &str,
        force_refresh: bool,
    ) -> DirectoryResult<PluginCatalog> {
        let host = HostVersion::parse(host_version)?;
        let line = host.version_line();

        if !force_refresh {
            if let Some(catalog) = self.cache.get_fresh(&line) {
                tracing::debug!(version_line = %line, "Catalog cache hit");
                return Ok(catalog);
            }
        }

        let seen = self.cache.generation(&line);
        let lock = self.refresh_lock(&line);
        let _guard = lock.lock().await;

        // Someone else refreshed this line while we waited
        if let Some(catalog) = self.cache.get_newer_than(&line, seen) {
            tracing::debug!(version_line = %line, "Using catalog refreshed by concurrent caller");
            return Ok(catalog);
        }

        let plugins = self.fetch_plugins().await?;
        let catalog = catalog_for(&plugins, &host);
        tracing::info!(
            version_line = %line,
            entries = catalog.len(),
            force_refresh,
            "Fetched plugin catalog"
        );
        self.cache.store(catalog.clone());
        Ok(catalog)
    }

    async fn fetch_plugins(&self) -> DirectoryResult<Vec<crate::parsing::DirectoryPlugin>> {
        let url = Url::parse(&self.config.catalog_url)?;
        tracing::debug!(%url, "Fetching plugin directory");
        let body = self.backend.get_text(&url).await?;
        parse_directory(&body)
    }

    fn refresh_lock(&self, version_line: &str) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self
            .refresh_locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        Arc::clone(locks.entry(version_line.to_string()).or_default())
    }
}
