//! Per-version-line catalog cache.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use tokio::time::Instant;

use kpm_core::PluginCatalog;

#[derive(Debug, Clone)]
struct CachedCatalog {
    catalog: PluginCatalog,
    fetched_at: Instant,
    generation: u64,
}

/// Catalogs keyed by version line, each stamped with its fetch time and a
/// generation that increases on every store.
#[derive(Debug)]
pub struct CatalogCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, CachedCatalog>>,
}

impl CatalogCache {
    /// Create a cache whose entries stay fresh for `ttl`. A zero TTL means
    /// nothing is ever fresh.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Catalog for `version_line` if it is younger than the TTL.
    pub fn get_fresh(&self, version_line: &str) -> Option<PluginCatalog> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries
            .get(version_line)
            .filter(|cached| cached.fetched_at.elapsed() < self.ttl)
            .map(|cached| cached.catalog.clone())
    }

    /// Catalog for `version_line` if it was stored after `generation`.
    pub fn get_newer_than(&self, version_line: &str, generation: u64) -> Option<PluginCatalog> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries
            .get(version_line)
            .filter(|cached| cached.generation > generation)
            .map(|cached| cached.catalog.clone())
    }

    /// Current generation for `version_line` (0 if never stored).
    pub fn generation(&self, version_line: &str) -> u64 {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.get(version_line).map_or(0, |cached| cached.generation)
    }

    /// Store a catalog, replacing any previous one for its version line.
    pub fn store(&self, catalog: PluginCatalog) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let generation = entries
            .get(&catalog.version_line)
            .map_or(1, |cached| cached.generation + 1);
        entries.insert(
            catalog.version_line.clone(),
            CachedCatalog {
                catalog,
                fetched_at: Instant::now(),
                generation,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_entries_expire_after_ttl() {
        let cache = CatalogCache::new(Duration::from_secs(60));
        cache.store(PluginCatalog::new("0.22", vec![]));

        assert!(cache.get_fresh("0.22").is_some());
        assert!(cache.get_fresh("0.24").is_none());

        tokio::time::advance(Duration::from_secs(61)).await;
        assert!(cache.get_fresh("0.22").is_none());
    }

    #[test]
    fn test_zero_ttl_is_never_fresh() {
        let cache = CatalogCache::new(Duration::ZERO);
        cache.store(PluginCatalog::new("0.22", vec![]));
        assert!(cache.get_fresh("0.22").is_none());
    }

    #[test]
    fn test_generation_increases_per_line() {
        let cache = CatalogCache::new(Duration::from_secs(60));
        assert_eq!(cache.generation("0.22"), 0);

        cache.store(PluginCatalog::new("0.22", vec![]));
        cache.store(PluginCatalog::new("0.22", vec![]));
        cache.store(PluginCatalog::new("0.24", vec![]));

        assert_eq!(cache.generation("0.22"), 2);
        assert_eq!(cache.generation("0.24"), 1);
        assert!(cache.get_newer_than("0.22", 1).is_some());
        assert!(cache.get_newer_than("0.22", 2).is_none());
    }
}
