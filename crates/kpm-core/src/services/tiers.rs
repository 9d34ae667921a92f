//! Resolution tiers.
//!
//! Each tier is one source of coordinate information. The resolver runs them
//! in trust order; a tier only ever fills fields that are still unset, so an
//! earlier tier's answer can never be overridden by a later one.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use super::request::ResolveRequest;
use crate::domain::Coordinate;
use crate::naming::NamingHeuristic;
use crate::ports::{CatalogError, CatalogProvider, IdentifierStore, RepositoryError};

/// Identifies a resolution tier, in trust order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Values the caller already knew.
    CallerInput,
    /// The local identifier ledger.
    IdentifierStore,
    /// The host-version catalog.
    Catalog,
    /// The `<name>-plugin` naming convention.
    NamingHeuristic,
}

impl Tier {
    /// Short machine-friendly name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CallerInput => "caller_input",
            Self::IdentifierStore => "identifier_store",
            Self::Catalog => "catalog",
            Self::NamingHeuristic => "naming_heuristic",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure of the source behind a tier.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Identifier store failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Catalog provider failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// One step of the resolution cascade.
#[async_trait]
pub trait ResolutionTier: Send + Sync {
    /// Which tier this is.
    fn tier(&self) -> Tier;

    /// Whether the tier should run for this request and working coordinate.
    fn applies(&self, request: &ResolveRequest, working: &Coordinate) -> bool;

    /// Whether a source failure must abort resolution instead of being
    /// tolerated.
    fn is_required(&self, _request: &ResolveRequest) -> bool {
        false
    }

    /// Fill unset fields of `working`. Returns `true` if anything changed.
    async fn contribute(
        &self,
        request: &ResolveRequest,
        working: &mut Coordinate,
    ) -> Result<bool, SourceError>;
}

// ============================================================================
// Caller input
// ============================================================================

/// Seeds the coordinate with whatever the caller already knows.
#[derive(Debug, Default)]
pub struct CallerInputTier;

#[async_trait]
impl ResolutionTier for CallerInputTier {
    fn tier(&self) -> Tier {
        Tier::CallerInput
    }

    fn applies(&self, _request: &ResolveRequest, _working: &Coordinate) -> bool {
        true
    }

    async fn contribute(
        &self,
        request: &ResolveRequest,
        working: &mut Coordinate,
    ) -> Result<bool, SourceError> {
        Ok(working.fill_if_unset(&request.known_coordinate()))
    }
}

// ============================================================================
// Identifier store
// ============================================================================

/// Reads previously resolved coordinates from the identifier ledger.
///
/// Skipped entirely when the caller forces a refresh.
pub struct IdentifierStoreTier {
    store: Arc<dyn IdentifierStore>,
}

impl IdentifierStoreTier {
    /// Create a tier over the given store.
    pub fn new(store: Arc<dyn IdentifierStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ResolutionTier for IdentifierStoreTier {
    fn tier(&self) -> Tier {
        Tier::IdentifierStore
    }

    fn applies(&self, request: &ResolveRequest, _working: &Coordinate) -> bool {
        !request.force_refresh
    }

    async fn contribute(
        &self,
        request: &ResolveRequest,
        working: &mut Coordinate,
    ) -> Result<bool, SourceError> {
        let records = self.store.list_identifiers().await?;
        let found = records
            .iter()
            .find(|r| r.plugin_key == request.plugin_key && r.has_identifier());

        let Some(record) = found else {
            tracing::debug!(
                plugin_key = %request.plugin_key,
                scanned = records.len(),
                "No identifier record for plugin"
            );
            return Ok(false);
        };

        let coordinate = record.coordinate();
        tracing::debug!(
            plugin_key = %request.plugin_key,
            found = %coordinate,
            "Found identifier record"
        );
        Ok(working.fill_if_unset(&coordinate))
    }
}

// ============================================================================
// Catalog
// ============================================================================

/// Reads the host-version catalog.
///
/// Always runs once reached; under a forced refresh it is the only trusted
/// source, so its failure aborts resolution.
pub struct CatalogTier {
    provider: Arc<dyn CatalogProvider>,
}

impl CatalogTier {
    /// Create a tier over the given catalog provider.
    pub fn new(provider: Arc<dyn CatalogProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl ResolutionTier for CatalogTier {
    fn tier(&self) -> Tier {
        Tier::Catalog
    }

    fn applies(&self, _request: &ResolveRequest, _working: &Coordinate) -> bool {
        true
    }

    fn is_required(&self, request: &ResolveRequest) -> bool {
        request.force_refresh
    }

    async fn contribute(
        &self,
        request: &ResolveRequest,
        working: &mut Coordinate,
    ) -> Result<bool, SourceError> {
        let catalog = self
            .provider
            .get_catalog(&request.host_version, request.force_refresh)
            .await?;

        let Some(entry) = catalog.find(&request.plugin_key) else {
            tracing::debug!(
                plugin_key = %request.plugin_key,
                version_line = %catalog.version_line,
                entries = catalog.len(),
                "Plugin not in catalog"
            );
            return Ok(false);
        };

        tracing::debug!(
            plugin_key = %request.plugin_key,
            found = %entry.coordinate,
            "Found catalog entry"
        );
        // Fields are merged independently: a catalog may know only one of them
        let artifact = working.fill_artifact_id_if_unset(entry.coordinate.artifact_id());
        let version = working.fill_version_if_unset(entry.coordinate.version());
        Ok(artifact || version)
    }
}

// ============================================================================
// Naming heuristic
// ============================================================================

/// Guesses a missing artifact id from the plugin key.
///
/// Only runs when a version is known but the artifact id is not; it never
/// supplies a version.
pub struct NamingHeuristicTier {
    naming: Arc<dyn NamingHeuristic>,
}

impl NamingHeuristicTier {
    /// Create a tier over the given heuristic.
    pub fn new(naming: Arc<dyn NamingHeuristic>) -> Self {
        Self { naming }
    }
}

#[async_trait]
impl ResolutionTier for NamingHeuristicTier {
    fn tier(&self) -> Tier {
        Tier::NamingHeuristic
    }

    fn applies(&self, _request: &ResolveRequest, working: &Coordinate) -> bool {
        working.has_version() && !working.has_artifact_id()
    }

    async fn contribute(
        &self,
        request: &ResolveRequest,
        working: &mut Coordinate,
    ) -> Result<bool, SourceError> {
        let guess = self.naming.derive_artifact_id(&request.plugin_key);
        tracing::debug!(
            plugin_key = %request.plugin_key,
            artifact_id = %guess,
            "Derived artifact id from naming convention"
        );
        Ok(working.fill_artifact_id_if_unset(Some(&guess)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CatalogEntry, PluginCatalog, PluginIdentifier};
    use crate::naming::{ConventionalNaming, MockNamingHeuristic};
    use crate::ports::{MockCatalogProvider, MockIdentifierStore};

    fn request(key: &str) -> ResolveRequest {
        ResolveRequest::new("0.24.1", key)
    }

    #[tokio::test]
    async fn test_caller_input_seeds_partial_values() {
        let req = request("stripe").with_version("4.0.1");
        let mut working = Coordinate::empty();
        let changed = CallerInputTier.contribute(&req, &mut working).await.unwrap();
        assert!(changed);
        assert_eq!(working.version(), Some("4.0.1"));
        assert_eq!(working.artifact_id(), None);
    }

    #[tokio::test]
    async fn test_identifier_tier_skips_records_without_identifier() {
        let mut store = MockIdentifierStore::new();
        store.expect_list_identifiers().times(1).returning(|| {
            Ok(vec![
                PluginIdentifier::new("stripe", None, None),
                PluginIdentifier::new("stripe", Some("stripe-plugin".into()), Some("4.0.1".into())),
            ])
        });
        let tier = IdentifierStoreTier::new(Arc::new(store));

        let mut working = Coordinate::empty();
        assert!(tier.contribute(&request("stripe"), &mut working).await.unwrap());
        assert_eq!(working, Coordinate::new("stripe-plugin", "4.0.1"));
    }

    #[tokio::test]
    async fn test_identifier_tier_does_not_apply_under_force_refresh() {
        let tier = IdentifierStoreTier::new(Arc::new(MockIdentifierStore::new()));
        let forced = request("stripe").with_force_refresh(true);
        assert!(!tier.applies(&forced, &Coordinate::empty()));
        assert!(tier.applies(&request("stripe"), &Coordinate::empty()));
    }

    #[tokio::test]
    async fn test_catalog_tier_merges_fields_independently() {
        let mut provider = MockCatalogProvider::new();
        provider.expect_get_catalog().returning(|_, _| {
            Ok(PluginCatalog::new(
                "0.24",
                vec![CatalogEntry::new(
                    "adyen",
                    Coordinate::new("adyen-plugin", "1.2.0"),
                )],
            ))
        });
        let tier = CatalogTier::new(Arc::new(provider));

        let mut working = Coordinate::from_parts(None, Some("1.0.0".into()));
        assert!(tier.contribute(&request("adyen"), &mut working).await.unwrap());
        assert_eq!(working, Coordinate::new("adyen-plugin", "1.0.0"));
    }

    #[tokio::test]
    async fn test_catalog_tier_is_required_only_when_forced() {
        let tier = CatalogTier::new(Arc::new(MockCatalogProvider::new()));
        assert!(tier.is_required(&request("a").with_force_refresh(true)));
        assert!(!tier.is_required(&request("a")));
    }

    #[tokio::test]
    async fn test_catalog_tier_propagates_provider_error() {
        let mut provider = MockCatalogProvider::new();
        provider
            .expect_get_catalog()
            .returning(|_, _| Err(CatalogError::Unavailable("timeout".into())));
        let tier = CatalogTier::new(Arc::new(provider));

        let mut working = Coordinate::empty();
        let err = tier
            .contribute(&request("adyen"), &mut working)
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::Catalog(CatalogError::Unavailable(_))));
        assert!(working.is_empty());
    }

    #[test]
    fn test_naming_tier_applies_only_with_version_and_no_artifact() {
        let tier = NamingHeuristicTier::new(Arc::new(ConventionalNaming));
        let req = request("stripe");
        assert!(tier.applies(&req, &Coordinate::from_parts(None, Some("1".into()))));
        assert!(!tier.applies(&req, &Coordinate::empty()));
        assert!(!tier.applies(&req, &Coordinate::from_parts(Some("a".into()), None)));
        assert!(!tier.applies(&req, &Coordinate::new("a", "1")));
    }

    #[tokio::test]
    async fn test_naming_tier_fills_artifact_id() {
        let mut naming = MockNamingHeuristic::new();
        naming
            .expect_derive_artifact_id()
            .withf(|key| key == "stripe")
            .times(1)
            .returning(|_| "stripe-plugin".to_string());
        let tier = NamingHeuristicTier::new(Arc::new(naming));

        let mut working = Coordinate::from_parts(None, Some("4.0.1".into()));
        assert!(tier.contribute(&request("stripe"), &mut working).await.unwrap());
        assert_eq!(working, Coordinate::new("stripe-plugin", "4.0.1"));
    }

    #[test]
    fn test_tier_order_and_names() {
        assert!(Tier::CallerInput < Tier::IdentifierStore);
        assert!(Tier::IdentifierStore < Tier::Catalog);
        assert!(Tier::Catalog < Tier::NamingHeuristic);
        assert_eq!(Tier::Catalog.to_string(), "catalog");
    }
}
