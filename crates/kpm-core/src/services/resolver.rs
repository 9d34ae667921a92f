//! Artifact resolver - the cascading lookup of a plugin's coordinate.
//!
//! Trust order, highest first:
//!
//! 1. what the caller already knows
//! 2. the identifier ledger (skipped on forced refresh)
//! 3. the host-version catalog
//! 4. the naming convention (artifact id only, and only once a version is known)
//!
//! The working coordinate is returned as soon as it is complete. Anything
//! short of complete is reported as unresolved, never as a partial result.

use std::sync::Arc;

use thiserror::Error;

use super::request::{ResolutionReport, ResolveRequest, SourceFailure};
use super::tiers::{
    CallerInputTier, CatalogTier, IdentifierStoreTier, NamingHeuristicTier, ResolutionTier,
    SourceError, Tier,
};
use crate::domain::Coordinate;
use crate::naming::{ConventionalNaming, NamingHeuristic};
use crate::ports::{CatalogProvider, IdentifierStore};

/// Errors that abort a resolution.
///
/// "Not found" is not an error; it is `Ok(None)`.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The request violated the resolver's contract.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A source that had no fallback failed.
    #[error("{tier} lookup failed: {source}")]
    SourceFailed {
        /// Tier whose source failed.
        tier: Tier,
        /// Underlying failure.
        #[source]
        source: SourceError,
    },
}

/// Resolves plugin keys to complete artifact coordinates.
///
/// Stateless apart from its tiers; calls are independent and may run
/// concurrently.
pub struct ArtifactResolver {
    tiers: Vec<Box<dyn ResolutionTier>>,
}

impl ArtifactResolver {
    /// Create a resolver with the standard tiers and the conventional naming
    /// heuristic.
    pub fn new(store: Arc<dyn IdentifierStore>, catalog: Arc<dyn CatalogProvider>) -> Self {
        Self::with_naming(store, catalog, Arc::new(ConventionalNaming))
    }

    /// Create a resolver with the standard tiers and a custom heuristic.
    pub fn with_naming(
        store: Arc<dyn IdentifierStore>,
        catalog: Arc<dyn CatalogProvider>,
        naming: Arc<dyn NamingHeuristic>,
    ) -> Self {
        Self::from_tiers(vec![
            Box::new(CallerInputTier),
            Box::new(IdentifierStoreTier::new(store)),
            Box::new(CatalogTier::new(catalog)),
            Box::new(NamingHeuristicTier::new(naming)),
        ])
    }

    /// Create a resolver from an explicit tier list, run in the given order.
    pub fn from_tiers(tiers: Vec<Box<dyn ResolutionTier>>) -> Self {
        Self { tiers }
    }

    /// Resolve a plugin key to a complete coordinate.
    ///
    /// Returns `Ok(None)` if no tier combination produced both fields.
    pub async fn resolve(
        &self,
        host_version: &str,
        plugin_key: &str,
        known_artifact_id: Option<&str>,
        known_version: Option<&str>,
        force_refresh: bool,
    ) -> Result<Option<Coordinate>, ResolveError> {
        let request = ResolveRequest::new(host_version, plugin_key)
            .with_known(
                known_artifact_id.map(String::from),
                known_version.map(String::from),
            )
            .with_force_refresh(force_refresh);
        self.resolve_request(&request).await
    }

    /// Resolve a prepared request.
    pub async fn resolve_request(
        &self,
        request: &ResolveRequest,
    ) -> Result<Option<Coordinate>, ResolveError> {
        Ok(self.resolve_with_report(request).await?.coordinate)
    }

    /// Resolve a prepared request and report how the answer was reached.
    pub async fn resolve_with_report(
        &self,
        request: &ResolveRequest,
    ) -> Result<ResolutionReport, ResolveError> {
        validate(request)?;

        tracing::info!(
            host_version = %request.host_version,
            plugin_key = %request.plugin_key,
            artifact_id = request.artifact_id.as_deref().unwrap_or(""),
            version = request.version.as_deref().unwrap_or(""),
            force_refresh = request.force_refresh,
            "Resolving plugin artifact"
        );

        let mut working = Coordinate::empty();
        let mut report = ResolutionReport::default();

        for tier in &self.tiers {
            let id = tier.tier();
            if !tier.applies(request, &working) {
                tracing::debug!(plugin_key = %request.plugin_key, tier = %id, "Tier skipped");
                continue;
            }

            tracing::debug!(
                plugin_key = %request.plugin_key,
                tier = %id,
                working = %working,
                "Entering tier"
            );

            match tier.contribute(request, &mut working).await {
                Ok(true) => report.contributors.push(id),
                Ok(false) => {}
                Err(source) if tier.is_required(request) => {
                    tracing::error!(
                        plugin_key = %request.plugin_key,
                        host_version = %request.host_version,
                        tier = %id,
                        error = %source,
                        "Required source failed, aborting resolution"
                    );
                    return Err(ResolveError::SourceFailed { tier: id, source });
                }
                Err(source) => {
                    tracing::warn!(
                        plugin_key = %request.plugin_key,
                        host_version = %request.host_version,
                        tier = %id,
                        error = %source,
                        "Source failed, continuing with next tier"
                    );
                    report.degraded.push(SourceFailure {
                        tier: id,
                        message: source.to_string(),
                    });
                }
            }

            if working.is_complete() {
                tracing::info!(
                    plugin_key = %request.plugin_key,
                    tier = %id,
                    coordinate = %working,
                    "Plugin artifact resolved"
                );
                report.decided_by = Some(id);
                report.coordinate = Some(working);
                return Ok(report);
            }
        }

        tracing::info!(
            plugin_key = %request.plugin_key,
            host_version = %request.host_version,
            partial = %working,
            "No source could resolve plugin artifact"
        );
        Ok(report)
    }
}

/// Reject requests that violate the resolver contract.
fn validate(request: &ResolveRequest) -> Result<(), ResolveError> {
    if request.plugin_key.trim().is_empty() {
        return Err(ResolveError::InvalidArgument(
            "plugin key must not be empty".to_string(),
        ));
    }
    if request.host_version.trim().is_empty() {
        return Err(ResolveError::InvalidArgument(
            "host version must not be empty".to_string(),
        ));
    }
    // Lookups compare keys exactly
    if request.plugin_key.trim() != request.plugin_key {
        return Err(ResolveError::InvalidArgument(format!(
            "plugin key '{}' has surrounding whitespace",
            request.plugin_key
        )));
    }
    Ok(())
}
