//! Resolution request and report types.

use serde::Serialize;

use super::tiers::Tier;
use crate::domain::Coordinate;

/// Everything the caller knows about the plugin to resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveRequest {
    /// Host-platform release the catalog is queried for.
    pub host_version: String,
    /// Symbolic plugin key.
    pub plugin_key: String,
    /// Artifact id the caller already knows, if any.
    pub artifact_id: Option<String>,
    /// Version the caller already knows, if any.
    pub version: Option<String>,
    /// Bypass the identifier store and any catalog cache.
    pub force_refresh: bool,
}

impl ResolveRequest {
    /// Create a request with no known coordinate fields.
    ///
    /// Surrounding whitespace is trimmed from both arguments so the key
    /// matches ledger and catalog entries exactly.
    pub fn new(host_version: impl Into<String>, plugin_key: impl Into<String>) -> Self {
        Self {
            host_version: trimmed(host_version.into()),
            plugin_key: trimmed(plugin_key.into()),
            artifact_id: None,
            version: None,
            force_refresh: false,
        }
    }

    /// Set the known artifact id.
    #[must_use]
    pub fn with_artifact_id(mut self, artifact_id: impl Into<String>) -> Self {
        self.artifact_id = Some(artifact_id.into());
        self
    }

    /// Set the known version.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Set optional known fields as given.
    #[must_use]
    pub fn with_known(mut self, artifact_id: Option<String>, version: Option<String>) -> Self {
        self.artifact_id = artifact_id;
        self.version = version;
        self
    }

    /// Set whether to force a refresh.
    #[must_use]
    pub const fn with_force_refresh(mut self, force_refresh: bool) -> Self {
        self.force_refresh = force_refresh;
        self
    }

    /// The caller-known fields as a coordinate.
    pub fn known_coordinate(&self) -> Coordinate {
        Coordinate::from_parts(self.artifact_id.clone(), self.version.clone())
    }
}

fn trimmed(value: String) -> String {
    if value.trim().len() == value.len() {
        value
    } else {
        value.trim().to_string()
    }
}

/// A source failure that was tolerated during resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceFailure {
    /// Tier whose source failed.
    pub tier: Tier,
    /// Rendered error.
    pub message: String,
}

/// Outcome of a resolution, with provenance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolutionReport {
    /// The complete coordinate, or `None` if unresolved.
    pub coordinate: Option<Coordinate>,
    /// Tier after which the coordinate became complete.
    pub decided_by: Option<Tier>,
    /// Tiers that filled at least one field, in order.
    pub contributors: Vec<Tier>,
    /// Sources that failed but did not abort resolution.
    pub degraded: Vec<SourceFailure>,
}

impl ResolutionReport {
    /// Whether a complete coordinate was found.
    pub const fn is_resolved(&self) -> bool {
        self.coordinate.is_some()
    }

    /// Whether any source failed along the way.
    pub fn is_degraded(&self) -> bool {
        !self.degraded.is_empty()
    }
}
