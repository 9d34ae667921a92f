//! Catalog snapshots produced by a catalog provider.

use serde::{Deserialize, Serialize};

use super::coordinate::Coordinate;

/// One plugin known to the catalog for a given host version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Stable symbolic key of the plugin.
    pub plugin_key: String,
    /// Maven group id, when the catalog names one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    /// Coordinate for the requested host version. Either field may be unset:
    /// a catalog may know a version but not the artifact id, or the reverse.
    pub coordinate: Coordinate,
}

impl CatalogEntry {
    /// Create a new catalog entry.
    pub fn new(plugin_key: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            plugin_key: plugin_key.into(),
            group_id: None,
            coordinate,
        }
    }

    /// Set the group id.
    #[must_use]
    pub fn with_group_id(mut self, group_id: impl Into<String>) -> Self {
        self.group_id = Some(group_id.into());
        self
    }
}

/// A point-in-time catalog for one host version.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginCatalog {
    /// The version line the catalog was built for (e.g. `"0.24"`).
    pub version_line: String,
    /// Entries in source order.
    pub entries: Vec<CatalogEntry>,
}

impl PluginCatalog {
    /// Create a catalog from its entries.
    pub fn new(version_line: impl Into<String>, entries: Vec<CatalogEntry>) -> Self {
        Self {
            version_line: version_line.into(),
            entries,
        }
    }

    /// First entry for `plugin_key`, if any.
    pub fn find(&self, plugin_key: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.plugin_key == plugin_key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
