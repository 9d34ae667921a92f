//! Identifier records persisted by the identifier store.

use serde::{Deserialize, Serialize};

use super::coordinate::Coordinate;

/// A previously resolved plugin, as recorded in the identifier ledger.
///
/// Mirrors the fields of the Kill Bill `plugin_identifiers.json` ledger. Only
/// `artifact_id` and `version` take part in resolution; the rest is carried
/// so the ledger round-trips without loss.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginIdentifier {
    /// Stable symbolic key of the plugin (e.g. `"stripe"`).
    #[serde(skip)]
    pub plugin_key: String,
    /// Installed plugin name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugin_name: Option<String>,
    /// Maven group id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    /// Maven artifact id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifact_id: Option<String>,
    /// Artifact packaging (`jar`, `tar.gz`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub packaging: Option<String>,
    /// Maven classifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classifier: Option<String>,
    /// Resolved plugin version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Plugin language (`java`, `ruby`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl PluginIdentifier {
    /// Create a record with only the resolution-relevant fields.
    pub fn new(
        plugin_key: impl Into<String>,
        artifact_id: Option<String>,
        version: Option<String>,
    ) -> Self {
        Self {
            plugin_key: plugin_key.into(),
            artifact_id,
            version,
            ..Self::default()
        }
    }

    /// Create a record from a resolved coordinate.
    pub fn from_coordinate(plugin_key: impl Into<String>, coordinate: &Coordinate) -> Self {
        Self::new(
            plugin_key,
            coordinate.artifact_id().map(String::from),
            coordinate.version().map(String::from),
        )
    }

    /// Set the group id.
    #[must_use]
    pub fn with_group_id(mut self, group_id: impl Into<String>) -> Self {
        self.group_id = Some(group_id.into());
        self
    }

    /// Set the packaging.
    #[must_use]
    pub fn with_packaging(mut self, packaging: impl Into<String>) -> Self {
        self.packaging = Some(packaging.into());
        self
    }

    /// Set the language.
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Project the record onto the `(artifact_id, version)` coordinate.
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::from_parts(self.artifact_id.clone(), self.version.clone())
    }

    /// Whether the record carries any usable coordinate field.
    pub fn has_identifier(&self) -> bool {
        !self.coordinate().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_projection() {
        let record = PluginIdentifier::new("stripe", None, Some("4.0.1".into()))
            .with_group_id("org.kill-bill.billing.plugin.java");
        let c = record.coordinate();
        assert_eq!(c.artifact_id(), None);
        assert_eq!(c.version(), Some("4.0.1"));
        assert!(record.has_identifier());
    }

    #[test]
    fn test_empty_record_has_no_identifier() {
        let record = PluginIdentifier::new("ghost", Some(String::new()), None);
        assert!(!record.has_identifier());
    }

    #[test]
    fn test_plugin_key_is_not_serialized() {
        let record = PluginIdentifier::new("adyen", Some("adyen-plugin".into()), None)
            .with_language("java");
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("plugin_key").is_none());
        assert_eq!(json["artifact_id"], "adyen-plugin");
        assert_eq!(json["language"], "java");
    }
}
