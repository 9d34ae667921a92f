//! Parsing of `plugins_directory.yml`.
//!
//! The upstream document is written with Ruby symbols for keys:
//!
//! ```yaml
//! :analytics:
//!   :type: :java
//!   :artifact_id: analytics-plugin
//!   :versions:
//!     :0.20: 4.0.5
//!     :0.22: 7.0.8
//! :email-notifications:
//!   :type: :java
//!   :artifact_id: killbill-email-notifications-plugin
//!   :versions:
//!     :0.22: 0.6.1
//! ```
//!
//! Leading colons are stripped from keys and values, so plain YAML works just
//! as well. Scalars are read as written: an unquoted `0.20` stays `"0.20"`
//! rather than becoming the float `0.2`.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use serde_yaml::Value;

use kpm_core::{CatalogEntry, Coordinate, HostVersion, PluginCatalog};

use crate::error::{DirectoryError, DirectoryResult};

/// One plugin as listed in the directory, across all version lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryPlugin {
    pub key: String,
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    /// `(version line, plugin version)` pairs in document order.
    pub versions: Vec<(String, String)>,
}

impl DirectoryPlugin {
    /// Plugin version published for `version_line`.
    pub fn version_for(&self, version_line: &str) -> Option<&str> {
        self.versions
            .iter()
            .find(|(line, _)| line == version_line)
            .map(|(_, version)| version.as_str())
    }
}

/// A mapping kept as `(key, value)` pairs in document order.
///
/// Keys are deserialized as strings, which serde_yaml fills from the scalar's
/// source text.
#[derive(Debug)]
struct Ordered<V>(Vec<(String, V)>);

impl<V> Default for Ordered<V> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for Ordered<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OrderedVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedVisitor<V> {
            type Value = Ordered<V>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a mapping")
            }

            fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
                Ok(Ordered::default())
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<String, V>()? {
                    entries.push((key, value));
                }
                Ok(Ordered(entries))
            }
        }

        deserializer.deserialize_map(OrderedVisitor(PhantomData))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawPlugin {
    #[serde(alias = ":group_id")]
    group_id: Option<String>,
    #[serde(alias = ":artifact_id")]
    artifact_id: Option<String>,
    #[serde(alias = ":versions")]
    versions: Ordered<Option<String>>,
}

/// Parse the directory document into plugins, in document order.
pub fn parse_directory(text: &str) -> DirectoryResult<Vec<DirectoryPlugin>> {
    // Syntax and top-level shape first, so they get their own errors
    let doc: Value = serde_yaml::from_str(text)?;
    if !doc.is_mapping() {
        return Err(DirectoryError::InvalidDocument {
            message: "top level is not a mapping".to_string(),
        });
    }

    let Ordered(top) = serde_yaml::from_str::<Ordered<Option<RawPlugin>>>(text).map_err(|e| {
        DirectoryError::InvalidDocument {
            message: e.to_string(),
        }
    })?;

    let plugins = top
        .into_iter()
        .map(|(key, raw)| {
            let raw = raw.unwrap_or_default();
            DirectoryPlugin {
                key: strip_colon(&key).to_string(),
                group_id: raw.group_id.map(|g| strip_colon(&g).to_string()),
                artifact_id: raw.artifact_id.map(|a| strip_colon(&a).to_string()),
                versions: raw
                    .versions
                    .0
                    .into_iter()
                    .filter_map(|(line, version)| {
                        Some((strip_colon(&line).to_string(), strip_colon(&version?).to_string()))
                    })
                    .collect(),
            }
        })
        .collect();

    Ok(plugins)
}

/// Build the catalog for one host version.
pub fn catalog_for(plugins: &[DirectoryPlugin], host_version: &HostVersion) -> PluginCatalog {
    let line = host_version.version_line();
    let entries = plugins
        .iter()
        .map(|plugin| {
            let coordinate = Coordinate::from_parts(
                plugin.artifact_id.clone(),
                plugin.version_for(&line).map(String::from),
            );
            let entry = CatalogEntry::new(plugin.key.clone(), coordinate);
            match &plugin.group_id {
                Some(group_id) => entry.with_group_id(group_id.clone()),
                None => entry,
            }
        })
        .collect();
    PluginCatalog::new(line, entries)
}

fn strip_colon(s: &str) -> &str {
    s.strip_prefix(':').unwrap_or(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIRECTORY: &str = r"
:analytics:
  :type: :java
  :artifact_id: analytics-plugin
  :versions:
    :0.20: 4.0.5
    :0.22: 7.0.8
:email-notifications:
  :type: :java
  :group_id: org.kill-bill.billing.plugin.java
  :artifact_id: killbill-email-notifications-plugin
  :versions:
    :0.22: 0.6.1
:stripe:
  :type: :java
  :versions:
    :0.22: 7.0.0
  :require:
    - :org.kill-bill.billing.plugin.java.stripe.apiKey
";

    #[test]
    fn test_parses_symbol_keys_in_order() {
        let plugins = parse_directory(DIRECTORY).unwrap();
        let keys: Vec<_> = plugins.iter().map(|p| p.key.as_str()).collect();
        assert_eq!(keys, vec!["analytics", "email-notifications", "stripe"]);

        let analytics = &plugins[0];
        assert_eq!(analytics.artifact_id.as_deref(), Some("analytics-plugin"));
        assert_eq!(analytics.version_for("0.20"), Some("4.0.5"));
        assert_eq!(analytics.version_for("0.22"), Some("7.0.8"));
        assert_eq!(analytics.version_for("0.24"), None);

        assert_eq!(
            plugins[1].group_id.as_deref(),
            Some("org.kill-bill.billing.plugin.java")
        );
    }

    #[test]
    fn test_missing_artifact_id_stays_unset() {
        let plugins = parse_directory(DIRECTORY).unwrap();
        assert_eq!(plugins[2].artifact_id, None);
        assert_eq!(plugins[2].version_for("0.22"), Some("7.0.0"));
    }

    #[test]
    fn test_plain_yaml_is_accepted() {
        let plugins = parse_directory(
            "adyen:\n  artifact_id: adyen-plugin\n  versions:\n    '0.24': 1.0.0\n",
        )
        .unwrap();
        assert_eq!(plugins[0].key, "adyen");
        assert_eq!(plugins[0].version_for("0.24"), Some("1.0.0"));
    }

    #[test]
    fn test_unquoted_numeric_scalars_keep_their_text() {
        let plugins = parse_directory(
            "adyen:\n  artifact_id: adyen-plugin\n  versions:\n    0.20: 1.0.0\n    0.24: 1.10\n",
        )
        .unwrap();
        let adyen = &plugins[0];
        assert_eq!(adyen.version_for("0.20"), Some("1.0.0"));
        assert_eq!(adyen.version_for("0.24"), Some("1.10"));

        let catalog = catalog_for(&plugins, &HostVersion::parse("0.20.3").unwrap());
        assert_eq!(
            catalog.find("adyen").unwrap().coordinate,
            Coordinate::new("adyen-plugin", "1.0.0")
        );
    }

    #[test]
    fn test_symbol_numeric_lines_keep_trailing_zero() {
        let plugins = parse_directory(":kb:\n  :versions:\n    :0.20: :2.10\n    :0.22: 3.0.0\n").unwrap();
        assert_eq!(plugins[0].version_for("0.20"), Some("2.10"));
        assert_eq!(plugins[0].version_for("0.22"), Some("3.0.0"));
    }

    #[test]
    fn test_bare_plugin_key_yields_empty_plugin() {
        let plugins = parse_directory(":orphan:\n").unwrap();
        assert_eq!(plugins.len(), 1);
        assert_eq!(plugins[0].artifact_id, None);
        assert!(plugins[0].versions.is_empty());
    }

    #[test]
    fn test_non_mapping_document_is_invalid() {
        assert!(matches!(
            parse_directory("- a\n- b\n"),
            Err(DirectoryError::InvalidDocument { .. })
        ));
        assert!(matches!(
            parse_directory("~"),
            Err(DirectoryError::InvalidDocument { .. })
        ));
    }

    #[test]
    fn test_broken_yaml_is_parse_error() {
        assert!(matches!(
            parse_directory(":a: [unclosed"),
            Err(DirectoryError::YamlParse(_))
        ));
    }

    #[test]
    fn test_wrongly_typed_field_is_invalid() {
        assert!(matches!(
            parse_directory(":a:\n  :versions: [1, 2]\n"),
            Err(DirectoryError::InvalidDocument { .. })
        ));
    }

    #[test]
    fn test_catalog_for_host_version() {
        let plugins = parse_directory(DIRECTORY).unwrap();
        let host = HostVersion::parse("0.22.8-SNAPSHOT").unwrap();
        let catalog = catalog_for(&plugins, &host);

        assert_eq!(catalog.version_line, "0.22");
        assert_eq!(catalog.len(), 3);
        assert_eq!(
            catalog.find("email-notifications").unwrap().coordinate,
            Coordinate::new("killbill-email-notifications-plugin", "0.6.1")
        );
        let stripe = &catalog.find("stripe").unwrap().coordinate;
        assert_eq!(stripe.artifact_id(), None);
        assert_eq!(stripe.version(), Some("7.0.0"));

        let older = catalog_for(&plugins, &HostVersion::parse("0.20").unwrap());
        assert_eq!(older.find("stripe").unwrap().coordinate.version(), None);
    }
}
