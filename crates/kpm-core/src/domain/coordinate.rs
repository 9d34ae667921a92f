//! Artifact coordinate with field-wise, first-writer-wins merging.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Returns the value only if it is present and non-empty.
fn set_value(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// The `(artifact_id, version)` pair needed to locate an installable plugin.
///
/// A field counts as *set* only when it is present **and** non-empty. An
/// empty string is treated exactly like a missing value, so sources that
/// serialize "unknown" as `""` never block a later source from filling the
/// field.
///
/// Merging is monotonic: once a field is set, no later `fill_*` call can
/// change or clear it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coordinate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    artifact_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    version: Option<String>,
}

impl Coordinate {
    /// Create an empty coordinate.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            artifact_id: None,
            version: None,
        }
    }

    /// Create a coordinate from two literal values.
    pub fn new(artifact_id: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            artifact_id: Some(artifact_id.into()),
            version: Some(version.into()),
        }
    }

    /// Create a coordinate from optional parts, keeping them as given.
    #[must_use]
    pub const fn from_parts(artifact_id: Option<String>, version: Option<String>) -> Self {
        Self {
            artifact_id,
            version,
        }
    }

    /// The artifact id, if set.
    pub fn artifact_id(&self) -> Option<&str> {
        set_value(self.artifact_id.as_deref())
    }

    /// The version, if set.
    pub fn version(&self) -> Option<&str> {
        set_value(self.version.as_deref())
    }

    /// Whether the artifact id is set.
    pub fn has_artifact_id(&self) -> bool {
        self.artifact_id().is_some()
    }

    /// Whether the version is set.
    pub fn has_version(&self) -> bool {
        self.version().is_some()
    }

    /// Both fields are set.
    pub fn is_complete(&self) -> bool {
        self.has_artifact_id() && self.has_version()
    }

    /// Neither field is set.
    pub fn is_empty(&self) -> bool {
        !self.has_artifact_id() && !self.has_version()
    }

    /// Adopt `value` as the artifact id if none is set yet.
    ///
    /// Returns `true` if the field changed.
    pub fn fill_artifact_id_if_unset(&mut self, value: Option<&str>) -> bool {
        match set_value(value) {
            Some(v) if !self.has_artifact_id() => {
                self.artifact_id = Some(v.to_owned());
                true
            }
            _ => false,
        }
    }

    /// Adopt `value` as the version if none is set yet.
    ///
    /// Returns `true` if the field changed.
    pub fn fill_version_if_unset(&mut self, value: Option<&str>) -> bool {
        match set_value(value) {
            Some(v) if !self.has_version() => {
                self.version = Some(v.to_owned());
                true
            }
            _ => false,
        }
    }

    /// Fill every unset field from `other`.
    ///
    /// Returns `true` if at least one field changed.
    pub fn fill_if_unset(&mut self, other: &Self) -> bool {
        let artifact = self.fill_artifact_id_if_unset(other.artifact_id());
        let version = self.fill_version_if_unset(other.version());
        artifact || version
    }

    /// Split into `(artifact_id, version)` only if complete.
    pub fn into_complete(self) -> Option<(String, String)> {
        if !self.is_complete() {
            return None;
        }
        match (self.artifact_id, self.version) {
            (Some(a), Some(v)) => Some((a, v)),
            _ => None,
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}",
            self.artifact_id().unwrap_or("?"),
            self.version().unwrap_or("?")
        )
    }
}
