//! Host-platform version parsing.

use std::fmt;

use thiserror::Error;

/// Error returned when a host version cannot be reduced to a version line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid host version '{0}': expected <major>.<minor>[.<patch>][-qualifier]")]
pub struct HostVersionError(pub String);

/// A host-platform release, reduced to the `major.minor` version line that
/// catalogs are keyed by.
///
/// Accepts `0.24`, `0.24.3`, `v0.24.3` and `0.24.3-SNAPSHOT`; the qualifier and
/// patch are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HostVersion {
    raw: String,
    major: u32,
    minor: u32,
}

impl HostVersion {
    /// Parse a host version string.
    pub fn parse(raw: &str) -> Result<Self, HostVersionError> {
        let err = || HostVersionError(raw.to_string());

        let trimmed = raw.trim();
        let without_prefix = trimmed.strip_prefix('v').unwrap_or(trimmed);
        let numeric = without_prefix
            .split_once('-')
            .map_or(without_prefix, |(head, _)| head);

        let mut parts = numeric.split('.');
        let major = parts
            .next()
            .and_then(|p| p.parse::<u32>().ok())
            .ok_or_else(err)?;
        let minor = parts
            .next()
            .and_then(|p| p.parse::<u32>().ok())
            .ok_or_else(err)?;
        // Remaining segments must still be numeric
        if parts.any(|p| p.parse::<u32>().is_err()) {
            return Err(err());
        }

        Ok(Self {
            raw: trimmed.to_string(),
            major,
            minor,
        })
    }

    /// The `major.minor` line (e.g. `"0.24"`).
    pub fn version_line(&self) -> String {
        format!("{}.{}", self.major, self.minor)
    }

    /// The original string, trimmed.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for HostVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
