//! Settings domain types and validation.
//!
//! Pure domain types with no infrastructure dependencies. Persistence lives
//! behind [`crate::ports::SettingsRepository`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Upstream plugin directory published by the Kill Bill project.
pub const DEFAULT_CATALOG_URL: &str =
    "https://raw.githubusercontent.com/killbill/killbill-cloud/master/kpm/lib/kpm/plugins_directory.yml";

/// Default catalog cache lifetime (one hour).
pub const DEFAULT_CATALOG_CACHE_TTL_SECS: u64 = 3600;

/// Default HTTP request timeout.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default number of retries for transient catalog fetch failures.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Upper bound for the catalog cache lifetime (seven days).
pub const MAX_CATALOG_CACHE_TTL_SECS: u64 = 7 * 24 * 3600;

/// Where identifier records are kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentifierBackend {
    /// `plugin_identifiers` table in the local database.
    #[default]
    Sqlite,
    /// `plugin_identifiers.json` ledger file.
    Json,
}

impl IdentifierBackend {
    /// Lowercase name as stored and accepted on the command line.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sqlite => "sqlite",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for IdentifierBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IdentifierBackend {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(Self::Sqlite),
            "json" => Ok(Self::Json),
            other => Err(SettingsError::UnknownBackend(other.to_string())),
        }
    }
}

/// Application settings structure.
///
/// All fields are optional to support partial updates and graceful defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// URL of the plugin directory document (`https://` or `file://`).
    pub catalog_url: Option<String>,

    /// How long a fetched catalog stays fresh, in seconds.
    pub catalog_cache_ttl_secs: Option<u64>,

    /// HTTP request timeout in seconds (1-600).
    pub request_timeout_secs: Option<u64>,

    /// Retries for transient fetch failures (0-10).
    pub max_retries: Option<u32>,

    /// Identifier store backend.
    pub identifier_backend: Option<IdentifierBackend>,

    /// Host version used when a command does not name one.
    pub default_host_version: Option<String>,
}

impl Settings {
    /// Create settings with sensible defaults.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            catalog_url: Some(DEFAULT_CATALOG_URL.to_string()),
            catalog_cache_ttl_secs: Some(DEFAULT_CATALOG_CACHE_TTL_SECS),
            request_timeout_secs: Some(DEFAULT_REQUEST_TIMEOUT_SECS),
            max_retries: Some(DEFAULT_MAX_RETRIES),
            identifier_backend: Some(IdentifierBackend::Sqlite),
            default_host_version: None,
        }
    }

    /// Effective catalog URL (with default fallback).
    #[must_use]
    pub fn effective_catalog_url(&self) -> &str {
        self.catalog_url.as_deref().unwrap_or(DEFAULT_CATALOG_URL)
    }

    /// Effective catalog cache TTL in seconds.
    #[must_use]
    pub fn effective_catalog_cache_ttl_secs(&self) -> u64 {
        self.catalog_cache_ttl_secs
            .unwrap_or(DEFAULT_CATALOG_CACHE_TTL_SECS)
    }

    /// Effective request timeout in seconds.
    #[must_use]
    pub fn effective_request_timeout_secs(&self) -> u64 {
        self.request_timeout_secs
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
    }

    /// Effective retry count.
    #[must_use]
    pub fn effective_max_retries(&self) -> u32 {
        self.max_retries.unwrap_or(DEFAULT_MAX_RETRIES)
    }

    /// Effective identifier backend.
    #[must_use]
    pub fn effective_identifier_backend(&self) -> IdentifierBackend {
        self.identifier_backend.unwrap_or_default()
    }

    /// Merge an update into these settings, only touching fields that are Some.
    pub fn merge(&mut self, other: &SettingsUpdate) {
        if let Some(ref url) = other.catalog_url {
            self.catalog_url.clone_from(url);
        }
        if let Some(ttl) = other.catalog_cache_ttl_secs {
            self.catalog_cache_ttl_secs = ttl;
        }
        if let Some(timeout) = other.request_timeout_secs {
            self.request_timeout_secs = timeout;
        }
        if let Some(retries) = other.max_retries {
            self.max_retries = retries;
        }
        if let Some(backend) = other.identifier_backend {
            self.identifier_backend = backend;
        }
        if let Some(ref host) = other.default_host_version {
            self.default_host_version.clone_from(host);
        }
    }
}

/// Partial settings update.
///
/// Each field is `Option<Option<T>>`:
/// - `None` = don't change this field
/// - `Some(None)` = reset field to its default
/// - `Some(Some(value))` = set field to value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsUpdate {
    pub catalog_url: Option<Option<String>>,
    pub catalog_cache_ttl_secs: Option<Option<u64>>,
    pub request_timeout_secs: Option<Option<u64>>,
    pub max_retries: Option<Option<u32>>,
    pub identifier_backend: Option<Option<IdentifierBackend>>,
    pub default_host_version: Option<Option<String>>,
}

impl SettingsUpdate {
    /// Whether the update changes nothing.
    pub const fn is_empty(&self) -> bool {
        self.catalog_url.is_none()
            && self.catalog_cache_ttl_secs.is_none()
            && self.request_timeout_secs.is_none()
            && self.max_retries.is_none()
            && self.identifier_backend.is_none()
            && self.default_host_version.is_none()
    }
}

/// Settings validation error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("Catalog URL cannot be empty")]
    EmptyCatalogUrl,

    #[error("Catalog cache TTL must be at most {MAX_CATALOG_CACHE_TTL_SECS} seconds, got {0}")]
    InvalidCacheTtl(u64),

    #[error("Request timeout must be between 1 and 600 seconds, got {0}")]
    InvalidTimeout(u64),

    #[error("Max retries must be at most 10, got {0}")]
    InvalidRetries(u32),

    #[error("Default host version cannot be empty")]
    EmptyHostVersion,

    #[error("Unknown identifier backend '{0}' (expected sqlite or json)")]
    UnknownBackend(String),
}

/// Validate settings values.
pub fn validate_settings(settings: &Settings) -> Result<(), SettingsError> {
    if settings
        .catalog_url
        .as_ref()
        .is_some_and(|url| url.trim().is_empty())
    {
        return Err(SettingsError::EmptyCatalogUrl);
    }

    if let Some(ttl) = settings.catalog_cache_ttl_secs {
        if ttl > MAX_CATALOG_CACHE_TTL_SECS {
            return Err(SettingsError::InvalidCacheTtl(ttl));
        }
    }

    if let Some(timeout) = settings.request_timeout_secs {
        if !(1..=600).contains(&timeout) {
            return Err(SettingsError::InvalidTimeout(timeout));
        }
    }

    if let Some(retries) = settings.max_retries {
        if retries > 10 {
            return Err(SettingsError::InvalidRetries(retries));
        }
    }

    if settings
        .default_host_version
        .as_ref()
        .is_some_and(|v| v.trim().is_empty())
    {
        return Err(SettingsError::EmptyHostVersion);
    }

    Ok(())
}
