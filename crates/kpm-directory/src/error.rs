//! Internal error types for plugin directory operations.
//!
//! These errors are internal to `kpm-directory` and are mapped to
//! [`kpm_core::CatalogError`] at the port boundary.

use std::path::PathBuf;

use kpm_core::HostVersionError;
use thiserror::Error;

/// Result type alias for directory operations.
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Errors related to fetching and reading the plugin directory.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// Request failed with an HTTP error status.
    #[error("Plugin directory request failed with status {status}: {url}")]
    RequestFailed {
        /// HTTP status code
        status: u16,
        /// The URL that was requested
        url: String,
    },

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// URL scheme the client cannot fetch.
    #[error("Unsupported URL scheme '{0}' (expected http, https or file)")]
    UnsupportedScheme(String),

    /// Local directory file could not be read.
    #[error("Cannot read {path}: {source}")]
    Io {
        /// File that was read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Document parsed but does not have the expected shape.
    #[error("Invalid plugin directory: {message}")]
    InvalidDocument {
        /// Description of what was invalid
        message: String,
    },

    /// Host version cannot be reduced to a version line.
    #[error(transparent)]
    InvalidHostVersion(#[from] HostVersionError),
}
