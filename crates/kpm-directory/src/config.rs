//! Public configuration for the plugin directory client.

use std::time::Duration;

use kpm_core::Settings;
use kpm_core::settings::DEFAULT_CATALOG_URL;

/// Configuration for the plugin directory client.
///
/// # Example
///
/// ```
/// use kpm_directory::DirectoryClientConfig;
/// use std::time::Duration;
///
/// let config = DirectoryClientConfig::new()
///     .with_timeout(Duration::from_secs(60))
///     .with_cache_ttl(Duration::from_secs(300));
/// ```
#[derive(Debug, Clone)]
pub struct DirectoryClientConfig {
    /// Location of `plugins_directory.yml` (`https://`, `http://` or `file://`)
    pub(crate) catalog_url: String,
    /// User agent string for HTTP requests
    pub(crate) user_agent: String,
    /// Request timeout
    pub(crate) timeout: Duration,
    /// Maximum number of retry attempts for transient errors
    pub(crate) max_retries: u8,
    /// Base delay for exponential backoff
    pub(crate) retry_base_delay: Duration,
    /// How long a catalog stays fresh; zero disables caching
    pub(crate) cache_ttl: Duration,
}

impl Default for DirectoryClientConfig {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            user_agent: concat!("kpm-directory/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(30),
            max_retries: 3,
            retry_base_delay: Duration::from_millis(500),
            cache_ttl: Duration::from_secs(3600),
        }
    }
}

impl DirectoryClientConfig {
    /// Create a new configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive a configuration from application settings.
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new()
            .with_catalog_url(settings.effective_catalog_url())
            .with_timeout(Duration::from_secs(settings.effective_request_timeout_secs()))
            .with_max_retries(u8::try_from(settings.effective_max_retries()).unwrap_or(u8::MAX))
            .with_cache_ttl(Duration::from_secs(
                settings.effective_catalog_cache_ttl_secs(),
            ))
    }

    /// Set the directory document URL.
    #[must_use]
    pub fn with_catalog_url(mut self, url: impl Into<String>) -> Self {
        self.catalog_url = url.into();
        self
    }

    /// Set the user agent string for HTTP requests.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the request timeout.
    ///
    /// Defaults to 30 seconds.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the maximum number of retry attempts for transient errors.
    ///
    /// Defaults to 3 retries.
    #[must_use]
    pub const fn with_max_retries(mut self, retries: u8) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set the base delay for exponential backoff retries.
    ///
    /// Defaults to 500ms.
    #[must_use]
    pub const fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = delay;
        self
    }

    /// Set the catalog cache lifetime.
    ///
    /// Defaults to one hour.
    #[must_use]
    pub const fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// The configured directory URL.
    pub fn catalog_url(&self) -> &str {
        &self.catalog_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DirectoryClientConfig::new();
        assert_eq!(config.catalog_url, DEFAULT_CATALOG_URL);
        assert!(config.user_agent.contains("kpm-directory"));
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.cache_ttl, Duration::from_secs(3600));
    }

    #[test]
    fn test_builder_pattern() {
        let config = DirectoryClientConfig::new()
            .with_catalog_url("file:///tmp/plugins_directory.yml")
            .with_user_agent("test-agent")
            .with_timeout(Duration::from_secs(60))
            .with_max_retries(5)
            .with_cache_ttl(Duration::ZERO);

        assert_eq!(config.catalog_url(), "file:///tmp/plugins_directory.yml");
        assert_eq!(config.user_agent, "test-agent");
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.cache_ttl, Duration::ZERO);
    }

    #[test]
    fn test_from_settings() {
        let settings = Settings {
            catalog_url: Some("https://mirror.example/plugins_directory.yml".to_string()),
            catalog_cache_ttl_secs: Some(60),
            request_timeout_secs: Some(5),
            max_retries: Some(1),
            ..Settings::default()
        };
        let config = DirectoryClientConfig::from_settings(&settings);

        assert_eq!(
            config.catalog_url,
            "https://mirror.example/plugins_directory.yml"
        );
        assert_eq!(config.cache_ttl, Duration::from_secs(60));
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.max_retries, 1);
    }
}
