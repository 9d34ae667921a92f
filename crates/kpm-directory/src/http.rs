//! Transport for the plugin directory document.
//!
//! A trait-based backend so the client can be tested without a network. The
//! production implementation uses reqwest with retry for transient errors,
//! and reads `file://` URLs straight from disk.

use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::config::DirectoryClientConfig;
use crate::error::{DirectoryError, DirectoryResult};

// ============================================================================
// HTTP Backend Trait
// ============================================================================

/// Fetches a document body as text.
///
/// Implementation detail; external code goes through
/// [`kpm_core::CatalogProvider`].
#[async_trait]
pub trait HttpBackend: Send + Sync {
    /// Fetch the body at `url`.
    async fn get_text(&self, url: &Url) -> DirectoryResult<String>;
}

// ============================================================================
// Reqwest Backend
// ============================================================================

/// Production backend using reqwest with retry logic.
///
/// Implements exponential backoff for transient server errors (5xx)
/// and network errors. Client errors (4xx) fail immediately.
pub struct ReqwestBackend {
    client: reqwest::Client,
    max_retries: u8,
    retry_base_delay: Duration,
}

impl ReqwestBackend {
    /// Create a new reqwest backend with the given configuration.
    pub fn new(config: &DirectoryClientConfig) -> DirectoryResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            max_retries: config.max_retries,
            retry_base_delay: config.retry_base_delay,
        })
    }

    /// Delay before retry number `attempt` (1-based).
    fn backoff(&self, attempt: u8) -> Duration {
        let factor = 2u32.saturating_pow(u32::from(attempt.saturating_sub(1)));
        self.retry_base_delay
            .checked_mul(factor)
            .unwrap_or(Duration::MAX)
    }

    /// Fetch a URL with automatic retry for transient errors.
    async fn fetch_with_retry(&self, url: &Url) -> DirectoryResult<String> {
        let mut last_error: Option<DirectoryError> = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = self.backoff(attempt);
                tracing::debug!(%url, attempt, ?delay, "Retrying plugin directory fetch");
                tokio::time::sleep(delay).await;
            }

            match self.client.get(url.as_str()).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return Ok(response.text().await?);
                    }

                    // 5xx errors are retryable (server-side issues)
                    if status.is_server_error() && attempt < self.max_retries {
                        tracing::warn!(%url, status = status.as_u16(), "Plugin directory server error");
                        last_error = Some(DirectoryError::RequestFailed {
                            status: status.as_u16(),
                            url: url.to_string(),
                        });
                        continue;
                    }

                    return Err(DirectoryError::RequestFailed {
                        status: status.as_u16(),
                        url: url.to_string(),
                    });
                }
                Err(e) => {
                    // Network errors are retryable
                    if attempt < self.max_retries {
                        tracing::warn!(%url, error = %e, "Plugin directory network error");
                        last_error = Some(e.into());
                        continue;
                    }
                    return Err(e.into());
                }
            }
        }

        Err(last_error.unwrap_or_else(|| DirectoryError::InvalidDocument {
            message: "no response received".to_string(),
        }))
    }
}

/// Read a `file://` URL from disk.
async fn read_local(url: &Url) -> DirectoryResult<String> {
    let path = url
        .to_file_path()
        .map_err(|()| DirectoryError::UnsupportedScheme(url.to_string()))?;
    tokio::fs::read_to_string(&path)
        .await
        .map_err(|source| DirectoryError::Io { path, source })
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn get_text(&self, url: &Url) -> DirectoryResult<String> {
        match url.scheme() {
            "file" => read_local(url).await,
            "http" | "https" => self.fetch_with_retry(url).await,
            other => Err(DirectoryError::UnsupportedScheme(other.to_string())),
        }
    }
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================
