//! `CatalogProvider` implementation for `DirectoryClient`.

use async_trait::async_trait;
use kpm_core::{CatalogError, CatalogProvider, PluginCatalog};

use crate::client::DirectoryClient;
use crate::error::DirectoryError;
use crate::http::HttpBackend;

// ============================================================================
// Error Mapping
// ============================================================================

/// Convert internal `DirectoryError` to core `CatalogError`.
pub(crate) fn map_error(err: DirectoryError) -> CatalogError {
    match err {
        DirectoryError::RequestFailed { .. }
        | DirectoryError::Network(_)
        | DirectoryError::Io { .. } => CatalogError::Unavailable(err.to_string()),
        DirectoryError::InvalidUrl(_) | DirectoryError::UnsupportedScheme(_) => {
            CatalogError::Configuration(err.to_string())
        }
        DirectoryError::YamlParse(_) | DirectoryError::InvalidDocument { .. } => {
            CatalogError::Malformed(err.to_string())
        }
        DirectoryError::InvalidHostVersion(e) => CatalogError::InvalidHostVersion(e.0),
    }
}

// ============================================================================
// Port Implementation
// ============================================================================

#[async_trait]
impl<B: HttpBackend> CatalogProvider for DirectoryClient<B> {
    async fn get_catalog(
        &self,
        host_version: &str,
        force_refresh: bool,
    ) -> Result<PluginCatalog, CatalogError> {
        self.catalog(host_version, force_refresh)
            .await
            .map_err(|e| {
                tracing::debug!(host_version, error = %e, "Catalog lookup failed");
                map_error(e)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DirectoryClientConfig;
    use crate::http::testing::{CannedResponse, FakeBackend};
    use kpm_core::HostVersionError;

    fn client(response: CannedResponse) -> DirectoryClient<FakeBackend> {
        DirectoryClient::with_backend(
            DirectoryClientConfig::new().with_catalog_url("https://example.com/dir.yml"),
            FakeBackend::new(response),
        )
    }

    #[test]
    fn test_map_error_categories() {
        assert!(matches!(
            map_error(DirectoryError::RequestFailed {
                status: 500,
                url: "u".to_string()
            }),
            CatalogError::Unavailable(_)
        ));
        assert!(matches!(
            map_error(DirectoryError::UnsupportedScheme("ftp".to_string())),
            CatalogError::Configuration(_)
        ));
        assert!(matches!(
            map_error(DirectoryError::InvalidDocument {
                message: "m".to_string()
            }),
            CatalogError::Malformed(_)
        ));
        assert_eq!(
            map_error(DirectoryError::InvalidHostVersion(HostVersionError(
                "x".to_string()
            ))),
            CatalogError::InvalidHostVersion("x".to_string())
        );
    }

    #[test]
    fn test_get_catalog_through_port() {
        let client = client(CannedResponse::ok(
            ":adyen:\n  :artifact_id: adyen-plugin\n  :versions:\n    :0.24: 1.0.0\n",
        ));
        let catalog = tokio_test::block_on(client.get_catalog("0.24.2", false)).unwrap();
        assert_eq!(catalog.version_line, "0.24");
        assert_eq!(
            catalog.find("adyen").unwrap().coordinate.version(),
            Some("1.0.0")
        );
    }

    #[test]
    fn test_malformed_document_through_port() {
        let client = client(CannedResponse::ok("- not\n- a mapping\n"));
        let err = tokio_test::block_on(client.get_catalog("0.24", false)).unwrap_err();
        assert!(matches!(err, CatalogError::Malformed(_)));
    }
}
