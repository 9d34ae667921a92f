//! CLI bootstrap - the composition root.
//!
//! The only place where concrete adapters are chosen:
//! - Database pool, settings and identifier ledger (via kpm-db)
//! - Plugin directory client (via kpm-directory)
//! - Artifact resolver (via kpm-core)

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use kpm_core::{
    ArtifactResolver, CatalogProvider, IdentifierStore, Repos, ResolvedPaths, Settings,
    SettingsRepository, validate_settings,
};
use kpm_db::{CoreFactory, setup_database};
use kpm_directory::{DefaultDirectoryClient, DirectoryClientConfig};

use crate::error::CliError;
use crate::parser::Cli;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Data directory override (`--data-dir` / `KPM_DATA_DIR`).
    pub data_dir: Option<PathBuf>,
    /// Catalog URL override for this invocation (`KPM_CATALOG_URL`).
    pub catalog_url: Option<String>,
}

impl CliConfig {
    /// Take the global overrides from parsed arguments.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            data_dir: cli.data_dir.clone(),
            catalog_url: cli.catalog_url.clone(),
        }
    }
}

/// Fully composed application context for CLI commands.
pub struct CliContext {
    repos: Repos,
    catalog: Arc<dyn CatalogProvider>,
    resolver: ArtifactResolver,
    settings: Settings,
    paths: ResolvedPaths,
}

impl CliContext {
    /// The identifier ledger.
    pub fn identifiers(&self) -> &Arc<dyn IdentifierStore> {
        &self.repos.identifiers
    }

    /// The settings repository.
    pub fn settings_repo(&self) -> &Arc<dyn SettingsRepository> {
        &self.repos.settings
    }

    /// The plugin catalog provider.
    pub fn catalog(&self) -> &Arc<dyn CatalogProvider> {
        &self.catalog
    }

    /// The artifact resolver.
    pub const fn resolver(&self) -> &ArtifactResolver {
        &self.resolver
    }

    /// Settings in effect for this invocation, overrides applied.
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Resolved data paths.
    pub const fn paths(&self) -> &ResolvedPaths {
        &self.paths
    }
}

/// Bootstrap the CLI application.
///
/// 1. Resolve data paths and open the database
/// 2. Load settings and apply per-invocation overrides
/// 3. Build the identifier ledger for the configured backend
/// 4. Build the plugin directory client
/// 5. Assemble the resolver
pub async fn bootstrap(config: CliConfig) -> Result<CliContext> {
    let paths = ResolvedPaths::resolve(config.data_dir.as_deref()).map_err(CliError::from)?;
    let pool = setup_database(&paths.database_path).await?;

    let settings_repo = CoreFactory::settings_repository(pool.clone());
    let mut settings = settings_repo.load().await.map_err(CliError::from)?;
    if let Some(url) = config.catalog_url {
        tracing::debug!(%url, "Catalog URL overridden for this invocation");
        settings.catalog_url = Some(url);
    }
    validate_settings(&settings).map_err(CliError::from)?;

    let backend = settings.effective_identifier_backend();
    let repos = CoreFactory::build_repos(pool, backend, &paths.identifiers_file);

    let directory_config = DirectoryClientConfig::from_settings(&settings);
    let catalog: Arc<dyn CatalogProvider> =
        Arc::new(DefaultDirectoryClient::new(&directory_config).map_err(CliError::from)?);

    tracing::debug!(
        data_root = %paths.data_root.display(),
        %backend,
        catalog_url = directory_config.catalog_url(),
        "CLI context ready"
    );

    Ok(bootstrap_with(repos, catalog, settings, paths))
}

/// Assemble a context from already-built parts.
pub fn bootstrap_with(
    repos: Repos,
    catalog: Arc<dyn CatalogProvider>,
    settings: Settings,
    paths: ResolvedPaths,
) -> CliContext {
    let resolver = ArtifactResolver::new(Arc::clone(&repos.identifiers), Arc::clone(&catalog));
    CliContext {
        repos,
        catalog,
        resolver,
        settings,
        paths,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bootstrap_creates_database_under_data_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let config = CliConfig {
            data_dir: Some(tmp.path().to_path_buf()),
            catalog_url: Some("file:///nonexistent/plugins_directory.yml".to_string()),
        };

        let ctx = bootstrap(config).await.unwrap();

        assert!(ctx.paths().database_path.exists());
        assert!(ctx.paths().database_path.starts_with(tmp.path()));
        assert_eq!(
            ctx.settings().catalog_url.as_deref(),
            Some("file:///nonexistent/plugins_directory.yml")
        );
        assert!(ctx.identifiers().list_identifiers().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_catalog_override_is_not_persisted() {
        let tmp = tempfile::tempdir().unwrap();
        let config = CliConfig {
            data_dir: Some(tmp.path().to_path_buf()),
            catalog_url: Some("file:///override.yml".to_string()),
        };

        let ctx = bootstrap(config).await.unwrap();
        let stored = ctx.settings_repo().load().await.unwrap();

        assert_ne!(stored.catalog_url.as_deref(), Some("file:///override.yml"));
    }

    #[tokio::test]
    async fn test_bootstrap_rejects_blank_catalog_override() {
        let tmp = tempfile::tempdir().unwrap();
        let config = CliConfig {
            data_dir: Some(tmp.path().to_path_buf()),
            catalog_url: Some("   ".to_string()),
        };

        let err = bootstrap(config).await.err().unwrap();
        assert_eq!(crate::error::exit_code_for(&err), 78);
    }
}
