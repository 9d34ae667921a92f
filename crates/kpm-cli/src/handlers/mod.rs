//! Command handlers.
//!
//! Handlers follow one pattern:
//! - Signature: `pub async fn execute(ctx: &CliContext, ...) -> Result<()>`
//! - Validate CLI-specific input, call into the context, format the output
//! - Domain errors are converted to [`crate::CliError`] so the exit code
//!   survives the trip through `anyhow`

pub mod catalog;
pub mod config;
pub mod identifiers;
pub mod paths;
pub mod resolve;

#[cfg(test)]
pub(crate) mod test_support {
    use std::path::PathBuf;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use kpm_core::{
        CatalogEntry, CatalogError, CatalogProvider, Coordinate, PluginCatalog, Repos,
        ResolvedPaths, Settings,
    };
    use kpm_db::TestDb;

    use crate::bootstrap::{CliContext, bootstrap_with};

    /// Catalog that serves a fixed answer and counts calls.
    pub struct StaticCatalog {
        answer: Result<PluginCatalog, CatalogError>,
        calls: AtomicUsize,
        forced: AtomicUsize,
    }

    impl StaticCatalog {
        pub fn with_entries(entries: &[(&str, Option<&str>, Option<&str>)]) -> Arc<Self> {
            let entries = entries
                .iter()
                .map(|(key, artifact, version)| {
                    CatalogEntry::new(
                        *key,
                        Coordinate::from_parts(
                            artifact.map(String::from),
                            version.map(String::from),
                        ),
                    )
                })
                .collect();
            Arc::new(Self {
                answer: Ok(PluginCatalog::new("0.24", entries)),
                calls: AtomicUsize::new(0),
                forced: AtomicUsize::new(0),
            })
        }

        pub fn failing(error: CatalogError) -> Arc<Self> {
            Arc::new(Self {
                answer: Err(error),
                calls: AtomicUsize::new(0),
                forced: AtomicUsize::new(0),
            })
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        pub fn forced_calls(&self) -> usize {
            self.forced.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CatalogProvider for StaticCatalog {
        async fn get_catalog(
            &self,
            _host_version: &str,
            force_refresh: bool,
        ) -> Result<PluginCatalog, CatalogError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if force_refresh {
                self.forced.fetch_add(1, Ordering::SeqCst);
            }
            self.answer.clone()
        }
    }

    /// Context over an in-memory database. Keep the `TestDb` alive.
    pub async fn context(catalog: Arc<StaticCatalog>, settings: Settings) -> (CliContext, TestDb) {
        let db = TestDb::new().await.unwrap();
        let repos = Repos::new(
            Arc::new(db.identifier_repository()),
            Arc::new(db.settings_repository()),
        );
        let paths = ResolvedPaths {
            data_root: PathBuf::from("/tmp/kpm-test"),
            database_path: PathBuf::from("/tmp/kpm-test/data/kpm.db"),
            identifiers_file: PathBuf::from("/tmp/kpm-test/plugins/plugin_identifiers.json"),
        };
        (bootstrap_with(repos, catalog, settings, paths), db)
    }
}
