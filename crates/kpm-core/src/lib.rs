//! Core domain, ports and the artifact resolver for kpm.
//!
//! `kpm-core` answers one question: given a plugin key and a host release,
//! which artifact id and version should be installed? The answer comes from
//! the cheapest trustworthy source first: what the caller knows, then the
//! local identifier ledger, then the release catalog, then a naming
//! convention. See [`ArtifactResolver`].
//!
//! Storage and network live in adapter crates (`kpm-db`, `kpm-directory`)
//! that implement the traits in [`ports`].

#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod naming;
pub mod paths;
pub mod ports;
pub mod services;
pub mod settings;

pub use domain::{
    CatalogEntry, Coordinate, HostVersion, HostVersionError, PluginCatalog, PluginIdentifier,
};
pub use naming::{ConventionalNaming, NamingHeuristic, PLUGIN_ARTIFACT_SUFFIX, derive_artifact_id};
pub use paths::{
    DATA_DIR_ENV, PathError, ResolvedPaths, data_root, database_path, identifiers_file_path,
};
pub use ports::{
    CatalogError, CatalogProvider, CoreError, IdentifierStore, Repos, RepositoryError,
    SettingsRepository,
};
pub use services::{
    ArtifactResolver, ResolutionReport, ResolutionTier, ResolveError, ResolveRequest,
    SourceError, SourceFailure, Tier,
};
pub use settings::{
    DEFAULT_CATALOG_URL, IdentifierBackend, Settings, SettingsError, SettingsUpdate,
    validate_settings,
};
