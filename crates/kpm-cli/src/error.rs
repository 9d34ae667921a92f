//! CLI-specific error types and mappings.
//!
//! Domain errors are folded into [`CliError`], which decides the process
//! exit code.

use kpm_core::{
    CatalogError, CoreError, PathError, RepositoryError, ResolveError, SettingsError, Tier,
};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Core domain error.
    #[error("{0}")]
    Core(String),

    /// Argument error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// No source produced a complete coordinate.
    #[error("Could not resolve plugin '{0}'")]
    Unresolved(String),

    /// IO error (file not found, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database or ledger error.
    #[error("Database error: {0}")]
    Database(String),

    /// Plugin directory could not be used.
    #[error("Catalog error: {0}")]
    Catalog(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// - 1: General error
    /// - 2: Invalid arguments
    /// - 3: Plugin could not be resolved
    /// - 64-78: sysexits.h categories
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Core(_) => 1,
            Self::Arguments(_) => 2,
            Self::Unresolved(_) => 3,
            Self::Catalog(_) => 69,  // EX_UNAVAILABLE
            Self::Database(_) => 73, // EX_CANTCREAT (closest fit)
            Self::Io(_) => 74,       // EX_IOERR
            Self::Config(_) => 78,   // EX_CONFIG
        }
    }
}

/// Exit code for an error returned from command dispatch.
///
/// Errors that are not a [`CliError`] anywhere in their chain map to 1.
pub fn exit_code_for(err: &anyhow::Error) -> u8 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<CliError>())
        .map_or(1, CliError::exit_code)
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Repository(RepositoryError::NotFound(what)) => {
                Self::Core(format!("Not found: {what}"))
            }
            CoreError::Repository(RepositoryError::Constraint(msg)) => Self::Arguments(msg),
            CoreError::Repository(repo_err) => Self::Database(repo_err.to_string()),
            CoreError::Catalog(CatalogError::InvalidHostVersion(v)) => {
                Self::Arguments(format!("invalid host version '{v}'"))
            }
            CoreError::Catalog(CatalogError::Configuration(msg)) => Self::Config(msg),
            CoreError::Catalog(catalog_err) => Self::Catalog(catalog_err.to_string()),
            CoreError::Resolve(err) => match &err {
                ResolveError::InvalidArgument(msg) => Self::Arguments(msg.clone()),
                ResolveError::SourceFailed {
                    tier: Tier::Catalog,
                    ..
                } => Self::Catalog(err.to_string()),
                ResolveError::SourceFailed { .. } => Self::Database(err.to_string()),
            },
            CoreError::Settings(settings_err) => Self::Config(settings_err.to_string()),
            CoreError::Path(path_err) => Self::Io(path_err.to_string()),
            CoreError::Validation(msg) => Self::Arguments(msg),
        }
    }
}

impl From<RepositoryError> for CliError {
    fn from(err: RepositoryError) -> Self {
        CoreError::from(err).into()
    }
}

impl From<CatalogError> for CliError {
    fn from(err: CatalogError) -> Self {
        CoreError::from(err).into()
    }
}

impl From<ResolveError> for CliError {
    fn from(err: ResolveError) -> Self {
        CoreError::from(err).into()
    }
}

impl From<SettingsError> for CliError {
    fn from(err: SettingsError) -> Self {
        CoreError::from(err).into()
    }
}

impl From<PathError> for CliError {
    fn from(err: PathError) -> Self {
        CoreError::from(err).into()
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
