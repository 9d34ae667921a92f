//! Settings subcommands.

use clap::{Args, Subcommand};

use kpm_core::IdentifierBackend;

/// Settings management subcommands.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current settings
    Show,
    /// Update one or more settings
    Set(SetSettingsArgs),
    /// Restore every setting to its default
    Reset,
}

/// Values accepted by `kpm config set`.
#[derive(Args, Debug, Clone, Default)]
pub struct SetSettingsArgs {
    /// Plugin directory URL (https:// or file://)
    #[arg(long)]
    pub catalog_url: Option<String>,
    /// Catalog cache lifetime in seconds
    #[arg(long)]
    pub catalog_cache_ttl: Option<u64>,
    /// HTTP request timeout in seconds
    #[arg(long)]
    pub request_timeout: Option<u64>,
    /// Retries for transient fetch failures
    #[arg(long)]
    pub max_retries: Option<u32>,
    /// Identifier ledger backend (sqlite or json)
    #[arg(long)]
    pub identifier_backend: Option<IdentifierBackend>,
    /// Host version used when a command does not name one
    #[arg(long)]
    pub default_host_version: Option<String>,
    /// Forget the default host version
    #[arg(long, conflicts_with = "default_host_version")]
    pub clear_default_host_version: bool,
}
