//! Main commands enum and primary subcommands.

use clap::{Args, Subcommand};

use crate::config_commands::ConfigCommand;

/// Available `kpm` commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Resolve a plugin key to an artifact id and version
    Resolve(ResolveArgs),

    /// Manage the local identifier ledger
    Identifiers {
        #[command(subcommand)]
        command: IdentifiersCommand,
    },

    /// List the plugin catalog for a host version
    Catalog {
        /// Host-platform version (e.g. "0.24.1")
        host_version: String,
        /// Ignore any cached catalog and fetch it again
        #[arg(short, long)]
        force: bool,
        /// Only show this plugin key
        #[arg(long)]
        plugin: Option<String>,
    },

    /// View or change persisted settings
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Show resolved paths for all kpm files
    Paths,
}

/// Arguments for `kpm resolve`.
#[derive(Args, Debug, Clone)]
pub struct ResolveArgs {
    /// Plugin key (e.g. "stripe" or "dev:stripe")
    pub plugin_key: String,
    /// Host-platform version; falls back to the `default_host_version` setting
    #[arg(long)]
    pub host_version: Option<String>,
    /// Artifact id already known to the caller
    #[arg(long)]
    pub artifact_id: Option<String>,
    /// Version already known to the caller
    #[arg(long)]
    pub version: Option<String>,
    /// Skip the identifier ledger and refetch the catalog
    #[arg(short, long)]
    pub force: bool,
    /// Print the full resolution report as JSON
    #[arg(long)]
    pub json: bool,
    /// Record the resolved coordinate in the identifier ledger
    #[arg(long)]
    pub save: bool,
}

/// Identifier ledger subcommands.
#[derive(Subcommand)]
pub enum IdentifiersCommand {
    /// List all recorded identifiers
    List,
    /// Show one identifier record
    Show {
        /// Plugin key
        plugin_key: String,
    },
    /// Add or replace an identifier record
    Add(AddIdentifierArgs),
    /// Remove an identifier record
    Remove {
        /// Plugin key
        plugin_key: String,
    },
}

/// Arguments for `kpm identifiers add`.
#[derive(Args, Debug, Clone)]
pub struct AddIdentifierArgs {
    /// Plugin key
    pub plugin_key: String,
    /// Maven artifact id
    #[arg(long)]
    pub artifact_id: String,
    /// Plugin version
    #[arg(long)]
    pub version: String,
    /// Maven group id
    #[arg(long)]
    pub group_id: Option<String>,
    /// Artifact packaging (jar, tar.gz)
    #[arg(long)]
    pub packaging: Option<String>,
    /// Maven classifier
    #[arg(long)]
    pub classifier: Option<String>,
    /// Plugin language (java, ruby)
    #[arg(long)]
    pub language: Option<String>,
}
