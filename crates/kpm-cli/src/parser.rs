//! Main CLI parser and top-level argument handling.

use std::path::PathBuf;

use clap::Parser;

use crate::commands::Commands;

/// Resolve and manage Kill Bill plugin artifacts.
#[derive(Parser)]
#[command(name = "kpm")]
#[command(about = "Resolve Kill Bill plugin keys to artifact coordinates")]
#[command(version)]
pub struct Cli {
    /// Override the data directory for this invocation
    #[arg(long = "data-dir", env = "KPM_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Override the plugin directory URL for this invocation
    #[arg(long = "catalog-url", env = "KPM_CATALOG_URL", global = true)]
    pub catalog_url: Option<String>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    use crate::commands::IdentifiersCommand;
    use crate::config_commands::ConfigCommand;

    #[test]
    fn test_cli_parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_args() {
        let cli = Cli::parse_from(["kpm", "--verbose", "--data-dir", "/tmp/kpm", "paths"]);
        assert!(cli.verbose);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/kpm")));
        assert!(matches!(cli.command, Some(Commands::Paths)));
    }

    #[test]
    fn test_global_args_after_subcommand() {
        let cli = Cli::parse_from(["kpm", "catalog", "0.24.1", "-v", "--catalog-url", "file:///x.yml"]);
        assert!(cli.verbose);
        assert_eq!(cli.catalog_url.as_deref(), Some("file:///x.yml"));
    }

    #[test]
    fn test_resolve_args() {
        let cli = Cli::parse_from([
            "kpm",
            "resolve",
            "stripe",
            "--host-version",
            "0.24.1",
            "--artifact-id",
            "stripe-plugin",
            "--force",
            "--json",
        ]);
        let Some(Commands::Resolve(args)) = cli.command else {
            panic!("expected resolve");
        };
        assert_eq!(args.plugin_key, "stripe");
        assert_eq!(args.host_version.as_deref(), Some("0.24.1"));
        assert_eq!(args.artifact_id.as_deref(), Some("stripe-plugin"));
        assert_eq!(args.version, None);
        assert!(args.force);
        assert!(args.json);
        assert!(!args.save);
    }

    #[test]
    fn test_identifiers_add_requires_fields() {
        assert!(Cli::try_parse_from(["kpm", "identifiers", "add", "stripe"]).is_err());

        let cli = Cli::parse_from([
            "kpm",
            "identifiers",
            "add",
            "stripe",
            "--artifact-id",
            "stripe-plugin",
            "--version",
            "7.0.0",
            "--group-id",
            "org.kill-bill.billing.plugin.java",
        ]);
        let Some(Commands::Identifiers {
            command: IdentifiersCommand::Add(args),
        }) = cli.command
        else {
            panic!("expected identifiers add");
        };
        assert_eq!(args.plugin_key, "stripe");
        assert_eq!(args.version, "7.0.0");
        assert_eq!(
            args.group_id.as_deref(),
            Some("org.kill-bill.billing.plugin.java")
        );
    }

    #[test]
    fn test_config_set_parses_backend() {
        let cli = Cli::parse_from(["kpm", "config", "set", "--identifier-backend", "json"]);
        let Some(Commands::Config {
            command: ConfigCommand::Set(args),
        }) = cli.command
        else {
            panic!("expected config set");
        };
        assert_eq!(
            args.identifier_backend,
            Some(kpm_core::IdentifierBackend::Json)
        );

        assert!(
            Cli::try_parse_from(["kpm", "config", "set", "--identifier-backend", "redis"])
                .is_err()
        );
    }
}
