//! CLI entry point - the composition root.
//!
//! The only place where infrastructure is wired together via bootstrap.
//! Command dispatch routes to handlers, which work through `CliContext`.

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use kpm_cli::{Cli, CliConfig, Commands, bootstrap, exit_code_for, handlers};

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables before clap reads KPM_* defaults
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(exit_code_for(&err))
        }
    }
}

/// Install the fmt subscriber on stderr so `--json` output stays clean.
///
/// `--verbose` forces `debug`; otherwise `RUST_LOG` applies, defaulting to
/// `warn`.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = CliConfig::from_cli(&cli);
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    // Paths needs no database
    if matches!(command, Commands::Paths) {
        return handlers::paths::execute(config.data_dir.as_deref());
    }

    let ctx = bootstrap(config).await?;

    match command {
        Commands::Resolve(args) => handlers::resolve::execute(&ctx, args).await,
        Commands::Identifiers { command } => handlers::identifiers::execute(&ctx, command).await,
        Commands::Catalog {
            host_version,
            force,
            plugin,
        } => handlers::catalog::execute(&ctx, &host_version, force, plugin.as_deref()).await,
        Commands::Config { command } => handlers::config::execute(&ctx, command).await,
        Commands::Paths => handlers::paths::execute(Some(ctx.paths().data_root.as_path())),
    }
}
