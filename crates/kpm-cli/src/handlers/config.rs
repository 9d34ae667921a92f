//! Config command handler.
//!
//! Settings live in the database; `set` validates the merged result before
//! saving anything.

use anyhow::Result;

use kpm_core::{Settings, SettingsUpdate, validate_settings};

use crate::bootstrap::CliContext;
use crate::config_commands::{ConfigCommand, SetSettingsArgs};
use crate::error::CliError;

/// Execute a config subcommand.
pub async fn execute(ctx: &CliContext, command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Show => {
            let settings = ctx.settings_repo().load().await.map_err(CliError::from)?;
            print_settings(&settings);
            if ctx.settings().catalog_url != settings.catalog_url {
                println!(
                    "  (catalog_url overridden for this run: {})",
                    ctx.settings().effective_catalog_url()
                );
            }
            Ok(())
        }
        ConfigCommand::Set(args) => {
            let update = update_from_args(args);
            if update.is_empty() {
                println!("No settings provided. Use --help to see available options.");
                return Ok(());
            }
            let updated = apply(ctx, &update).await?;
            println!("✓ Settings updated successfully:");
            print_settings(&updated);
            Ok(())
        }
        ConfigCommand::Reset => {
            let defaults = Settings::with_defaults();
            ctx.settings_repo()
                .save(&defaults)
                .await
                .map_err(CliError::from)?;
            println!("✓ Settings reset to defaults");
            Ok(())
        }
    }
}

fn print_settings(settings: &Settings) {
    println!("Current settings:");
    println!("  catalog_url:            {}", settings.effective_catalog_url());
    println!(
        "  catalog_cache_ttl_secs: {}",
        settings.effective_catalog_cache_ttl_secs()
    );
    println!(
        "  request_timeout_secs:   {}",
        settings.effective_request_timeout_secs()
    );
    println!("  max_retries:            {}", settings.effective_max_retries());
    println!(
        "  identifier_backend:     {}",
        settings.effective_identifier_backend()
    );
    println!(
        "  default_host_version:   {}",
        settings.default_host_version.as_deref().unwrap_or("(none)")
    );
}

fn update_from_args(args: SetSettingsArgs) -> SettingsUpdate {
    SettingsUpdate {
        catalog_url: args.catalog_url.map(Some),
        catalog_cache_ttl_secs: args.catalog_cache_ttl.map(Some),
        request_timeout_secs: args.request_timeout.map(Some),
        max_retries: args.max_retries.map(Some),
        identifier_backend: args.identifier_backend.map(Some),
        default_host_version: if args.clear_default_host_version {
            Some(None)
        } else {
            args.default_host_version.map(Some)
        },
    }
}

/// Merge, validate and persist an update. Nothing is saved if validation fails.
pub(crate) async fn apply(ctx: &CliContext, update: &SettingsUpdate) -> Result<Settings> {
    let mut settings = ctx.settings_repo().load().await.map_err(CliError::from)?;
    settings.merge(update);
    validate_settings(&settings).map_err(CliError::from)?;
    ctx.settings_repo()
        .save(&settings)
        .await
        .map_err(CliError::from)?;
    tracing::debug!(?update, "Settings saved");
    Ok(settings)
}
