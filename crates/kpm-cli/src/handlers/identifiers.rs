//! Identifier ledger command handlers.

use anyhow::Result;

use kpm_core::PluginIdentifier;

use crate::bootstrap::CliContext;
use crate::commands::{AddIdentifierArgs, IdentifiersCommand};
use crate::error::CliError;
use crate::presentation::{format_identifier, format_optional, print_separator, truncate_string};

/// Execute an identifiers subcommand.
pub async fn execute(ctx: &CliContext, command: IdentifiersCommand) -> Result<()> {
    match command {
        IdentifiersCommand::List => list(ctx).await,
        IdentifiersCommand::Show { plugin_key } => {
            let record = ctx
                .identifiers()
                .get(&plugin_key)
                .await
                .map_err(CliError::from)?;
            print!("{}", format_identifier(&record));
            Ok(())
        }
        IdentifiersCommand::Add(args) => {
            let key = args.plugin_key.clone();
            add(ctx, args).await?;
            println!("✓ Recorded identifier for '{key}'");
            Ok(())
        }
        IdentifiersCommand::Remove { plugin_key } => {
            ctx.identifiers()
                .remove(&plugin_key)
                .await
                .map_err(CliError::from)?;
            println!("✓ Removed identifier for '{plugin_key}'");
            Ok(())
        }
    }
}

async fn list(ctx: &CliContext) -> Result<()> {
    let records = ctx
        .identifiers()
        .list_identifiers()
        .await
        .map_err(CliError::from)?;

    if records.is_empty() {
        println!("No identifiers recorded.");
        println!("Use 'kpm resolve <plugin-key> --save' or 'kpm identifiers add' to record one.");
        return Ok(());
    }

    println!("Found {} identifier(s):\n", records.len());
    println!(
        "{:<24} {:<36} {:<12} Group",
        "Plugin", "Artifact", "Version"
    );
    print_separator(100);
    for record in &records {
        println!(
            "{:<24} {:<36} {:<12} {}",
            truncate_string(&record.plugin_key, 23),
            truncate_string(&format_optional(record.artifact_id.as_deref(), "--"), 35),
            truncate_string(&format_optional(record.version.as_deref(), "--"), 11),
            format_optional(record.group_id.as_deref(), "--"),
        );
    }
    Ok(())
}

/// Build a record from the arguments and upsert it.
pub(crate) async fn add(ctx: &CliContext, args: AddIdentifierArgs) -> Result<PluginIdentifier> {
    if args.plugin_key.trim().is_empty() {
        return Err(CliError::Arguments("plugin key cannot be empty".to_string()).into());
    }

    let record = PluginIdentifier {
        plugin_key: args.plugin_key,
        plugin_name: None,
        group_id: args.group_id,
        artifact_id: Some(args.artifact_id),
        packaging: args.packaging,
        classifier: args.classifier,
        version: Some(args.version),
        language: args.language,
    };

    ctx.identifiers()
        .upsert(&record)
        .await
        .map_err(CliError::from)?;
    Ok(record)
}
