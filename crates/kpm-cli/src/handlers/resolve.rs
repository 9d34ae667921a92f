//! Resolve command handler.

use anyhow::Result;

use kpm_core::{PluginIdentifier, RepositoryError, ResolutionReport, ResolveRequest};

use crate::bootstrap::CliContext;
use crate::commands::ResolveArgs;
use crate::error::CliError;
use crate::presentation::format_report;

/// Execute the resolve command.
///
/// Prints the coordinate and the tier that decided it, or the full report as
/// JSON. Fails with [`CliError::Unresolved`] (exit code 3) when no complete
/// coordinate was found, after printing what is known.
pub async fn execute(ctx: &CliContext, args: ResolveArgs) -> Result<()> {
    let report = run(ctx, &args).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", format_report(&args.plugin_key, &report));
    }

    if !report.is_resolved() {
        return Err(CliError::Unresolved(args.plugin_key).into());
    }
    Ok(())
}

/// Resolve and, with `--save`, record the outcome. Output-free.
pub(crate) async fn run(ctx: &CliContext, args: &ResolveArgs) -> Result<ResolutionReport> {
    let host_version = host_version_for(ctx, args.host_version.as_deref())?;

    let request = ResolveRequest::new(host_version, args.plugin_key.clone())
        .with_known(args.artifact_id.clone(), args.version.clone())
        .with_force_refresh(args.force);

    let report = ctx
        .resolver()
        .resolve_with_report(&request)
        .await
        .map_err(CliError::from)?;

    if args.save {
        if let Some(coordinate) = &report.coordinate {
            save(ctx, &args.plugin_key, coordinate).await?;
        }
    }
    Ok(report)
}

fn host_version_for(ctx: &CliContext, explicit: Option<&str>) -> Result<String, CliError> {
    explicit
        .or(ctx.settings().default_host_version.as_deref())
        .map(String::from)
        .ok_or_else(|| {
            CliError::Arguments(
                "no host version given; pass --host-version or run \
                 `kpm config set --default-host-version <V>`"
                    .to_string(),
            )
        })
}

/// Write the coordinate into the ledger, keeping any other recorded fields.
async fn save(ctx: &CliContext, plugin_key: &str, coordinate: &kpm_core::Coordinate) -> Result<()> {
    let mut record = match ctx.identifiers().get(plugin_key).await {
        Ok(existing) => existing,
        Err(RepositoryError::NotFound(_)) => PluginIdentifier::new(plugin_key, None, None),
        Err(e) => return Err(CliError::from(e).into()),
    };
    record.artifact_id = coordinate.artifact_id().map(String::from);
    record.version = coordinate.version().map(String::from);

    ctx.identifiers()
        .upsert(&record)
        .await
        .map_err(CliError::from)?;
    tracing::info!(%plugin_key, %coordinate, "Saved resolved identifier");
    Ok(())
}
