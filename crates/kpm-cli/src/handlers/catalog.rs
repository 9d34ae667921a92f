//! Catalog command handler.
//!
//! Lists what the plugin directory offers for one host version.

use anyhow::Result;

use kpm_core::{CatalogEntry, PluginCatalog};

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::{format_optional, print_separator, truncate_string};

/// Execute the catalog command.
pub async fn execute(
    ctx: &CliContext,
    host_version: &str,
    force: bool,
    plugin: Option<&str>,
) -> Result<()> {
    let catalog = ctx
        .catalog()
        .get_catalog(host_version, force)
        .await
        .map_err(CliError::from)?;

    let entries = select(&catalog, plugin);
    if entries.is_empty() {
        match plugin {
            Some(key) => println!(
                "Plugin '{key}' is not in the catalog for {host_version} (line {}).",
                catalog.version_line
            ),
            None => println!(
                "No plugins in the catalog for {host_version} (line {}).",
                catalog.version_line
            ),
        }
        return Ok(());
    }

    println!(
        "{} plugin(s) for {host_version} (line {}):\n",
        entries.len(),
        catalog.version_line
    );
    println!("{:<24} {:<36} {:<12} Group", "Plugin", "Artifact", "Version");
    print_separator(100);
    for entry in entries {
        println!(
            "{:<24} {:<36} {:<12} {}",
            truncate_string(&entry.plugin_key, 23),
            truncate_string(&format_optional(entry.coordinate.artifact_id(), "--"), 35),
            truncate_string(&format_optional(entry.coordinate.version(), "--"), 11),
            format_optional(entry.group_id.as_deref(), "--"),
        );
    }
    Ok(())
}

/// Entries to display, optionally narrowed to one plugin key.
fn select<'a>(catalog: &'a PluginCatalog, plugin: Option<&str>) -> Vec<&'a CatalogEntry> {
    match plugin {
        Some(key) => catalog.find(key).into_iter().collect(),
        None => catalog.entries.iter().collect(),
    }
}
