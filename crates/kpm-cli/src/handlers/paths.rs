//! Paths command handler.
//!
//! Shows where kpm keeps its database and identifier ledger.

use std::path::Path;

use anyhow::Result;

use kpm_core::ResolvedPaths;

use crate::error::CliError;

/// Execute the paths command.
///
/// Runs without opening the database, so it works even when the data
/// directory is broken.
pub fn execute(data_dir: Option<&Path>) -> Result<()> {
    let paths = ResolvedPaths::resolve(data_dir).map_err(CliError::from)?;
    println!("{paths}");
    Ok(())
}
