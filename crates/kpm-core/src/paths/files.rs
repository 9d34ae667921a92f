//! Locations of the files kept under the data root.

use std::path::{Path, PathBuf};

use super::error::PathError;
use super::platform::ensure_dir;

/// File name of the `SQLite` database.
pub const DATABASE_FILE_NAME: &str = "kpm.db";

/// File name of the JSON identifier ledger.
pub const IDENTIFIERS_FILE_NAME: &str = "plugin_identifiers.json";

/// Path to the database file, creating `data/` if needed.
pub fn database_path(data_root: &Path) -> Result<PathBuf, PathError> {
    let dir = data_root.join("data");
    ensure_dir(&dir)?;
    Ok(dir.join(DATABASE_FILE_NAME))
}

/// Path to the identifier ledger, creating `plugins/` if needed.
///
/// The file itself is not created; a missing ledger reads as empty.
pub fn identifiers_file_path(data_root: &Path) -> Result<PathBuf, PathError> {
    let dir = data_root.join("plugins");
    ensure_dir(&dir)?;
    Ok(dir.join(IDENTIFIERS_FILE_NAME))
}
