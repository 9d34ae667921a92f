//! All resolved paths in one struct, for the `kpm paths` command.

use std::fmt;
use std::path::{Path, PathBuf};

use super::{PathError, data_root, database_path, identifiers_file_path};

/// Every path the application uses, resolved once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    /// Root directory for application data.
    pub data_root: PathBuf,
    /// Path to the `SQLite` database file.
    pub database_path: PathBuf,
    /// Path to the JSON identifier ledger.
    pub identifiers_file: PathBuf,
}

impl ResolvedPaths {
    /// Resolve all paths, honouring an explicit data root override.
    pub fn resolve(explicit_root: Option<&Path>) -> Result<Self, PathError> {
        let data_root = data_root(explicit_root)?;
        Ok(Self {
            database_path: database_path(&data_root)?,
            identifiers_file: identifiers_file_path(&data_root)?,
            data_root,
        })
    }
}

impl fmt::Display for ResolvedPaths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "data_root = {}", self.data_root.display())?;
        writeln!(f, "database_path = {}", self.database_path.display())?;
        write!(f, "identifiers_file = {}", self.identifiers_file.display())
    }
}
