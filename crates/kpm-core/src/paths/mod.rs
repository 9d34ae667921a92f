//! Path utilities for kpm data directories.
//!
//! - Data root (`--data-dir`, `KPM_DATA_DIR`, or the platform data dir)
//! - Database location
//! - Identifier ledger location
//!
//! No interactive I/O here; adapters decide what to print.

mod error;
mod files;
mod platform;
mod resolver;

pub use error::PathError;
pub use files::{DATABASE_FILE_NAME, IDENTIFIERS_FILE_NAME, database_path, identifiers_file_path};
pub use platform::{DATA_DIR_ENV, data_root};
pub use resolver::ResolvedPaths;
