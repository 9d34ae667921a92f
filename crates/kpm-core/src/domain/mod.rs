//! Domain types for plugin resolution.
//!
//! Pure data with no infrastructure dependencies.

mod catalog;
mod coordinate;
mod host_version;
mod identifier;

pub use catalog::{CatalogEntry, PluginCatalog};
pub use coordinate::Coordinate;
pub use host_version::{HostVersion, HostVersionError};
pub use identifier::PluginIdentifier;
