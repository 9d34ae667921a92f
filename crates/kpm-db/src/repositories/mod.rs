//! Identifier and settings repositories.
//!
//! Storage handles (`SqlitePool`, file paths) stay inside this module and
//! never appear in the port trait signatures.

mod json_identifier_file;
mod row_mappers;
mod sqlite_identifier_repository;
mod sqlite_settings_repository;

pub use json_identifier_file::JsonIdentifierFile;
pub use sqlite_identifier_repository::SqliteIdentifierRepository;
pub use sqlite_settings_repository::SqliteSettingsRepository;
