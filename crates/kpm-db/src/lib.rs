//! Storage adapters for kpm.
//!
//! - [`SqliteIdentifierRepository`]: identifier ledger in the local database
//! - [`JsonIdentifierFile`]: identifier ledger as `plugin_identifiers.json`
//! - [`SqliteSettingsRepository`]: application settings
//!
//! [`CoreFactory`] wires them into a [`kpm_core::Repos`].

#![deny(unsafe_code)]

pub mod factory;
pub mod repositories;
pub mod setup;

pub use factory::CoreFactory;

#[cfg(any(test, feature = "test-utils"))]
pub use factory::TestDb;

pub use repositories::{JsonIdentifierFile, SqliteIdentifierRepository, SqliteSettingsRepository};

pub use setup::setup_database;
#[cfg(any(test, feature = "test-utils"))]
pub use setup::setup_test_database;
