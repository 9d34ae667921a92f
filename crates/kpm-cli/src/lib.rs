//! The `kpm` command-line adapter.
//!
//! [`bootstrap`] is the composition root: it opens the local database, picks
//! the identifier backend from settings, builds the plugin directory client
//! and hands handlers a ready [`CliContext`].

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

#[cfg(test)]
use async_trait as _;
#[cfg(test)]
use tempfile as _;
#[cfg(test)]
use tokio_test as _;

// Used by main.rs only
use dotenvy as _;
use tokio as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod commands;
pub mod config_commands;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod presentation;

pub use bootstrap::{CliConfig, CliContext, bootstrap, bootstrap_with};
pub use commands::{Commands, IdentifiersCommand};
pub use config_commands::ConfigCommand;
pub use error::{CliError, exit_code_for};
pub use parser::Cli;
