//! Kill Bill plugin directory client for kpm.
//!
//! Implements [`kpm_core::CatalogProvider`] on top of the upstream
//! `plugins_directory.yml`: fetch (with retry), parse, reduce to one host
//! version line, cache per line.
//!
//! ```no_run
//! use kpm_core::CatalogProvider;
//! use kpm_directory::{DefaultDirectoryClient, DirectoryClientConfig};
//!
//! # async fn example() -> Result<(), kpm_core::CatalogError> {
//! let client = DefaultDirectoryClient::new(&DirectoryClientConfig::new())?;
//! let catalog = client.get_catalog("0.24.1", false).await?;
//! println!("{} plugins", catalog.len());
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]
// DirectoryClient<B> is used through DefaultDirectoryClient and the port trait
#![allow(private_interfaces, private_bounds)]

mod cache;
mod client;
mod config;
mod error;
mod http;
mod parsing;
mod port;

// ============================================================================
// Public API
// ============================================================================

pub use client::{DefaultDirectoryClient, DirectoryClient};
pub use config::DirectoryClientConfig;
