//! Shared CLI presentation utilities.
//!
//! Format-only: functions here turn domain values into terminal text and
//! never reach for repositories or the network.

pub mod report;
pub mod tables;

pub use report::{format_identifier, format_report};
pub use tables::{format_optional, print_separator, truncate_string};
