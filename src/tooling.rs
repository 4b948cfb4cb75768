//! Tooling
//!
//! Command-line interface and text formatting for chains and reports.

pub mod cli;
pub mod format;

pub use cli::{Cli, CliContext, Commands, OutputFormat};
