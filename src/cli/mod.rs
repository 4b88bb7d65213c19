//! Command-line interface for specforge.
//!
//! Provides the `extract`, `check`, and `branch` commands.

mod commands;

pub use commands::{parse_cli, run_with_cli, Cli, Commands};
