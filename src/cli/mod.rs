//! CLI module for the inventory service
//!
//! Provides command-line interface for:
//! - init: Create the database and products table
//! - serve: Run the HTTP server

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command, ServeArgs};
pub use commands::{apply_overrides, init, load_config, run, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
