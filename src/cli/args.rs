//! CLI argument definitions using clap
//!
//! Commands:
//! - inventory init [--config <path>] [--db <path>]
//! - inventory serve [--config <path>] [--host <host>] [--port <port>] [--db <path>] [--static-dir <path>]

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::observability::LogFormat;

/// Inventory - product stock HTTP service backed by SQLite
#[derive(Parser, Debug)]
#[command(name = "inventory")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the database file and products table
    Init {
        /// Path to JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// SQLite database file (overrides config)
        #[arg(long)]
        db: Option<PathBuf>,
    },

    /// Start the HTTP server
    Serve(ServeArgs),
}

/// Flags for `serve`; each one overrides the config file.
#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Path to JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Host to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(long)]
    pub port: Option<u16>,

    /// SQLite database file
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Directory served for non-API GET requests
    #[arg(long)]
    pub static_dir: Option<PathBuf>,

    /// Log output format
    #[arg(long, value_enum)]
    pub log_format: Option<LogFormat>,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_flags() {
        let cli = Cli::try_parse_from([
            "inventory", "serve", "--port", "9000", "--db", "stock.db", "--log-format", "json",
        ])
        .unwrap();

        match cli.command {
            Command::Serve(args) => {
                assert_eq!(args.port, Some(9000));
                assert_eq!(args.db, Some(PathBuf::from("stock.db")));
                assert_eq!(args.log_format, Some(LogFormat::Json));
                assert!(args.config.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_init() {
        let cli = Cli::try_parse_from(["inventory", "init", "--db", "x.db"]).unwrap();
        assert!(matches!(cli.command, Command::Init { db: Some(_), config: None }));
    }
}
