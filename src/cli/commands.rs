//! CLI command implementations
//!
//! `init` prepares the database and exits; `serve` boots logging, the
//! database and the HTTP server, then blocks until shutdown.

use std::path::{Path, PathBuf};

use serde_json::json;
use tracing::info;

use crate::http_server::{HttpServer, HttpServerConfig};
use crate::observability::init_logging;
use crate::store::{OpenMode, ProductStore};

use super::args::{Command, ServeArgs};
use super::errors::{CliError, CliResult};

/// Parse CLI arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Init { config, db } => init(config.as_deref(), db),
        Command::Serve(args) => serve(args),
    }
}

/// Load the config file if one was given, defaults otherwise.
pub fn load_config(path: Option<&Path>) -> CliResult<HttpServerConfig> {
    match path {
        Some(path) => Ok(HttpServerConfig::load(path)?),
        None => Ok(HttpServerConfig::default()),
    }
}

/// Apply `serve` flags on top of the loaded configuration.
pub fn apply_overrides(mut config: HttpServerConfig, args: &ServeArgs) -> HttpServerConfig {
    if let Some(host) = &args.host {
        config.host = host.clone();
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(db) = &args.db {
        config.database_path = db.clone();
    }
    if let Some(dir) = &args.static_dir {
        config.static_dir = dir.clone();
    }
    if let Some(format) = args.log_format {
        config.logging.format = format;
    }
    config
}

/// Create the database file and products table.
///
/// Safe to run against an existing database.
pub fn init(config_path: Option<&Path>, db: Option<PathBuf>) -> CliResult<()> {
    let mut config = load_config(config_path)?;
    if let Some(db) = db {
        config.database_path = db;
    }

    let store = ProductStore::open(&config.database_path, OpenMode::Create)?;
    store.create_schema()?;
    let products = store.count_products()?;

    println!(
        "{}",
        json!({
            "status": "initialized",
            "database": config.database_path.display().to_string(),
            "products": products,
        })
    );
    Ok(())
}

/// Start the HTTP server with the merged configuration
pub fn serve(args: ServeArgs) -> CliResult<()> {
    let config = apply_overrides(load_config(args.config.as_deref())?, &args);
    init_logging(&config.logging)?;

    info!(
        addr = %config.socket_addr(),
        database = %config.database_path.display(),
        "Starting inventory server"
    );
    let server = HttpServer::with_config(config);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(server.start())?;

    Ok(())
}
