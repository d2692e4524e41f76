//! HTTP Server Configuration
//!
//! Host, port, database location, static assets, CORS and logging settings.
//! Loaded from an optional JSON file; every field has a default.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::observability::LoggingConfig;

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpServerConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 4173)
    #[serde(default = "default_port")]
    pub port: u16,

    /// SQLite database file (default: "inventory.db")
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,

    /// Directory served for non-API GET requests (default: "public")
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,

    /// CORS allowed origins (default: empty, which allows any origin)
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Log level and format
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    4173
}

fn default_database_path() -> PathBuf {
    PathBuf::from("inventory.db")
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("public")
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            database_path: default_database_path(),
            static_dir: default_static_dir(),
            cors_origins: Vec::new(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Errors loading a configuration file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON in '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl HttpServerConfig {
    /// Create a new config with specified port
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = HttpServerConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 4173);
        assert_eq!(config.database_path, PathBuf::from("inventory.db"));
        assert!(config.cors_origins.is_empty());
    }

    #[test]
    fn test_socket_addr() {
        let config = HttpServerConfig::with_port(8080);
        assert_eq!(config.socket_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("inventory.json");
        fs::write(&path, r#"{"port": 9000, "database_path": "/tmp/stock.db"}"#).unwrap();

        let config = HttpServerConfig::load(&path).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.database_path, PathBuf::from("/tmp/stock.db"));
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.static_dir, PathBuf::from("public"));
    }

    #[test]
    fn test_invalid_json_is_reported() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("broken.json");
        fs::write(&path, "{port: }").unwrap();

        assert!(matches!(
            HttpServerConfig::load(&path),
            Err(ConfigError::Parse { .. })
        ));
    }
}
