//! # HTTP Server
//!
//! Combines the product API, health check and static asset fallback into one
//! axum router, and runs it until Ctrl-C.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::handler::HandlerWithoutStateExt;
use axum::http::HeaderValue;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use super::config::HttpServerConfig;
use super::observability_routes::health_routes;
use super::product_routes::{product_routes, route_not_found, ProductState};
use crate::store::StoreResult;

/// HTTP server for the inventory API
#[derive(Debug)]
pub struct HttpServer {
    config: HttpServerConfig,
    state: Arc<ProductState>,
    router: Router,
}

/// Errors starting or running the server
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid socket address '{addr}': {source}")]
    InvalidAddress {
        addr: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("Failed to prepare database: {0}")]
    Database(#[from] crate::store::StoreError),

    #[error("HTTP server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl HttpServer {
    /// Create a new HTTP server with default configuration
    pub fn new() -> Self {
        Self::with_config(HttpServerConfig::default())
    }

    /// Create a new HTTP server with custom configuration
    pub fn with_config(config: HttpServerConfig) -> Self {
        let state = Arc::new(ProductState::new(config.database_path.clone()));
        let router = Self::build_router(&config, state.clone());
        Self {
            config,
            state,
            router,
        }
    }

    /// Build the combined router with all endpoints
    fn build_router(config: &HttpServerConfig, state: Arc<ProductState>) -> Router {
        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<HeaderValue> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        // Non-API paths fall through to static files; anything the directory
        // cannot answer (missing file, non-GET method) gets the JSON 404.
        let static_files = ServeDir::new(&config.static_dir)
            .call_fallback_on_method_not_allowed(true)
            .fallback(route_not_found.into_service());

        Router::new()
            .merge(health_routes())
            .nest("/api", product_routes(state))
            .fallback_service(static_files)
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Create the database file and products table if missing.
    pub fn prepare_database(&self) -> StoreResult<()> {
        self.state.prepare_database()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Start the HTTP server and serve until Ctrl-C.
    pub async fn start(self) -> Result<(), ServerError> {
        let addr_str = self.config.socket_addr();
        let addr: SocketAddr = addr_str
            .parse()
            .map_err(|source| ServerError::InvalidAddress {
                addr: addr_str.clone(),
                source,
            })?;

        self.prepare_database()?;
        info!(
            database = %self.state.database_path().display(),
            "Inventory database ready"
        );

        let listener = TcpListener::bind(addr).await?;
        info!(%addr, "Inventory server listening on http://{}", addr);
        info!(static_dir = %self.config.static_dir.display(), "Serving static files");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Inventory server stopped");
        Ok(())
    }
}

impl Default for HttpServer {
    fn default() -> Self {
        Self::new()
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
