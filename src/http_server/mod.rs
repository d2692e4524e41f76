//! # Inventory HTTP Server Module
//!
//! Axum application exposing the product API.
//!
//! # Endpoints
//!
//! - `GET /api/products?q=&lowStock=` - List or search products, newest first
//! - `POST /api/products` - Create a product
//! - `PATCH /api/products/{id}/quantity` - Set a product's quantity
//! - `DELETE /api/products/{id}` - Delete a product
//! - `/health` - Health check
//!
//! Any other GET is served from the static directory.

pub mod config;
pub mod errors;
pub mod observability_routes;
pub mod product_routes;
pub mod server;

pub use config::{ConfigError, HttpServerConfig};
pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use product_routes::ProductState;
pub use server::{HttpServer, ServerError};
