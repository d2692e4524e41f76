//! inventory - product stock HTTP service backed by an embedded SQLite store
//!
//! Modules:
//! - `product`: domain types and payload validation
//! - `store`: SQLite access, one connection per request
//! - `http_server`: axum routes, errors and server lifecycle
//! - `observability`: tracing subscriber setup
//! - `cli`: `init` and `serve` commands

pub mod cli;
pub mod http_server;
pub mod observability;
pub mod product;
pub mod store;
