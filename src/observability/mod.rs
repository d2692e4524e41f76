//! Observability for the inventory service
//!
//! Structured logging through `tracing`. The subscriber is installed once at
//! startup; library code only emits events.

mod logging;

pub use logging::{init_logging, LogFormat, LoggingConfig, LoggingError};
