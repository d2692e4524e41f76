//! SQLite-backed product store
//!
//! A single `products` table. Every operation is one statement against a
//! connection owned by the caller; uniqueness of `sku` and `id` is left to the
//! table constraints, so concurrent inserts race safely.

mod connection;
mod error;
mod query;
mod schema;
mod write;

pub use connection::{OpenMode, ProductStore};
pub use error::{StoreError, StoreResult};
pub use query::ProductFilter;
pub use schema::SCHEMA_SQL;
