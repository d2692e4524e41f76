//! Product domain types and payload validation

mod types;
mod validation;

pub use types::{generate_id, NewProduct, Product};
pub use validation::{parse_quantity, ValidationError, ValidationResult};
