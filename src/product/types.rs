//! Product record types
//!
//! `Product` is what the store returns and what the API serializes.
//! `NewProduct` is a creation payload that already passed validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A product row as stored in the `products` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub sku: String,
    pub price: f64,
    pub quantity: u32,
    /// Reorder threshold
    pub min_stock: u32,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Whether stock has fallen to or below the reorder threshold.
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.min_stock
    }
}

/// Validated creation payload.
///
/// Built from a request body by `NewProduct::from_json`. `created_at` is
/// assigned by the store at insertion time.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub id: String,
    pub name: String,
    pub sku: String,
    pub price: f64,
    pub quantity: u32,
    pub min_stock: u32,
}

impl NewProduct {
    /// Create a payload with a freshly generated id.
    pub fn new(
        name: impl Into<String>,
        sku: impl Into<String>,
        price: f64,
        quantity: u32,
        min_stock: u32,
    ) -> Self {
        Self {
            id: generate_id(),
            name: name.into(),
            sku: sku.into(),
            price,
            quantity,
            min_stock,
        }
    }

    /// Replace the generated id with a client-supplied one.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }
}

/// Random v4 UUID in hyphenated form.
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
