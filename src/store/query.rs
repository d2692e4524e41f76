//! Read query operations for the product store.

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Row};

use crate::product::Product;

use super::connection::ProductStore;
use super::error::StoreResult;
use super::schema::PRODUCT_COLUMNS;

/// Filter applied by [`ProductStore::list_products`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Case-insensitive substring of name or SKU. Blank means no filter.
    pub search: Option<String>,
    /// Only products whose quantity is at or below `min_stock`
    pub low_stock_only: bool,
}

impl ProductFilter {
    /// Filter by search term only.
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: Some(term.into()),
            ..Default::default()
        }
    }

    /// The trimmed search term, if any is left.
    fn term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }
}

impl ProductStore {
    /// List products newest-first.
    ///
    /// Ties on `created_at` are broken by insertion order (`rowid`).
    pub fn list_products(&self, filter: &ProductFilter) -> StoreResult<Vec<Product>> {
        let sql = format!(
            r#"
            SELECT {PRODUCT_COLUMNS}
            FROM products
            WHERE (?1 IS NULL
                   OR instr(fold_case(name), fold_case(?1)) > 0
                   OR instr(fold_case(sku), fold_case(?1)) > 0)
              AND (?2 = 0 OR quantity <= min_stock)
            ORDER BY created_at DESC, rowid DESC
            "#
        );
        let mut stmt = self.conn.prepare_cached(&sql)?;

        let rows = stmt.query_map(params![filter.term(), filter.low_stock_only], product_from_row)?;
        let products = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(products)
    }

    /// Query a product by id.
    ///
    /// Returns `None` if no product has this id.
    pub fn get_product(&self, id: &str) -> StoreResult<Option<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1");
        let mut stmt = self.conn.prepare_cached(&sql)?;

        match stmt.query_row(params![id], product_from_row) {
            Ok(product) => Ok(Some(product)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Count stored products.
    pub fn count_products(&self) -> StoreResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM products", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

/// Map a row selected with [`PRODUCT_COLUMNS`] to a `Product`.
fn product_from_row(row: &Row<'_>) -> rusqlite::Result<Product> {
    let created_at: String = row.get(6)?;
    Ok(Product {
        id: row.get(0)?,
        name: row.get(1)?,
        sku: row.get(2)?,
        price: row.get(3)?,
        quantity: row.get(4)?,
        min_stock: row.get(5)?,
        created_at: parse_timestamp(&created_at)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(6, Type::Text, Box::new(e)))?,
    })
}

/// Format a timestamp the way it is stored in `created_at`.
pub(crate) fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(value).map(|ts| ts.with_timezone(&Utc))
}
