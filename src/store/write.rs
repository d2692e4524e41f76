//! Write operations for the product store.

use chrono::Utc;
use rusqlite::{ffi, params};
use tracing::debug;

use crate::product::{NewProduct, Product};

use super::connection::ProductStore;
use super::error::{StoreError, StoreResult};
use super::query::format_timestamp;

impl ProductStore {
    /// Insert a new product and return it as stored.
    ///
    /// The SKU and id must both be unused; the constraint that fails decides
    /// which duplicate error is returned.
    pub fn insert_product(&self, product: &NewProduct) -> StoreResult<Product> {
        let created_at = format_timestamp(Utc::now());

        self.conn
            .execute(
                r#"
                INSERT INTO products (id, name, sku, price, quantity, min_stock, created_at)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                "#,
                params![
                    product.id,
                    product.name,
                    product.sku,
                    product.price,
                    product.quantity,
                    product.min_stock,
                    created_at,
                ],
            )
            .map_err(|e| classify_insert_error(e, product))?;

        debug!(id = %product.id, sku = %product.sku, "Inserted product");

        self.get_product(&product.id)?
            .ok_or_else(|| StoreError::NotFound(product.id.clone()))
    }

    /// Set the quantity of an existing product.
    pub fn update_quantity(&self, id: &str, quantity: u32) -> StoreResult<()> {
        let changed = self.conn.execute(
            "UPDATE products SET quantity = ?1 WHERE id = ?2",
            params![quantity, id],
        )?;

        if changed == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }

    /// Delete a product by id.
    pub fn delete_product(&self, id: &str) -> StoreResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM products WHERE id = ?1", params![id])?;

        if changed == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

fn classify_insert_error(err: rusqlite::Error, product: &NewProduct) -> StoreError {
    if let rusqlite::Error::SqliteFailure(failure, _) = &err {
        match failure.extended_code {
            ffi::SQLITE_CONSTRAINT_UNIQUE => return StoreError::DuplicateSku(product.sku.clone()),
            ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
                return StoreError::DuplicateId(product.id.clone())
            }
            _ => {}
        }
    }
    StoreError::Sqlite(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_returns_stored_row() {
        let store = ProductStore::open_memory().unwrap();
        let new = NewProduct::new("Cinta", "CIN-1", 35.5, 4, 2);

        let stored = store.insert_product(&new).unwrap();
        assert_eq!(stored.id, new.id);
        assert_eq!(stored.name, "Cinta");
        assert_eq!(stored.price, 35.5);
        assert_eq!(stored.quantity, 4);
        assert_eq!(stored.min_stock, 2);
        assert_eq!(store.get_product(&new.id).unwrap(), Some(stored));
    }

    #[test]
    fn test_duplicate_sku() {
        let store = ProductStore::open_memory().unwrap();
        store
            .insert_product(&NewProduct::new("A", "SKU-1", 1.0, 1, 0))
            .unwrap();

        let err = store
            .insert_product(&NewProduct::new("B", "SKU-1", 2.0, 2, 0))
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateSku(sku) if sku == "SKU-1"));
        assert_eq!(store.count_products().unwrap(), 1);
    }

    #[test]
    fn test_duplicate_id() {
        let store = ProductStore::open_memory().unwrap();
        store
            .insert_product(&NewProduct::new("A", "SKU-1", 1.0, 1, 0).with_id("same"))
            .unwrap();

        let err = store
            .insert_product(&NewProduct::new("B", "SKU-2", 1.0, 1, 0).with_id("same"))
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateId(id) if id == "same"));
    }

    #[test]
    fn test_update_quantity() {
        let store = ProductStore::open_memory().unwrap();
        let new = NewProduct::new("A", "SKU-1", 1.0, 1, 0);
        store.insert_product(&new).unwrap();

        store.update_quantity(&new.id, 40).unwrap();
        assert_eq!(store.get_product(&new.id).unwrap().unwrap().quantity, 40);

        let err = store.update_quantity("nope", 1).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn test_delete_product() {
        let store = ProductStore::open_memory().unwrap();
        let new = NewProduct::new("A", "SKU-1", 1.0, 1, 0);
        store.insert_product(&new).unwrap();

        store.delete_product(&new.id).unwrap();
        assert_eq!(store.get_product(&new.id).unwrap(), None);
        assert!(matches!(
            store.delete_product(&new.id),
            Err(StoreError::NotFound(_))
        ));
    }
}
