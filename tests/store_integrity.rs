//! Store Integrity Tests
//!
//! Exercises the SQLite store the way the server does: a fresh connection
//! per operation against one database file.
//! - Writes are visible to later connections
//! - SKU uniqueness holds across connections
//! - Listing order and filters

use inventory::product::NewProduct;
use inventory::store::{OpenMode, ProductFilter, ProductStore, StoreError};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_db() -> (TempDir, std::path::PathBuf) {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("inventory.db");
    let store = ProductStore::open(&path, OpenMode::Create).unwrap();
    store.create_schema().unwrap();
    (tmp, path)
}

fn connect(path: &std::path::Path) -> ProductStore {
    ProductStore::open(path, OpenMode::ReadWrite).unwrap()
}

fn skus(products: &[inventory::product::Product]) -> Vec<&str> {
    products.iter().map(|p| p.sku.as_str()).collect()
}

// =============================================================================
// Persistence Tests
// =============================================================================

/// A product inserted on one connection is read back on another.
#[test]
fn test_insert_visible_to_new_connection() {
    let (_tmp, path) = setup_db();

    let new = NewProduct::new("Taladro", "TAL-1", 899.0, 3, 1);
    let stored = connect(&path).insert_product(&new).unwrap();

    let reread = connect(&path).get_product(&new.id).unwrap().unwrap();
    assert_eq!(reread, stored);
    assert_eq!(reread.name, "Taladro");
}

/// Quantity changes persist and touch no other field.
#[test]
fn test_update_quantity_only_changes_quantity() {
    let (_tmp, path) = setup_db();

    let new = NewProduct::new("Sierra", "SIE-1", 120.25, 8, 4);
    let before = connect(&path).insert_product(&new).unwrap();

    connect(&path).update_quantity(&new.id, 1).unwrap();

    let after = connect(&path).get_product(&new.id).unwrap().unwrap();
    assert_eq!(after.quantity, 1);
    assert_eq!(after.name, before.name);
    assert_eq!(after.sku, before.sku);
    assert_eq!(after.price, before.price);
    assert_eq!(after.min_stock, before.min_stock);
    assert_eq!(after.created_at, before.created_at);
    assert!(after.is_low_stock());
}

// =============================================================================
// Uniqueness Tests
// =============================================================================

/// Duplicate SKU from a second connection leaves the first row intact.
#[test]
fn test_sku_unique_across_connections() {
    let (_tmp, path) = setup_db();

    let first = NewProduct::new("Primero", "SKU-X", 1.0, 1, 0);
    connect(&path).insert_product(&first).unwrap();

    let err = connect(&path)
        .insert_product(&NewProduct::new("Segundo", "SKU-X", 2.0, 2, 0))
        .unwrap_err();
    assert!(matches!(err, StoreError::DuplicateSku(_)));

    let store = connect(&path);
    assert_eq!(store.count_products().unwrap(), 1);
    assert_eq!(store.get_product(&first.id).unwrap().unwrap().name, "Primero");
}

/// SKU comparison is exact: differently-cased SKUs are distinct.
#[test]
fn test_sku_uniqueness_is_case_sensitive() {
    let (_tmp, path) = setup_db();
    let store = connect(&path);

    store
        .insert_product(&NewProduct::new("a", "abc-1", 1.0, 1, 0))
        .unwrap();
    store
        .insert_product(&NewProduct::new("b", "ABC-1", 1.0, 1, 0))
        .unwrap();
    assert_eq!(store.count_products().unwrap(), 2);
}

// =============================================================================
// Listing Tests
// =============================================================================

/// Newest insert comes first even within the same millisecond.
#[test]
fn test_list_is_newest_first() {
    let (_tmp, path) = setup_db();
    let store = connect(&path);

    for sku in ["A", "B", "C", "D"] {
        store
            .insert_product(&NewProduct::new(format!("item {sku}"), sku, 1.0, 1, 0))
            .unwrap();
    }

    let all = store.list_products(&ProductFilter::default()).unwrap();
    assert_eq!(skus(&all), vec!["D", "C", "B", "A"]);
}

/// Search is case-insensitive over name and SKU and trims the term.
#[test]
fn test_search_filter() {
    let (_tmp, path) = setup_db();
    let store = connect(&path);

    store
        .insert_product(&NewProduct::new("Pintura Blanca", "PIN-B", 250.0, 5, 2))
        .unwrap();
    store
        .insert_product(&NewProduct::new("Rodillo", "ROD-pin", 80.0, 5, 2))
        .unwrap();
    store
        .insert_product(&NewProduct::new("Cubeta", "CUB-1", 40.0, 5, 2))
        .unwrap();

    let found = store.list_products(&ProductFilter::search("  PIN ")).unwrap();
    assert_eq!(skus(&found), vec!["ROD-pin", "PIN-B"]);

    let found = store.list_products(&ProductFilter::search("blanca")).unwrap();
    assert_eq!(skus(&found), vec!["PIN-B"]);
}

/// Case folding covers accented letters, not only ASCII.
#[test]
fn test_search_folds_accented_letters() {
    let (_tmp, path) = setup_db();
    let store = connect(&path);

    store
        .insert_product(&NewProduct::new("Árbol de levas", "ÑAN-1", 1.0, 1, 0))
        .unwrap();
    store
        .insert_product(&NewProduct::new("Arbol liso", "ARB-2", 1.0, 1, 0))
        .unwrap();

    for term in ["árbol", "ÁRBOL", "Árbol"] {
        let found = store.list_products(&ProductFilter::search(term)).unwrap();
        assert_eq!(skus(&found), vec!["ÑAN-1"], "term {term:?}");
    }

    let found = connect(&path)
        .list_products(&ProductFilter::search("ñan"))
        .unwrap();
    assert_eq!(skus(&found), vec!["ÑAN-1"]);
}

/// Low-stock filter uses an inclusive threshold.
#[test]
fn test_low_stock_filter() {
    let (_tmp, path) = setup_db();
    let store = connect(&path);

    store
        .insert_product(&NewProduct::new("Justo", "EQ", 1.0, 3, 3))
        .unwrap();
    store
        .insert_product(&NewProduct::new("Sobra", "OK", 1.0, 9, 3))
        .unwrap();
    store
        .insert_product(&NewProduct::new("Falta", "LOW", 1.0, 0, 3))
        .unwrap();

    let filter = ProductFilter {
        low_stock_only: true,
        ..Default::default()
    };
    let found = store.list_products(&filter).unwrap();
    assert_eq!(skus(&found), vec!["LOW", "EQ"]);
}

// =============================================================================
// Delete Tests
// =============================================================================

/// Deleting an unknown id is NotFound and deletes nothing.
#[test]
fn test_delete_unknown_id() {
    let (_tmp, path) = setup_db();
    let store = connect(&path);

    store
        .insert_product(&NewProduct::new("Uno", "U-1", 1.0, 1, 0))
        .unwrap();

    let err = store.delete_product("missing").unwrap_err();
    assert!(matches!(err, StoreError::NotFound(id) if id == "missing"));
    assert_eq!(store.count_products().unwrap(), 1);
}
