//! Product HTTP Routes
//!
//! CRUD endpoints over the `products` table. Each request opens its own
//! store connection on a blocking worker and drops it before responding.

use std::path::{Path as FsPath, PathBuf};
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, patch},
    Json, Router,
};
use serde_json::Value;
use tracing::info;

use crate::product::{parse_quantity, NewProduct, Product};
use crate::store::{OpenMode, ProductFilter, ProductStore, StoreResult};

use super::errors::{ApiError, ApiResult};

// ==================
// Shared State
// ==================

/// Product state shared across handlers
///
/// Only the database location is shared; connections are per request.
#[derive(Debug, Clone)]
pub struct ProductState {
    database_path: PathBuf,
}

impl ProductState {
    pub fn new(database_path: impl Into<PathBuf>) -> Self {
        Self {
            database_path: database_path.into(),
        }
    }

    /// Create the database file and table if they do not exist yet.
    pub fn prepare_database(&self) -> StoreResult<()> {
        let store = ProductStore::open(&self.database_path, OpenMode::Create)?;
        store.create_schema()
    }

    pub fn database_path(&self) -> &FsPath {
        &self.database_path
    }

    /// Run one store operation on a fresh connection.
    async fn with_store<T, F>(&self, op: F) -> ApiResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&ProductStore) -> StoreResult<T> + Send + 'static,
    {
        let path = self.database_path.clone();
        tokio::task::spawn_blocking(move || {
            let store = ProductStore::open(&path, OpenMode::ReadWrite)?;
            op(&store)
        })
        .await
        .map_err(|e| ApiError::Internal(format!("store task failed: {}", e)))?
        .map_err(ApiError::from)
    }
}

// ==================
// Request Types
// ==================

/// Build the list filter from raw query pairs.
///
/// Lenient like a browser form: the first `q` wins, later ones are ignored,
/// and `lowStock` only filters when it is exactly `true`. Unknown keys are
/// ignored, so a query string never fails the request.
pub fn filter_from_query(pairs: &[(String, String)]) -> ProductFilter {
    let search = pairs
        .iter()
        .find(|(key, _)| key == "q")
        .map(|(_, value)| value.clone());
    let low_stock_only = pairs
        .iter()
        .find(|(key, _)| key == "lowStock")
        .is_some_and(|(_, value)| value == "true");

    ProductFilter {
        search,
        low_stock_only,
    }
}

// ==================
// Product Routes
// ==================

/// Create product routes
pub fn product_routes(state: Arc<ProductState>) -> Router {
    Router::new()
        .route(
            "/products",
            get(list_products_handler)
                .post(create_product_handler)
                .fallback(route_not_found),
        )
        .route(
            "/products/{id}",
            delete(delete_product_handler).fallback(route_not_found),
        )
        .route(
            "/products/{id}/quantity",
            patch(update_quantity_handler).fallback(route_not_found),
        )
        .with_state(state)
}

/// Fallback for unknown paths and unsupported methods.
pub async fn route_not_found() -> ApiError {
    ApiError::RouteNotFound
}

// ==================
// Helper Functions
// ==================

/// Parse a request body as JSON regardless of its content type.
///
/// An empty body reads as an empty object.
fn parse_json_body(body: &Bytes) -> Result<Value, serde_json::Error> {
    if body.is_empty() {
        return Ok(Value::Object(Default::default()));
    }
    serde_json::from_slice(body)
}

// ==================
// Handlers
// ==================

async fn list_products_handler(
    State(state): State<Arc<ProductState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> ApiResult<Json<Vec<Product>>> {
    let filter = filter_from_query(&pairs);

    let products = state
        .with_store(move |store| store.list_products(&filter))
        .await?;
    Ok(Json(products))
}

async fn create_product_handler(
    State(state): State<Arc<ProductState>>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<Product>)> {
    let payload = parse_json_body(&body).map_err(ApiError::invalid_product)?;
    let new_product = NewProduct::from_json(&payload)?;

    let product = state
        .with_store(move |store| store.insert_product(&new_product))
        .await?;

    info!(id = %product.id, sku = %product.sku, "Product created");
    Ok((StatusCode::CREATED, Json(product)))
}

async fn update_quantity_handler(
    State(state): State<Arc<ProductState>>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<StatusCode> {
    let quantity = parse_json_body(&body)
        .map_err(ApiError::invalid_quantity)
        .and_then(|payload| parse_quantity(&payload).map_err(ApiError::invalid_quantity))?;

    let target = id.clone();
    state
        .with_store(move |store| store.update_quantity(&target, quantity))
        .await?;

    info!(id = %id, quantity, "Product quantity updated");
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_product_handler(
    State(state): State<Arc<ProductState>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let target = id.clone();
    state
        .with_store(move |store| store.delete_product(&target))
        .await?;

    info!(id = %id, "Product deleted");
    Ok(StatusCode::NO_CONTENT)
}
