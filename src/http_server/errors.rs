//! # API Errors
//!
//! Every failure a handler can produce, with its HTTP status and the
//! message returned to the client as `{"message": "..."}`.
//! Client messages are fixed strings; the underlying detail is only logged.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error};

use crate::product::ValidationError;
use crate::store::StoreError;

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// API errors
#[derive(Debug, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Product body could not be parsed or validated
    #[error("Invalid product: {0}")]
    InvalidProduct(String),

    /// Quantity body could not be parsed or validated
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    /// No product with this id
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// No route for this method and path
    #[error("Route not found")]
    RouteNotFound,

    /// SKU already used by another product
    #[error("Duplicate SKU: {0}")]
    DuplicateSku(String),

    /// Id already used by another product
    #[error("Duplicate product id: {0}")]
    DuplicateId(String),

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Storage or runtime failure
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Invalid product payload.
    pub fn invalid_product(err: impl std::fmt::Display) -> Self {
        Self::InvalidProduct(err.to_string())
    }

    /// Invalid quantity payload.
    pub fn invalid_quantity(err: impl std::fmt::Display) -> Self {
        Self::InvalidQuantity(err.to_string())
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidProduct(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidQuantity(_) => StatusCode::BAD_REQUEST,

            ApiError::ProductNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::RouteNotFound => StatusCode::NOT_FOUND,

            ApiError::DuplicateSku(_) => StatusCode::CONFLICT,
            ApiError::DuplicateId(_) => StatusCode::CONFLICT,

            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to the client
    pub fn client_message(&self) -> &'static str {
        match self {
            ApiError::InvalidProduct(_) => "Datos de producto inválidos.",
            ApiError::InvalidQuantity(_) => "Cantidad inválida.",
            ApiError::ProductNotFound(_) => "Producto no encontrado.",
            ApiError::RouteNotFound => "Ruta no encontrada.",
            ApiError::DuplicateSku(_) => "El SKU ya existe. Usa uno distinto.",
            ApiError::DuplicateId(_) => "Ya existe un producto con ese id.",
            ApiError::Internal(_) => "Error interno del servidor.",
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateSku(sku) => ApiError::DuplicateSku(sku),
            StoreError::DuplicateId(id) => ApiError::DuplicateId(id),
            StoreError::NotFound(id) => ApiError::ProductNotFound(id),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::invalid_product(err)
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        Self {
            message: err.client_message().to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        } else {
            debug!(error = %self, status = status.as_u16(), "Request rejected");
        }
        let body = Json(ErrorResponse::from(&self));
        (status, body).into_response()
    }
}
