//! API error types with HTTP response mapping.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use catalog::CatalogError;
use orders::{ErrorKind, OrderError};

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Bad request from the client.
    BadRequest(String),
    /// Order workflow error.
    Order(OrderError),
    /// Catalog lookup error.
    Catalog(CatalogError),
    /// The request deadline elapsed before the work finished.
    Timeout(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Order(err) => order_error_to_response(err),
            ApiError::Catalog(err) => catalog_error_to_response(err),
            ApiError::Timeout(msg) => {
                tracing::warn!(error = %msg, "request deadline exceeded");
                (StatusCode::GATEWAY_TIMEOUT, msg)
            }
        };

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

fn order_error_to_response(err: OrderError) -> (StatusCode, String) {
    let status = match err.kind() {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::BadRequest => StatusCode::BAD_REQUEST,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::DependencyFailure | ErrorKind::Internal => {
            tracing::error!(error = %err, "order request failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, err.to_string())
}

fn catalog_error_to_response(err: CatalogError) -> (StatusCode, String) {
    match &err {
        CatalogError::PartNotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
        CatalogError::Unavailable(_) => {
            tracing::error!(error = %err, "catalog request failed");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}

impl From<OrderError> for ApiError {
    fn from(err: OrderError) -> Self {
        ApiError::Order(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        ApiError::Catalog(err)
    }
}
