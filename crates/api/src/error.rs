//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use catalog::{CatalogError, ErrorCategory};
use projections::ProjectionError;

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Bad request from the client, rejected before any use case runs.
    BadRequest(String),
    /// Command error.
    Catalog(CatalogError),
    /// Query error.
    Projection(ProjectionError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Catalog(err) => catalog_error_to_response(err),
            ApiError::Projection(err) => projection_error_to_response(err),
        };

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

fn catalog_error_to_response(err: CatalogError) -> (StatusCode, String) {
    let status = match err.kind() {
        ErrorCategory::NotFound => StatusCode::NOT_FOUND,
        ErrorCategory::Validation => StatusCode::BAD_REQUEST,
        ErrorCategory::BusinessRule => StatusCode::CONFLICT,
        ErrorCategory::Infrastructure => return internal(&err),
    };
    (status, err.to_string())
}

fn projection_error_to_response(err: ProjectionError) -> (StatusCode, String) {
    match &err {
        ProjectionError::NotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
        ProjectionError::Store(_)
        | ProjectionError::InvalidRow { .. }
        | ProjectionError::PriceOverflow(_) => internal(&err),
    }
}

fn internal(err: &dyn std::error::Error) -> (StatusCode, String) {
    tracing::error!(error = %err, "internal server error");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "internal server error".to_string(),
    )
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        ApiError::Catalog(err)
    }
}

impl From<ProjectionError> for ApiError {
    fn from(err: ProjectionError) -> Self {
        ApiError::Projection(err)
    }
}
