//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use domain::CartError;
use projections::ProjectionError;
use services::ServiceError;
use storage::StoreError;

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Resource not found.
    NotFound(String),
    /// Bad request from the client.
    BadRequest(String),
    /// Service-layer error.
    Service(ServiceError),
    /// Read-model error.
    Projection(ProjectionError),
    /// Backing-store error.
    Store(StoreError),
    /// Internal server error.
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Service(err) => service_error_to_response(err),
            ApiError::Projection(err) => projection_error_to_response(err),
            ApiError::Store(err) => store_error_to_response(err),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

fn service_error_to_response(err: ServiceError) -> (StatusCode, String) {
    match &err {
        ServiceError::Cart(CartError::OutOfStock { .. }) => {
            (StatusCode::CONFLICT, err.to_string())
        }
        ServiceError::Checkout(_) | ServiceError::EmptyCart => {
            (StatusCode::BAD_REQUEST, err.to_string())
        }
        ServiceError::UserNotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
        ServiceError::PaymentFailed | ServiceError::Gateway(_) => {
            (StatusCode::PAYMENT_REQUIRED, err.to_string())
        }
        ServiceError::Store(store_err) => store_error_to_response_ref(store_err, &err),
        ServiceError::Serialization(_) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
    }
}

fn projection_error_to_response(err: ProjectionError) -> (StatusCode, String) {
    match &err {
        ProjectionError::OrderNotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
        ProjectionError::Store(store_err) => store_error_to_response_ref(store_err, &err),
    }
}

fn store_error_to_response(err: StoreError) -> (StatusCode, String) {
    let message = err.to_string();
    match err {
        StoreError::NotFound { .. } => (StatusCode::NOT_FOUND, message),
        StoreError::Unavailable(_) => (StatusCode::BAD_GATEWAY, message),
        StoreError::Serialization(_) => (StatusCode::INTERNAL_SERVER_ERROR, message),
    }
}

fn store_error_to_response_ref(
    store_err: &StoreError,
    outer: &dyn std::fmt::Display,
) -> (StatusCode, String) {
    match store_err {
        StoreError::NotFound { .. } => (StatusCode::NOT_FOUND, outer.to_string()),
        StoreError::Unavailable(_) => (StatusCode::BAD_GATEWAY, outer.to_string()),
        StoreError::Serialization(_) => (StatusCode::INTERNAL_SERVER_ERROR, outer.to_string()),
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        ApiError::Service(err)
    }
}

impl From<CartError> for ApiError {
    fn from(err: CartError) -> Self {
        ApiError::Service(ServiceError::Cart(err))
    }
}

impl From<ProjectionError> for ApiError {
    fn from(err: ProjectionError) -> Self {
        ApiError::Projection(err)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Store(err)
    }
}
