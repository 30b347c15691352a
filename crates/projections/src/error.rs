//! Projection error types.

use domain::OrderId;
use thiserror::Error;

/// Errors that can occur while building or mutating read models.
#[derive(Debug, Error)]
pub enum ProjectionError {
    /// No user's history contains the addressed order.
    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),

    /// The user resource failed.
    #[error("Store error: {0}")]
    Store(#[from] storage::StoreError),
}

/// Result type for projection operations.
pub type Result<T> = std::result::Result<T, ProjectionError>;
