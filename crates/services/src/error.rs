//! Service error types.

use common::UserId;
use domain::{CartError, CheckoutError};
use storage::StoreError;
use thiserror::Error;

/// Errors surfaced by the session services.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// A cart rule was violated; the message is user-facing.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// A checkout field failed validation; the message is user-facing.
    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    /// Checkout was attempted with nothing in the cart.
    #[error("Cannot check out an empty cart")]
    EmptyCart,

    /// The addressed user does not exist.
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    /// The payment gateway refused or errored on a charge.
    #[error("Payment gateway error: {0}")]
    Gateway(String),

    /// Generic checkout failure shown to the user; details are logged.
    #[error("Payment failed")]
    PaymentFailed,

    /// A backing store failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for service operations.
pub type Result<T> = std::result::Result<T, ServiceError>;
