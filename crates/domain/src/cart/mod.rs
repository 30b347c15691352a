//! Cart aggregate and related types.

mod aggregate;
mod line;
mod summary;

pub use aggregate::Cart;
pub use line::CartLine;
pub use summary::{OrderSummary, standard_tax_rate};

use thiserror::Error;

/// Errors that can occur during cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// The item cannot be added because it is not in stock.
    #[error("{name} is out of stock")]
    OutOfStock { name: String },
}
