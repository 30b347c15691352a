//! Session services wiring the domain aggregates to their backing stores.
//!
//! Each service owns one aggregate for the lifetime of a session and makes
//! the persistence rules explicit:
//! - [`CartService`] applies mutations in memory first and persists the
//!   full line collection best-effort afterwards
//! - [`WishlistService`] persists through the user resource before applying
//!   a change, or keeps guest wishlists purely in memory
//! - [`CheckoutService`] freezes carts (or a single buy-now selection) into
//!   orders, charges the payment gateway, and appends to purchase history
//! - [`SessionService`] keeps the last-viewed-order and signed-in-user
//!   snapshots in the key-value store

pub mod cart;
pub mod checkout;
pub mod error;
pub mod payment;
pub mod session;
pub mod wishlist;

pub use cart::CartService;
pub use checkout::CheckoutService;
pub use error::{Result, ServiceError};
pub use payment::{InMemoryPaymentGateway, PaymentGateway, PaymentReceipt};
pub use session::SessionService;
pub use wishlist::WishlistService;
