//! Domain layer for the storefront.
//!
//! This crate provides the core domain model:
//! - Cart aggregate with price-snapshot lines and derived summaries
//! - Wishlist aggregate with set semantics
//! - Order records with a time-based id and an admin-controlled status
//! - Checkout validation for addresses and card payment details
//! - User profile records carrying addresses and purchase history

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod money;
pub mod order;
pub mod user;
pub mod wishlist;

pub use cart::{Cart, CartError, CartLine, OrderSummary, standard_tax_rate};
pub use catalog::Item;
pub use checkout::{CardDetails, CheckoutError, PaymentMethod, PaymentMethodKind};
pub use money::Money;
pub use order::{Order, OrderId, OrderLine, OrderStatus, UnknownStatus};
pub use user::{Address, User};
pub use wishlist::{Wishlist, WishlistEntry};
