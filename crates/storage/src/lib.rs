//! External collaborator interfaces for the storefront core.
//!
//! The storefront consumes three CRUD surfaces, modeled here as async
//! traits with in-memory implementations:
//! - [`CatalogStore`] — read-only item catalog
//! - [`UserStore`] — user resource with partial-update (field merge)
//! - [`KeyValueStore`] — session-scoped key-value persistence
//!
//! The in-memory implementations support failure injection so service and
//! projection tests can exercise transport-error paths.

pub mod catalog;
pub mod error;
pub mod kv;
pub mod users;

pub use catalog::{CatalogStore, InMemoryCatalogStore};
pub use common::{ItemId, UserId};
pub use error::{Result, StoreError};
pub use kv::{InMemoryKeyValueStore, KeyValueStore, keys};
pub use users::{InMemoryUserStore, UserPatch, UserStore};
