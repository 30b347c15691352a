//! User resource interface and in-memory implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::UserId;
use domain::{Address, Order, User, WishlistEntry};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::error::{Result, StoreError};

/// A partial update to a user record.
///
/// Each present field replaces the stored field wholesale; there is no
/// element-level merge. Concurrent writers race last-writer-wins.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wishlist: Option<Vec<WishlistEntry>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub addresses: Option<Vec<Address>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_history: Option<Vec<Order>>,
}

impl UserPatch {
    /// A patch that replaces only the wishlist.
    pub fn wishlist(entries: Vec<WishlistEntry>) -> Self {
        Self {
            wishlist: Some(entries),
            ..Self::default()
        }
    }

    /// A patch that replaces only the addresses.
    pub fn addresses(addresses: Vec<Address>) -> Self {
        Self {
            addresses: Some(addresses),
            ..Self::default()
        }
    }

    /// A patch that replaces only the purchase history.
    pub fn purchase_history(orders: Vec<Order>) -> Self {
        Self {
            purchase_history: Some(orders),
            ..Self::default()
        }
    }
}

/// CRUD surface of the user-resource collaborator.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Lists every user.
    async fn list(&self) -> Result<Vec<User>>;

    /// Fetches a user by id. Returns None when unknown.
    async fn get(&self, id: UserId) -> Result<Option<User>>;

    /// Creates a new user record.
    async fn create(&self, user: User) -> Result<()>;

    /// Replaces a user record wholesale.
    async fn update(&self, user: User) -> Result<()>;

    /// Merges a partial update into a user record and returns the result.
    async fn patch(&self, id: UserId, patch: UserPatch) -> Result<User>;

    /// Deletes a user record.
    async fn delete(&self, id: UserId) -> Result<()>;
}

#[derive(Debug, Default)]
struct UserState {
    users: HashMap<UserId, User>,
    insertion_order: Vec<UserId>,
    fail_on_write: bool,
}

/// In-memory user store for tests and the demo server.
///
/// Preserves insertion order in `list` so ledger ordering is deterministic.
#[derive(Clone, Default)]
pub struct InMemoryUserStore {
    state: Arc<RwLock<UserState>>,
}

impl InMemoryUserStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the store to fail every mutation, simulating an outage.
    pub async fn set_fail_on_write(&self, fail: bool) {
        self.state.write().await.fail_on_write = fail;
    }

    /// Returns the number of stored users.
    pub async fn user_count(&self) -> usize {
        self.state.read().await.users.len()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn list(&self) -> Result<Vec<User>> {
        let state = self.state.read().await;
        Ok(state
            .insertion_order
            .iter()
            .filter_map(|id| state.users.get(id))
            .cloned()
            .collect())
    }

    async fn get(&self, id: UserId) -> Result<Option<User>> {
        Ok(self.state.read().await.users.get(&id).cloned())
    }

    async fn create(&self, user: User) -> Result<()> {
        let mut state = self.state.write().await;
        if state.fail_on_write {
            return Err(StoreError::Unavailable("user write failed".to_string()));
        }

        metrics::counter!("user_store_writes_total").increment(1);
        if !state.users.contains_key(&user.id) {
            state.insertion_order.push(user.id);
        }
        state.users.insert(user.id, user);
        Ok(())
    }

    async fn update(&self, user: User) -> Result<()> {
        let mut state = self.state.write().await;
        if state.fail_on_write {
            return Err(StoreError::Unavailable("user write failed".to_string()));
        }
        if !state.users.contains_key(&user.id) {
            return Err(StoreError::NotFound {
                resource: "user",
                id: user.id.to_string(),
            });
        }

        metrics::counter!("user_store_writes_total").increment(1);
        state.users.insert(user.id, user);
        Ok(())
    }

    async fn patch(&self, id: UserId, patch: UserPatch) -> Result<User> {
        let mut state = self.state.write().await;
        if state.fail_on_write {
            return Err(StoreError::Unavailable("user write failed".to_string()));
        }

        let user = state.users.get_mut(&id).ok_or(StoreError::NotFound {
            resource: "user",
            id: id.to_string(),
        })?;

        if let Some(wishlist) = patch.wishlist {
            user.wishlist = wishlist;
        }
        if let Some(addresses) = patch.addresses {
            user.addresses = addresses;
        }
        if let Some(purchase_history) = patch.purchase_history {
            user.purchase_history = purchase_history;
        }

        metrics::counter!("user_store_writes_total").increment(1);
        Ok(user.clone())
    }

    async fn delete(&self, id: UserId) -> Result<()> {
        let mut state = self.state.write().await;
        if state.fail_on_write {
            return Err(StoreError::Unavailable("user write failed".to_string()));
        }
        if state.users.remove(&id).is_none() {
            return Err(StoreError::NotFound {
                resource: "user",
                id: id.to_string(),
            });
        }

        state.insertion_order.retain(|stored| *stored != id);
        Ok(())
    }
}
