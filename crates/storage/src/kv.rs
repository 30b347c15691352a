//! Session-scoped key-value persistence.
//!
//! Stands in for the browser-local-storage collaborator: string keys,
//! JSON-string payloads, no versioning.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{Result, StoreError};

/// Well-known session keys.
pub mod keys {
    /// The active cart's line collection.
    pub const ACTIVE_CART: &str = "storefront.cart";

    /// The most recently viewed order.
    pub const LAST_VIEWED_ORDER: &str = "storefront.last_order";

    /// Snapshot of the signed-in user.
    pub const SESSION_USER: &str = "storefront.session_user";
}

/// Key-value persistence for session state.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads the payload stored under a key.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes a payload under a key, replacing any previous value.
    async fn put(&self, key: &str, value: String) -> Result<()>;

    /// Removes a key. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;
}

#[derive(Debug, Default)]
struct KvState {
    entries: HashMap<String, String>,
    unavailable: bool,
}

/// In-memory key-value store for tests and the demo server.
#[derive(Clone, Default)]
pub struct InMemoryKeyValueStore {
    state: Arc<RwLock<KvState>>,
}

impl InMemoryKeyValueStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the store to fail every call, simulating an outage.
    pub async fn set_unavailable(&self, unavailable: bool) {
        self.state.write().await.unavailable = unavailable;
    }

    /// Returns the number of stored keys.
    pub async fn key_count(&self) -> usize {
        self.state.read().await.entries.len()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let state = self.state.read().await;
        if state.unavailable {
            return Err(StoreError::Unavailable("kv read failed".to_string()));
        }
        Ok(state.entries.get(key).cloned())
    }

    async fn put(&self, key: &str, value: String) -> Result<()> {
        let mut state = self.state.write().await;
        if state.unavailable {
            return Err(StoreError::Unavailable("kv write failed".to_string()));
        }
        metrics::counter!("kv_store_writes_total").increment(1);
        state.entries.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut state = self.state.write().await;
        if state.unavailable {
            return Err(StoreError::Unavailable("kv write failed".to_string()));
        }
        state.entries.remove(key);
        Ok(())
    }
}
