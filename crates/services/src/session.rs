//! Session snapshot persistence.
//!
//! Two pieces of session state live in the key-value store next to the
//! cart: the most recently viewed order (so the confirmation page survives
//! a reload) and a snapshot of the signed-in user.

use std::sync::Arc;

use domain::{Order, User};
use storage::{KeyValueStore, keys};

use crate::error::Result;

/// Reads and writes the session snapshots.
pub struct SessionService {
    kv: Arc<dyn KeyValueStore>,
}

impl SessionService {
    /// Creates a new session service.
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// Remembers the order the user last viewed.
    pub async fn remember_last_viewed_order(&self, order: &Order) -> Result<()> {
        let payload = serde_json::to_string(order)?;
        self.kv.put(keys::LAST_VIEWED_ORDER, payload).await?;
        Ok(())
    }

    /// Returns the last viewed order, if any was stored and it is readable.
    pub async fn last_viewed_order(&self) -> Result<Option<Order>> {
        match self.kv.get(keys::LAST_VIEWED_ORDER).await? {
            Some(payload) => Ok(Some(serde_json::from_str(&payload)?)),
            None => Ok(None),
        }
    }

    /// Stores a snapshot of the signed-in user.
    pub async fn remember_user(&self, user: &User) -> Result<()> {
        let payload = serde_json::to_string(user)?;
        self.kv.put(keys::SESSION_USER, payload).await?;
        Ok(())
    }

    /// Returns the signed-in user snapshot, if present.
    pub async fn current_user(&self) -> Result<Option<User>> {
        match self.kv.get(keys::SESSION_USER).await? {
            Some(payload) => Ok(Some(serde_json::from_str(&payload)?)),
            None => Ok(None),
        }
    }

    /// Forgets the signed-in user (sign-out).
    pub async fn clear_user(&self) -> Result<()> {
        self.kv.remove(keys::SESSION_USER).await?;
        Ok(())
    }
}
