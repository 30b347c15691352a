//! Cart service with best-effort persistence.

use std::sync::Arc;

use common::ItemId;
use domain::{Cart, CartError, CartLine, Item, OrderSummary};
use storage::{KeyValueStore, keys};

/// Owns the session's cart and persists it after every mutation.
///
/// Mutations apply to the in-memory cart immediately; the write-behind to
/// the key-value store is fire-and-forget. A failed persist is logged and
/// counted but never surfaced, so the user keeps their selection even when
/// the session store is down.
pub struct CartService {
    cart: Cart,
    kv: Arc<dyn KeyValueStore>,
    storage_key: String,
}

impl CartService {
    /// Loads the cart persisted under the default session key.
    pub async fn load(kv: Arc<dyn KeyValueStore>) -> Self {
        Self::load_with_key(kv, keys::ACTIVE_CART).await
    }

    /// Loads the cart persisted under a caller-chosen key.
    ///
    /// A missing or unreadable payload yields an empty cart.
    pub async fn load_with_key(kv: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let storage_key = key.into();
        let cart = match kv.get(&storage_key).await {
            Ok(Some(payload)) => match serde_json::from_str::<Vec<CartLine>>(&payload) {
                Ok(lines) => Cart::from_lines(lines),
                Err(err) => {
                    tracing::warn!(error = %err, key = %storage_key, "discarding unreadable cart payload");
                    Cart::new()
                }
            },
            Ok(None) => Cart::new(),
            Err(err) => {
                tracing::warn!(error = %err, key = %storage_key, "cart load failed, starting empty");
                Cart::new()
            }
        };

        Self {
            cart,
            kv,
            storage_key,
        }
    }

    /// Returns the lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        self.cart.lines()
    }

    /// Returns the line for an item, if present.
    pub fn get_line(&self, item_id: ItemId) -> Option<&CartLine> {
        self.cart.get_line(item_id)
    }

    /// Returns true if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Computes totals at the standard tax rate.
    pub fn summary(&self) -> OrderSummary {
        self.cart.summary()
    }

    /// Adds one unit of an item, then persists.
    #[tracing::instrument(skip(self, item), fields(item_id = %item.id))]
    pub async fn add(&mut self, item: &Item) -> Result<(), CartError> {
        self.cart.add(item)?;
        self.persist().await;
        Ok(())
    }

    /// Sets a line's quantity (quantities below 1 are ignored), then persists.
    #[tracing::instrument(skip(self))]
    pub async fn update_quantity(&mut self, item_id: ItemId, quantity: u32) {
        self.cart.update_quantity(item_id, quantity);
        self.persist().await;
    }

    /// Removes a line if present, then persists.
    #[tracing::instrument(skip(self))]
    pub async fn remove(&mut self, item_id: ItemId) {
        self.cart.remove(item_id);
        self.persist().await;
    }

    /// Empties the cart, then persists.
    #[tracing::instrument(skip(self))]
    pub async fn clear(&mut self) {
        self.cart.clear();
        self.persist().await;
    }

    async fn persist(&self) {
        let payload = match serde_json::to_string(self.cart.lines()) {
            Ok(payload) => payload,
            Err(err) => {
                tracing::warn!(error = %err, "cart serialization failed, skipping persist");
                return;
            }
        };

        if let Err(err) = self.kv.put(&self.storage_key, payload).await {
            metrics::counter!("cart_persist_failures_total").increment(1);
            tracing::warn!(error = %err, key = %self.storage_key, "cart persist failed");
        }
    }
}
