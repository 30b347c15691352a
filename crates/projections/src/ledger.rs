//! Order ledger — the admin view over every user's purchase history.

use std::sync::Arc;

use common::UserId;
use domain::{Order, OrderId, OrderStatus, User};
use storage::{UserPatch, UserStore};
use tokio::sync::RwLock;

use crate::error::{ProjectionError, Result};

/// One history entry, augmented with its owner's identity.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerEntry {
    pub user_id: UserId,
    pub user_email: String,
    pub user_name: String,
    pub order: Order,
}

/// Flattens every user's purchase history into one report list.
///
/// Entries follow the iteration order of the user collection and of each
/// history array; no further ordering is applied here. Presentation layers
/// sort if they need to.
pub fn build_ledger(users: &[User]) -> Vec<LedgerEntry> {
    users
        .iter()
        .flat_map(|user| {
            user.purchase_history.iter().map(|order| LedgerEntry {
                user_id: user.id,
                user_email: user.email.clone(),
                user_name: user.name.clone(),
                order: order.clone(),
            })
        })
        .collect()
}

/// Recomputed-on-read projection of all orders, with the admin mutations.
///
/// `refresh` re-reads the full user collection and rebuilds the list;
/// `update_status` and `delete` write through the user resource first and
/// then fix up the in-memory entries.
pub struct OrderLedger {
    users: Arc<dyn UserStore>,
    entries: RwLock<Vec<LedgerEntry>>,
}

impl OrderLedger {
    /// Creates an empty ledger over the given user resource.
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self {
            users,
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Re-reads all users and rebuilds the ledger. Returns the entry count.
    #[tracing::instrument(skip(self))]
    pub async fn refresh(&self) -> Result<usize> {
        let users = self.users.list().await?;
        let rebuilt = build_ledger(&users);
        let count = rebuilt.len();

        metrics::gauge!("order_ledger_entries").set(count as f64);
        tracing::debug!(entries = count, "order ledger rebuilt");

        *self.entries.write().await = rebuilt;
        Ok(count)
    }

    /// Returns a copy of the current entries.
    pub async fn entries(&self) -> Vec<LedgerEntry> {
        self.entries.read().await.clone()
    }

    /// Returns the number of entries currently held.
    pub async fn count(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Rewrites the status of one order.
    ///
    /// Locates the owning user by scanning all histories, rewrites the
    /// matching entry, persists the user's whole history back, then updates
    /// the in-memory ledger. Fails with [`ProjectionError::OrderNotFound`]
    /// when no history contains the order.
    #[tracing::instrument(skip(self), fields(order_id = %order_id))]
    pub async fn update_status(&self, order_id: &OrderId, status: OrderStatus) -> Result<()> {
        let (owner, mut history) = self.locate_owner(order_id).await?;

        for order in &mut history {
            if &order.id == order_id {
                order.status = status;
            }
        }
        self.users
            .patch(owner, UserPatch::purchase_history(history))
            .await?;

        let mut entries = self.entries.write().await;
        for entry in entries.iter_mut() {
            if &entry.order.id == order_id {
                entry.order.status = status;
            }
        }

        tracing::info!(status = %status, "order status updated");
        Ok(())
    }

    /// Removes one order from its owner's history and from the ledger.
    /// There is no undo.
    #[tracing::instrument(skip(self), fields(order_id = %order_id))]
    pub async fn delete(&self, order_id: &OrderId) -> Result<()> {
        let (owner, mut history) = self.locate_owner(order_id).await?;

        history.retain(|order| &order.id != order_id);
        self.users
            .patch(owner, UserPatch::purchase_history(history))
            .await?;

        let mut entries = self.entries.write().await;
        entries.retain(|entry| &entry.order.id != order_id);

        tracing::info!("order deleted");
        Ok(())
    }

    async fn locate_owner(&self, order_id: &OrderId) -> Result<(UserId, Vec<Order>)> {
        let users = self.users.list().await?;
        users
            .into_iter()
            .find(|user| user.has_order(order_id))
            .map(|user| (user.id, user.purchase_history))
            .ok_or_else(|| ProjectionError::OrderNotFound(order_id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{CartLine, Item, Money, PaymentMethodKind};

    fn order(cents: i64) -> Order {
        let line = CartLine::snapshot(&Item::new(
            1,
            "Starfall",
            Money::from_cents(cents),
            "RPG",
            "PC",
            "",
        ));
        Order::from_lines(std::slice::from_ref(&line), PaymentMethodKind::Card)
    }

    fn user_with_orders(email: &str, orders: Vec<Order>) -> User {
        let mut user = User::new(email, "Sam Doe");
        user.purchase_history = orders;
        user
    }

    #[test]
    fn build_ledger_flattens_in_iteration_order() {
        let users = vec![
            user_with_orders("a@example.com", vec![order(100), order(200)]),
            user_with_orders("b@example.com", vec![order(300)]),
        ];

        let ledger = build_ledger(&users);

        assert_eq!(ledger.len(), 3);
        assert_eq!(ledger[0].user_email, "a@example.com");
        assert_eq!(ledger[1].user_email, "a@example.com");
        assert_eq!(ledger[2].user_email, "b@example.com");
    }

    #[test]
    fn build_ledger_augments_with_owner_identity() {
        let users = vec![user_with_orders("a@example.com", vec![order(100)])];
        let ledger = build_ledger(&users);

        assert_eq!(ledger[0].user_id, users[0].id);
        assert_eq!(ledger[0].user_name, "Sam Doe");
        assert_eq!(ledger[0].order.id, users[0].purchase_history[0].id);
    }

    #[test]
    fn build_ledger_skips_users_without_history() {
        let users = vec![
            User::new("empty@example.com", "No Orders"),
            user_with_orders("a@example.com", vec![order(100)]),
        ];

        assert_eq!(build_ledger(&users).len(), 1);
    }

    #[test]
    fn build_ledger_of_no_users_is_empty() {
        assert!(build_ledger(&[]).is_empty());
    }
}
