//! Wishlist service.
//!
//! The canonical wishlist store is the user resource: when a user is
//! signed in, every change is acknowledged by the store before it is
//! applied in memory. Guests get a purely in-memory wishlist that dies
//! with the session; there is no local-storage mirror to diverge from.

use std::sync::Arc;

use common::{ItemId, UserId};
use domain::{Item, Wishlist, WishlistEntry};
use storage::{UserPatch, UserStore};

use crate::error::{Result, ServiceError};

enum Backend {
    Account {
        users: Arc<dyn UserStore>,
        user_id: UserId,
    },
    Guest,
}

/// Owns the session's wishlist.
pub struct WishlistService {
    wishlist: Wishlist,
    backend: Backend,
}

impl WishlistService {
    /// Creates a service backed by a signed-in user's profile, loading the
    /// saved entries from the user resource.
    pub async fn for_account(users: Arc<dyn UserStore>, user_id: UserId) -> Result<Self> {
        let user = users
            .get(user_id)
            .await?
            .ok_or(ServiceError::UserNotFound(user_id))?;

        Ok(Self {
            wishlist: Wishlist::from_entries(user.wishlist),
            backend: Backend::Account { users, user_id },
        })
    }

    /// Creates an ephemeral wishlist for an anonymous session.
    pub fn for_guest() -> Self {
        Self {
            wishlist: Wishlist::new(),
            backend: Backend::Guest,
        }
    }

    /// Returns the saved entries in insertion order.
    pub fn entries(&self) -> &[WishlistEntry] {
        self.wishlist.entries()
    }

    /// Returns true if the item is already saved.
    pub fn contains(&self, item_id: ItemId) -> bool {
        self.wishlist.contains(item_id)
    }

    /// Returns the number of saved items.
    pub fn len(&self) -> usize {
        self.wishlist.len()
    }

    /// Returns true if nothing is saved.
    pub fn is_empty(&self) -> bool {
        self.wishlist.is_empty()
    }

    /// Saves an item. Returns `Ok(false)` when it was already saved, so the
    /// caller can show a duplicate notice; the stored list is unchanged.
    #[tracing::instrument(skip(self, item), fields(item_id = %item.id))]
    pub async fn add(&mut self, item: &Item) -> Result<bool> {
        if self.wishlist.contains(item.id) {
            return Ok(false);
        }

        let mut entries = self.wishlist.entries().to_vec();
        entries.push(WishlistEntry::snapshot(item));
        self.store_entries(entries).await?;

        self.wishlist.add(item);
        Ok(true)
    }

    /// Removes a saved item. Returns `Ok(false)` when it was not saved.
    #[tracing::instrument(skip(self))]
    pub async fn remove(&mut self, item_id: ItemId) -> Result<bool> {
        if !self.wishlist.contains(item_id) {
            return Ok(false);
        }

        let entries: Vec<WishlistEntry> = self
            .wishlist
            .entries()
            .iter()
            .filter(|entry| entry.item_id != item_id)
            .cloned()
            .collect();
        self.store_entries(entries).await?;

        self.wishlist.remove(item_id);
        Ok(true)
    }

    /// Empties the wishlist.
    #[tracing::instrument(skip(self))]
    pub async fn clear(&mut self) -> Result<()> {
        self.store_entries(Vec::new()).await?;
        self.wishlist.clear();
        Ok(())
    }

    /// Persists the prospective entry list before any in-memory change is
    /// applied. Guests have nothing to persist.
    async fn store_entries(&self, entries: Vec<WishlistEntry>) -> Result<()> {
        if let Backend::Account { users, user_id } = &self.backend {
            users.patch(*user_id, UserPatch::wishlist(entries)).await?;
        }
        Ok(())
    }
}
