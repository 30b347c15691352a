//! Wishlist aggregate.

use common::ItemId;
use serde::{Deserialize, Serialize};

use crate::catalog::Item;
use crate::money::Money;

/// An item saved for later.
///
/// Like cart lines, entries snapshot the item's display fields at save time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WishlistEntry {
    pub item_id: ItemId,
    pub name: String,
    pub price: Money,
    pub image_url: String,
    pub genre: String,
    pub platform: String,
}

impl WishlistEntry {
    /// Snapshots a catalog item into a wishlist entry.
    pub fn snapshot(item: &Item) -> Self {
        Self {
            item_id: item.id,
            name: item.name.clone(),
            price: item.price,
            image_url: item.image_url.clone(),
            genre: item.genre.clone(),
            platform: item.platform.clone(),
        }
    }
}

/// Saved-for-later items with set semantics: an item appears at most once,
/// and add/remove are idempotent. Independent of the cart.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Wishlist {
    entries: Vec<WishlistEntry>,
}

impl Wishlist {
    /// Creates an empty wishlist.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a wishlist from persisted entries.
    pub fn from_entries(entries: Vec<WishlistEntry>) -> Self {
        Self { entries }
    }

    /// Returns the entries in insertion order.
    pub fn entries(&self) -> &[WishlistEntry] {
        &self.entries
    }

    /// Returns the number of saved items.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is saved.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if the item is already saved.
    pub fn contains(&self, item_id: ItemId) -> bool {
        self.entries.iter().any(|entry| entry.item_id == item_id)
    }

    /// Saves an item. Returns false (leaving the list unchanged) when the
    /// item is already present, so callers can show a duplicate notice.
    pub fn add(&mut self, item: &Item) -> bool {
        if self.contains(item.id) {
            return false;
        }
        self.entries.push(WishlistEntry::snapshot(item));
        true
    }

    /// Removes a saved item. Returns false when it was not present.
    pub fn remove(&mut self, item_id: ItemId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.item_id != item_id);
        self.entries.len() != before
    }

    /// Empties the wishlist.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
