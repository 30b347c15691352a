//! Catalog item shape.
//!
//! Items are owned by the catalog collaborator; the storefront treats them
//! as immutable and snapshots the fields it needs at add-to-cart time.

use common::ItemId;
use serde::{Deserialize, Serialize};

use crate::money::Money;

/// A purchasable catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Catalog identity.
    pub id: ItemId,

    /// Display title.
    pub name: String,

    /// Current list price (non-negative).
    pub price: Money,

    /// Whether the item can currently be purchased.
    pub in_stock: bool,

    /// Category/genre label.
    pub genre: String,

    /// Target platform label.
    pub platform: String,

    /// Cover image reference.
    pub image_url: String,
}

impl Item {
    /// Creates an in-stock item.
    pub fn new(
        id: impl Into<ItemId>,
        name: impl Into<String>,
        price: Money,
        genre: impl Into<String>,
        platform: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            in_stock: true,
            genre: genre.into(),
            platform: platform.into(),
            image_url: image_url.into(),
        }
    }

    /// Marks the item as currently unavailable.
    pub fn out_of_stock(mut self) -> Self {
        self.in_stock = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_item_is_in_stock() {
        let item = Item::new(
            1,
            "Starfall",
            Money::from_cents(5999),
            "RPG",
            "PC",
            "https://cdn.example/starfall.jpg",
        );
        assert!(item.in_stock);
        assert_eq!(item.id, ItemId::new(1));
    }

    #[test]
    fn test_out_of_stock_builder() {
        let item = Item::new(2, "Gone Gold", Money::from_cents(999), "Indie", "PC", "").out_of_stock();
        assert!(!item.in_stock);
    }

    #[test]
    fn test_serialization_roundtrip() {
        let item = Item::new(
            3,
            "Neon Drift",
            Money::from_cents(2999),
            "Racing",
            "PS5",
            "https://cdn.example/neon.jpg",
        );
        let json = serde_json::to_string(&item).unwrap();
        let deserialized: Item = serde_json::from_str(&json).unwrap();
        assert_eq!(item, deserialized);
    }
}
