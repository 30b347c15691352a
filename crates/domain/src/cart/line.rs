//! Cart line value object.

use common::ItemId;
use serde::{Deserialize, Serialize};

use crate::catalog::Item;
use crate::money::Money;

/// A single line in a cart.
///
/// Captures the item's price and display fields at the time it was added;
/// later catalog changes do not flow into existing lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// The catalog item this line refers to.
    pub item_id: ItemId,

    /// Item name at add time.
    pub name: String,

    /// Price per unit at add time.
    pub unit_price: Money,

    /// Quantity, never below 1 (removal deletes the line instead).
    pub quantity: u32,

    /// Cover image at add time.
    pub image_url: String,

    /// Genre label at add time.
    pub genre: String,

    /// Platform label at add time.
    pub platform: String,
}

impl CartLine {
    /// Snapshots a catalog item into a new line with quantity 1.
    pub fn snapshot(item: &Item) -> Self {
        Self {
            item_id: item.id,
            name: item.name.clone(),
            unit_price: item.price,
            quantity: 1,
            image_url: item.image_url.clone(),
            genre: item.genre.clone(),
            platform: item.platform.clone(),
        }
    }

    /// Returns the total price for this line (quantity * unit price).
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply(self.quantity)
    }
}
