//! Cart aggregate implementation.

use common::ItemId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::Item;

use super::{CartError, CartLine, OrderSummary, standard_tax_rate};

/// Shopping cart for a single session.
///
/// Lines keep their insertion order and there is at most one line per item;
/// adding an item that is already present increments its quantity instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a cart from previously persisted lines.
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        Self { lines }
    }

    /// Returns the lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Returns the line for an item, if present.
    pub fn get_line(&self, item_id: ItemId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.item_id == item_id)
    }

    /// Returns the number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns true if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns the total quantity across all lines.
    pub fn total_quantity(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Adds one unit of an item.
    ///
    /// Fails without touching the cart when the item is out of stock.
    /// An existing line for the same item has its quantity incremented;
    /// otherwise a new line snapshotting the item is appended.
    pub fn add(&mut self, item: &Item) -> Result<(), CartError> {
        if !item.in_stock {
            return Err(CartError::OutOfStock {
                name: item.name.clone(),
            });
        }

        if let Some(line) = self.lines.iter_mut().find(|line| line.item_id == item.id) {
            line.quantity += 1;
        } else {
            self.lines.push(CartLine::snapshot(item));
        }

        Ok(())
    }

    /// Sets the quantity of an existing line.
    ///
    /// Quantities below 1 are ignored; deleting a line is `remove`'s job.
    /// Unknown items are also ignored.
    pub fn update_quantity(&mut self, item_id: ItemId, quantity: u32) {
        if quantity < 1 {
            return;
        }

        if let Some(line) = self.lines.iter_mut().find(|line| line.item_id == item_id) {
            line.quantity = quantity;
        }
    }

    /// Removes the line for an item. Idempotent.
    pub fn remove(&mut self, item_id: ItemId) {
        self.lines.retain(|line| line.item_id != item_id);
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Computes totals at the standard tax rate.
    pub fn summary(&self) -> OrderSummary {
        self.summary_with_rate(standard_tax_rate())
    }

    /// Computes totals at a caller-supplied tax rate.
    pub fn summary_with_rate(&self, tax_rate: Decimal) -> OrderSummary {
        OrderSummary::compute(&self.lines, tax_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn item(id: u32, cents: i64) -> Item {
        Item::new(
            id,
            format!("Game {id}"),
            Money::from_cents(cents),
            "RPG",
            "PC",
            format!("https://cdn.example/{id}.jpg"),
        )
    }

    #[test]
    fn test_add_new_item() {
        let mut cart = Cart::new();
        cart.add(&item(1, 5999)).unwrap();

        assert_eq!(cart.line_count(), 1);
        let line = cart.get_line(1.into()).unwrap();
        assert_eq!(line.quantity, 1);
        assert_eq!(line.unit_price, Money::from_cents(5999));
    }

    #[test]
    fn test_add_same_item_twice_increments_quantity() {
        let mut cart = Cart::new();
        let game = item(1, 5999);
        cart.add(&game).unwrap();
        cart.add(&game).unwrap();

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.get_line(1.into()).unwrap().quantity, 2);
    }

    #[test]
    fn test_add_out_of_stock_leaves_cart_unchanged() {
        let mut cart = Cart::new();
        cart.add(&item(1, 5999)).unwrap();

        let result = cart.add(&item(2, 999).out_of_stock());
        assert!(matches!(result, Err(CartError::OutOfStock { .. })));
        assert_eq!(cart.line_count(), 1);
        assert!(cart.get_line(2.into()).is_none());
    }

    #[test]
    fn test_lines_keep_insertion_order() {
        let mut cart = Cart::new();
        cart.add(&item(3, 100)).unwrap();
        cart.add(&item(1, 200)).unwrap();
        cart.add(&item(2, 300)).unwrap();

        let ids: Vec<u32> = cart.lines().iter().map(|l| l.item_id.as_u32()).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_update_quantity() {
        let mut cart = Cart::new();
        cart.add(&item(1, 5999)).unwrap();

        cart.update_quantity(1.into(), 5);
        assert_eq!(cart.get_line(1.into()).unwrap().quantity, 5);
    }

    #[test]
    fn test_update_quantity_below_one_is_noop() {
        let mut cart = Cart::new();
        cart.add(&item(1, 5999)).unwrap();

        cart.update_quantity(1.into(), 0);
        assert_eq!(cart.get_line(1.into()).unwrap().quantity, 1);
        assert_eq!(cart.line_count(), 1);
    }

    #[test]
    fn test_update_quantity_for_missing_item_is_noop() {
        let mut cart = Cart::new();
        cart.add(&item(1, 5999)).unwrap();

        cart.update_quantity(9.into(), 4);
        assert_eq!(cart.line_count(), 1);
        assert!(cart.get_line(9.into()).is_none());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut cart = Cart::new();
        cart.add(&item(1, 5999)).unwrap();

        cart.remove(1.into());
        assert!(cart.is_empty());

        // Second removal is a no-op, not an error.
        cart.remove(1.into());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add(&item(1, 5999)).unwrap();
        cart.add(&item(2, 999)).unwrap();

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.summary(), OrderSummary::empty());
    }

    #[test]
    fn test_total_quantity_matches_summary() {
        let mut cart = Cart::new();
        let game = item(1, 5999);
        cart.add(&game).unwrap();
        cart.add(&game).unwrap();
        cart.add(&item(2, 999)).unwrap();

        assert_eq!(cart.total_quantity(), 3);
        assert_eq!(cart.summary().total_items, cart.total_quantity());
    }

    #[test]
    fn test_summary_example() {
        let mut cart = Cart::new();
        let game = item(1, 5999);
        cart.add(&game).unwrap();
        cart.add(&game).unwrap();

        let summary = cart.summary();
        assert_eq!(summary.subtotal.to_display_string(), "119.98");
        assert_eq!(summary.tax.to_display_string(), "12.00");
        assert_eq!(summary.total.to_display_string(), "131.98");
    }

    #[test]
    fn test_serialization_roundtrip() {
        let mut cart = Cart::new();
        cart.add(&item(1, 5999)).unwrap();
        cart.add(&item(2, 999)).unwrap();

        let json = serde_json::to_string(&cart).unwrap();
        let deserialized: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.line_count(), 2);
        assert_eq!(deserialized.lines(), cart.lines());
    }
}
