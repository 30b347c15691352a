//! Order records.

use chrono::{DateTime, Utc};
use common::ItemId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cart::{CartLine, OrderSummary, standard_tax_rate};
use crate::checkout::PaymentMethodKind;
use crate::money::Money;

use super::OrderStatus;

/// Time-based unique order token, e.g. `ORD-1754550000123-a1b2c3`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Generates a fresh id from the current time plus random entropy.
    pub fn generate() -> Self {
        let millis = Utc::now().timestamp_millis();
        let entropy = Uuid::new_v4().simple().to_string();
        let suffix = entropy.get(..6).unwrap_or(&entropy);
        Self(format!("ORD-{millis}-{suffix}"))
    }

    /// Returns the token as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for OrderId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for OrderId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for OrderId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A line frozen into an order at checkout time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub item_id: ItemId,
    pub name: String,
    pub unit_price: Money,
    pub quantity: u32,
    pub image_url: String,
}

impl OrderLine {
    /// Freezes a cart line into an order line.
    pub fn from_cart_line(line: &CartLine) -> Self {
        Self {
            item_id: line.item_id,
            name: line.name.clone(),
            unit_price: line.unit_price,
            quantity: line.quantity,
            image_url: line.image_url.clone(),
        }
    }

    /// Returns the total price for this line.
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply(self.quantity)
    }
}

/// An immutable snapshot of a purchase.
///
/// Appended to the owning user's purchase history at checkout. Only
/// `status` is ever rewritten afterwards (by the back office); deletion
/// removes the record entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub items: Vec<OrderLine>,
    pub summary: OrderSummary,
    pub status: OrderStatus,
    pub placed_at: DateTime<Utc>,
    pub payment_method: PaymentMethodKind,
}

impl Order {
    /// Freezes cart lines into a new pending order.
    ///
    /// Assigns a fresh id and the current timestamp, and computes the
    /// summary with the same formula the cart uses.
    pub fn from_lines(lines: &[CartLine], payment_method: PaymentMethodKind) -> Self {
        Self {
            id: OrderId::generate(),
            items: lines.iter().map(OrderLine::from_cart_line).collect(),
            summary: OrderSummary::compute(lines, standard_tax_rate()),
            status: OrderStatus::Pending,
            placed_at: Utc::now(),
            payment_method,
        }
    }

    /// Returns the total quantity across all lines.
    pub fn total_quantity(&self) -> u32 {
        self.items.iter().map(|line| line.quantity).sum()
    }
}
