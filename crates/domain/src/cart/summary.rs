//! Derived cart totals.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::Money;

use super::CartLine;

/// The tax rate applied at checkout (10%).
pub fn standard_tax_rate() -> Decimal {
    Decimal::new(10, 2)
}

/// Derived totals for a cart or a frozen order.
///
/// Always recomputed from the current lines; never stored on its own
/// outside of the order that freezes it. Amounts stay unrounded here and
/// are rounded to two decimal places at presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    /// Sum of line totals.
    pub subtotal: Money,

    /// `subtotal * tax_rate`, unrounded.
    pub tax: Money,

    /// `subtotal + tax`.
    pub total: Money,

    /// Sum of line quantities.
    pub total_items: u32,
}

impl OrderSummary {
    /// Computes totals over the given lines at the given tax rate.
    pub fn compute(lines: &[CartLine], tax_rate: Decimal) -> Self {
        let subtotal = lines
            .iter()
            .fold(Money::zero(), |acc, line| acc + line.line_total());
        let tax = subtotal.apply_rate(tax_rate);
        let total = subtotal + tax;
        let total_items = lines.iter().map(|line| line.quantity).sum();

        Self {
            subtotal,
            tax,
            total,
            total_items,
        }
    }

    /// An all-zero summary, as produced by an empty cart.
    pub fn empty() -> Self {
        Self {
            subtotal: Money::zero(),
            tax: Money::zero(),
            total: Money::zero(),
            total_items: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Item;

    fn line(cents: i64, quantity: u32) -> CartLine {
        let mut line = CartLine::snapshot(&Item::new(
            1,
            "Starfall",
            Money::from_cents(cents),
            "RPG",
            "PC",
            "",
        ));
        line.quantity = quantity;
        line
    }

    #[test]
    fn test_empty_summary_is_zero() {
        let summary = OrderSummary::compute(&[], standard_tax_rate());
        assert_eq!(summary, OrderSummary::empty());
    }

    #[test]
    fn test_presentation_rounding() {
        // 59.99 * 2 = 119.98; tax 11.998 -> "12.00"; total 131.978 -> "131.98"
        let summary = OrderSummary::compute(&[line(5999, 2)], standard_tax_rate());
        assert_eq!(summary.subtotal.to_display_string(), "119.98");
        assert_eq!(summary.tax.to_display_string(), "12.00");
        assert_eq!(summary.total.to_display_string(), "131.98");
        assert_eq!(summary.total_items, 2);
    }

    #[test]
    fn test_total_is_subtotal_plus_tax() {
        let summary = OrderSummary::compute(&[line(1000, 3), line(500, 1)], standard_tax_rate());
        assert_eq!(summary.subtotal, Money::from_cents(3500));
        assert_eq!(summary.total, summary.subtotal + summary.tax);
        assert_eq!(summary.total_items, 4);
    }
}
