//! Decimal money type.
//!
//! Amounts are kept unrounded; rounding to two decimal places happens only
//! when an amount is presented (`Display`, [`Money::rounded_cents`]).

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A monetary amount backed by an exact decimal.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Creates an amount from whole cents (e.g., 5999 = $59.99).
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// Creates an amount from a whole dollar value.
    pub fn from_dollars(dollars: i64) -> Self {
        Self(Decimal::from(dollars))
    }

    /// Creates an amount from a raw decimal.
    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Returns zero money.
    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Returns the exact, unrounded amount.
    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns the amount in whole cents, rounded half away from zero.
    ///
    /// This is the presentation rounding step: `11.998` becomes `1200`.
    pub fn rounded_cents(&self) -> i64 {
        let cents = (self.0 * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        cents.mantissa() as i64
    }

    /// Formats the amount rounded to two decimal places, without a currency
    /// sign (e.g., `"131.98"`).
    pub fn to_display_string(&self) -> String {
        let cents = self.rounded_cents();
        if cents < 0 {
            format!("-{}.{:02}", (cents / 100).abs(), (cents % 100).abs())
        } else {
            format!("{}.{:02}", cents / 100, cents % 100)
        }
    }

    /// Returns true if the amount is positive.
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Returns true if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if the amount is negative.
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Multiplies by a quantity.
    pub fn multiply(&self, quantity: u32) -> Money {
        Self(self.0 * Decimal::from(quantity))
    }

    /// Applies a fractional rate (e.g., a 0.10 tax rate), unrounded.
    pub fn apply_rate(&self, rate: Decimal) -> Money {
        Self(self.0 * rate)
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cents = self.rounded_cents();
        if cents < 0 {
            write!(f, "-${}.{:02}", (cents / 100).abs(), (cents % 100).abs())
        } else {
            write!(f, "${}.{:02}", cents / 100, cents % 100)
        }
    }
}

impl std::ops::Add for Money {
    type Output = Money;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl std::ops::Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl std::ops::AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl std::ops::SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}
