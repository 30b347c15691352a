//! Checkout input validation.
//!
//! Runs before any network call; a failure identifies the first invalid
//! field and aborts the checkout with no partial order created.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::user::Address;

/// Card details as typed by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDetails {
    /// 16 digits, spaces allowed.
    pub number: String,

    /// `MM/YY`.
    pub expiry: String,

    /// 3 digits.
    pub cvv: String,

    /// Cardholder name.
    pub holder: String,
}

/// How the order is paid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Pay by card; details are validated but never persisted.
    Card(CardDetails),

    /// Pay on delivery; no further details required.
    CashOnDelivery,
}

impl PaymentMethod {
    /// Returns the persistable kind of this method, without card details.
    pub fn kind(&self) -> PaymentMethodKind {
        match self {
            PaymentMethod::Card(_) => PaymentMethodKind::Card,
            PaymentMethod::CashOnDelivery => PaymentMethodKind::CashOnDelivery,
        }
    }
}

/// The payment method recorded on an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethodKind {
    Card,
    CashOnDelivery,
}

impl std::fmt::Display for PaymentMethodKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentMethodKind::Card => write!(f, "Card"),
            PaymentMethodKind::CashOnDelivery => write!(f, "Cash on delivery"),
        }
    }
}

/// Field-level checkout validation failures, in validation order.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CheckoutError {
    /// No shipping address was selected.
    #[error("Please select a shipping address")]
    AddressRequired,

    /// The card number is not 16 digits.
    #[error("Card number must be 16 digits")]
    InvalidCardNumber,

    /// The expiry is not in `MM/YY` form.
    #[error("Card expiry must be in MM/YY format")]
    InvalidExpiryFormat,

    /// The expiry is before the current month.
    #[error("Card has expired")]
    CardExpired,

    /// The CVV is not 3 digits.
    #[error("CVV must be 3 digits")]
    InvalidCvv,

    /// The cardholder name is empty.
    #[error("Cardholder name is required")]
    CardHolderRequired,
}

/// Validates the checkout inputs, reporting the first failing field.
///
/// An address is always required. Card payments additionally require a
/// structurally valid card; cash on delivery needs nothing further.
pub fn validate(
    address: Option<&Address>,
    method: &PaymentMethod,
    now: DateTime<Utc>,
) -> Result<(), CheckoutError> {
    if address.is_none() {
        return Err(CheckoutError::AddressRequired);
    }

    if let PaymentMethod::Card(card) = method {
        validate_card(card, now)?;
    }

    Ok(())
}

fn validate_card(card: &CardDetails, now: DateTime<Utc>) -> Result<(), CheckoutError> {
    let digit_count = card.number.chars().filter(char::is_ascii_digit).count();
    let well_formed = card
        .number
        .chars()
        .all(|c| c.is_ascii_digit() || c == ' ');
    if !well_formed || digit_count != 16 {
        return Err(CheckoutError::InvalidCardNumber);
    }

    let (year, month) = parse_expiry(&card.expiry)?;
    if (year, month) < (now.year(), now.month()) {
        return Err(CheckoutError::CardExpired);
    }

    if card.cvv.len() != 3 || !card.cvv.chars().all(|c| c.is_ascii_digit()) {
        return Err(CheckoutError::InvalidCvv);
    }

    if card.holder.trim().is_empty() {
        return Err(CheckoutError::CardHolderRequired);
    }

    Ok(())
}

fn parse_expiry(expiry: &str) -> Result<(i32, u32), CheckoutError> {
    let (mm, yy) = expiry
        .split_once('/')
        .ok_or(CheckoutError::InvalidExpiryFormat)?;
    if mm.len() != 2 || yy.len() != 2 {
        return Err(CheckoutError::InvalidExpiryFormat);
    }

    let month: u32 = mm.parse().map_err(|_| CheckoutError::InvalidExpiryFormat)?;
    let year: i32 = yy.parse().map_err(|_| CheckoutError::InvalidExpiryFormat)?;
    if !(1..=12).contains(&month) {
        return Err(CheckoutError::InvalidExpiryFormat);
    }

    Ok((2000 + year, month))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn address() -> Address {
        Address::new(1, "Sam Doe", "1 Main St", "Springfield", "12345", "US")
    }

    fn card() -> CardDetails {
        CardDetails {
            number: "4242 4242 4242 4242".to_string(),
            expiry: "12/99".to_string(),
            cvv: "123".to_string(),
            holder: "Sam Doe".to_string(),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_valid_card_checkout() {
        let addr = address();
        assert!(validate(Some(&addr), &PaymentMethod::Card(card()), now()).is_ok());
    }

    #[test]
    fn test_address_required_regardless_of_method() {
        assert_eq!(
            validate(None, &PaymentMethod::Card(card()), now()),
            Err(CheckoutError::AddressRequired)
        );
        assert_eq!(
            validate(None, &PaymentMethod::CashOnDelivery, now()),
            Err(CheckoutError::AddressRequired)
        );
    }

    #[test]
    fn test_cash_on_delivery_needs_only_address() {
        let addr = address();
        assert!(validate(Some(&addr), &PaymentMethod::CashOnDelivery, now()).is_ok());
    }

    #[test]
    fn test_card_number_must_have_16_digits() {
        let addr = address();
        for number in ["4242", "4242 4242 4242 4242 4", "4242-4242-4242-4242"] {
            let mut c = card();
            c.number = number.to_string();
            assert_eq!(
                validate(Some(&addr), &PaymentMethod::Card(c), now()),
                Err(CheckoutError::InvalidCardNumber),
                "number {number:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_expired_card_is_rejected() {
        let addr = address();
        let mut c = card();
        c.expiry = "07/26".to_string(); // one month before `now`
        assert_eq!(
            validate(Some(&addr), &PaymentMethod::Card(c), now()),
            Err(CheckoutError::CardExpired)
        );
    }

    #[test]
    fn test_current_month_is_still_valid() {
        let addr = address();
        let mut c = card();
        c.expiry = "08/26".to_string();
        assert!(validate(Some(&addr), &PaymentMethod::Card(c), now()).is_ok());
    }

    #[test]
    fn test_malformed_expiry_is_rejected() {
        let addr = address();
        for expiry in ["1299", "1/99", "13/99", "ab/cd", "12/199"] {
            let mut c = card();
            c.expiry = expiry.to_string();
            assert_eq!(
                validate(Some(&addr), &PaymentMethod::Card(c), now()),
                Err(CheckoutError::InvalidExpiryFormat),
                "expiry {expiry:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_cvv_must_have_3_digits() {
        let addr = address();
        for cvv in ["12", "1234", "12a"] {
            let mut c = card();
            c.cvv = cvv.to_string();
            assert_eq!(
                validate(Some(&addr), &PaymentMethod::Card(c), now()),
                Err(CheckoutError::InvalidCvv),
                "cvv {cvv:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_holder_name_required() {
        let addr = address();
        let mut c = card();
        c.holder = "   ".to_string();
        assert_eq!(
            validate(Some(&addr), &PaymentMethod::Card(c), now()),
            Err(CheckoutError::CardHolderRequired)
        );
    }

    #[test]
    fn test_first_failing_field_wins() {
        // Both the number and the CVV are bad; the number is reported.
        let addr = address();
        let mut c = card();
        c.number = "1".to_string();
        c.cvv = "1".to_string();
        assert_eq!(
            validate(Some(&addr), &PaymentMethod::Card(c), now()),
            Err(CheckoutError::InvalidCardNumber)
        );
    }

    #[test]
    fn test_payment_method_kind_drops_card_details() {
        assert_eq!(PaymentMethod::Card(card()).kind(), PaymentMethodKind::Card);
        assert_eq!(
            PaymentMethod::CashOnDelivery.kind(),
            PaymentMethodKind::CashOnDelivery
        );
    }
}
