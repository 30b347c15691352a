//! User profile records.

use common::UserId;
use serde::{Deserialize, Serialize};

use crate::order::Order;
use crate::wishlist::WishlistEntry;

/// A shipping address on a user profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Position of the address within the profile.
    pub id: u32,
    pub recipient: String,
    pub street: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
}

impl Address {
    /// Creates a new address.
    pub fn new(
        id: u32,
        recipient: impl Into<String>,
        street: impl Into<String>,
        city: impl Into<String>,
        postal_code: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            id,
            recipient: recipient.into(),
            street: street.into(),
            city: city.into(),
            postal_code: postal_code.into(),
            country: country.into(),
        }
    }
}

/// A user account as held by the user-resource collaborator.
///
/// The purchase history and wishlist live on the profile; the active cart
/// does not (it is session-scoped key-value state).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub name: String,

    #[serde(default)]
    pub addresses: Vec<Address>,

    #[serde(default)]
    pub purchase_history: Vec<Order>,

    #[serde(default)]
    pub wishlist: Vec<WishlistEntry>,
}

impl User {
    /// Creates a user with a fresh id and empty profile lists.
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: UserId::new(),
            email: email.into(),
            name: name.into(),
            addresses: Vec::new(),
            purchase_history: Vec::new(),
            wishlist: Vec::new(),
        }
    }

    /// Adds an address and returns the modified user (builder style).
    pub fn with_address(mut self, address: Address) -> Self {
        self.addresses.push(address);
        self
    }

    /// Looks up an address by its id.
    pub fn address_by_id(&self, id: u32) -> Option<&Address> {
        self.addresses.iter().find(|address| address.id == id)
    }

    /// Returns true if any history entry carries the given order id.
    pub fn has_order(&self, order_id: &crate::order::OrderId) -> bool {
        self.purchase_history.iter().any(|order| &order.id == order_id)
    }
}
