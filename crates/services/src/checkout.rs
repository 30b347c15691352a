//! Checkout service: builds immutable orders out of carts or a single
//! buy-now selection.

use std::sync::Arc;

use chrono::Utc;
use common::UserId;
use domain::{
    Address, CartError, CartLine, Item, Order, OrderStatus, PaymentMethod, checkout,
};
use storage::{UserPatch, UserStore};

use crate::cart::CartService;
use crate::error::{Result, ServiceError};
use crate::payment::PaymentGateway;

/// Orchestrates checkout: validation, payment, and history persistence.
///
/// Validation failures abort before anything is charged or written. A
/// gateway or persistence failure after that point surfaces the generic
/// payment error and leaves the cart untouched, so the user keeps their
/// selection.
pub struct CheckoutService {
    users: Arc<dyn UserStore>,
    gateway: Arc<dyn PaymentGateway>,
}

impl CheckoutService {
    /// Creates a new checkout service.
    pub fn new(users: Arc<dyn UserStore>, gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { users, gateway }
    }

    /// Checks out the whole cart.
    ///
    /// On success the order has been appended to the user's purchase
    /// history and the cart is cleared.
    #[tracing::instrument(skip(self, cart, address, method), fields(user_id = %user_id))]
    pub async fn checkout_cart(
        &self,
        user_id: UserId,
        cart: &mut CartService,
        address: Option<&Address>,
        method: &PaymentMethod,
    ) -> Result<Order> {
        checkout::validate(address, method, Utc::now())?;

        if cart.is_empty() {
            return Err(ServiceError::EmptyCart);
        }

        let lines = cart.lines().to_vec();
        let order = self.place(user_id, &lines, method).await?;

        cart.clear().await;
        Ok(order)
    }

    /// Checks out a single item directly, bypassing (and never touching)
    /// the cart. Quantities below 1 are bumped to 1.
    #[tracing::instrument(skip(self, item, address, method), fields(user_id = %user_id, item_id = %item.id))]
    pub async fn buy_now(
        &self,
        user_id: UserId,
        item: &Item,
        quantity: u32,
        address: Option<&Address>,
        method: &PaymentMethod,
    ) -> Result<Order> {
        checkout::validate(address, method, Utc::now())?;

        if !item.in_stock {
            return Err(ServiceError::Cart(CartError::OutOfStock {
                name: item.name.clone(),
            }));
        }

        let mut line = CartLine::snapshot(item);
        line.quantity = quantity.max(1);

        self.place(user_id, std::slice::from_ref(&line), method).await
    }

    async fn place(
        &self,
        user_id: UserId,
        lines: &[CartLine],
        method: &PaymentMethod,
    ) -> Result<Order> {
        let mut order = Order::from_lines(lines, method.kind());
        tracing::info!(order_id = %order.id, total = %order.summary.total, "taking payment");

        self.gateway
            .authorize(method.kind(), order.summary.total)
            .await
            .map_err(|err| {
                tracing::warn!(error = %err, order_id = %order.id, "payment authorization failed");
                ServiceError::PaymentFailed
            })?;

        let user = self
            .users
            .get(user_id)
            .await
            .map_err(|err| {
                tracing::error!(error = %err, "user lookup failed during checkout");
                ServiceError::PaymentFailed
            })?
            .ok_or(ServiceError::UserNotFound(user_id))?;

        order.status = OrderStatus::Completed;

        let mut history = user.purchase_history;
        history.push(order.clone());
        self.users
            .patch(user_id, UserPatch::purchase_history(history))
            .await
            .map_err(|err| {
                tracing::error!(error = %err, order_id = %order.id, "order persistence failed");
                ServiceError::PaymentFailed
            })?;

        metrics::counter!("orders_placed_total").increment(1);
        tracing::info!(order_id = %order.id, "order placed");
        Ok(order)
    }
}
