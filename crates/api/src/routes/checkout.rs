//! Checkout endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use domain::{Order, PaymentMethod};
use serde::{Deserialize, Serialize};
use storage::{CatalogStore as _, UserStore as _};

use crate::error::ApiError;
use crate::routes::cart::SummaryResponse;
use crate::state::AppState;

// -- Request types --

#[derive(Deserialize)]
pub struct CheckoutRequest {
    /// Which of the user's addresses to ship to.
    pub address_id: Option<u32>,
    pub payment: PaymentMethod,
}

#[derive(Deserialize)]
pub struct BuyNowRequest {
    pub item_id: u32,
    pub quantity: u32,
    pub address_id: Option<u32>,
    pub payment: PaymentMethod,
}

// -- Response types --

#[derive(Serialize)]
pub struct OrderLineResponse {
    pub item_id: u32,
    pub name: String,
    pub unit_price: String,
    pub quantity: u32,
    pub image_url: String,
}

#[derive(Serialize)]
pub struct OrderResponse {
    pub id: String,
    pub status: String,
    pub placed_at: String,
    pub payment_method: String,
    pub items: Vec<OrderLineResponse>,
    pub summary: SummaryResponse,
}

impl OrderResponse {
    pub fn from_order(order: &Order) -> Self {
        Self {
            id: order.id.to_string(),
            status: order.status.to_string(),
            placed_at: order.placed_at.to_rfc3339(),
            payment_method: order.payment_method.to_string(),
            items: order
                .items
                .iter()
                .map(|line| OrderLineResponse {
                    item_id: line.item_id.as_u32(),
                    name: line.name.clone(),
                    unit_price: line.unit_price.to_display_string(),
                    quantity: line.quantity,
                    image_url: line.image_url.clone(),
                })
                .collect(),
            summary: SummaryResponse::from_summary(&order.summary),
        }
    }
}

// -- Handlers --

/// POST /checkout — place an order from the current cart.
#[tracing::instrument(skip(state, req))]
pub async fn place_order(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CheckoutRequest>,
) -> Result<(StatusCode, Json<OrderResponse>), ApiError> {
    metrics::counter!("checkout_requests_total").increment(1);
    let user = state
        .users
        .get(state.session_user)
        .await?
        .ok_or_else(|| ApiError::NotFound("Session user not found".to_string()))?;
    let address = req.address_id.and_then(|id| user.address_by_id(id));

    let mut cart = state.cart.lock().await;
    let order = state
        .checkout
        .checkout_cart(state.session_user, &mut cart, address, &req.payment)
        .await?;

    remember_order(&state, &order).await;
    Ok((StatusCode::CREATED, Json(OrderResponse::from_order(&order))))
}

/// POST /checkout/buy-now — place an order for a single item, skipping
/// the cart entirely.
#[tracing::instrument(skip(state, req), fields(item_id = req.item_id))]
pub async fn buy_now(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BuyNowRequest>,
) -> Result<(StatusCode, Json<OrderResponse>), ApiError> {
    metrics::counter!("checkout_requests_total").increment(1);
    let item = state
        .catalog
        .fetch_by_id(req.item_id.into())
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Item {} not found", req.item_id)))?;

    let user = state
        .users
        .get(state.session_user)
        .await?
        .ok_or_else(|| ApiError::NotFound("Session user not found".to_string()))?;
    let address = req.address_id.and_then(|id| user.address_by_id(id));

    let order = state
        .checkout
        .buy_now(
            state.session_user,
            &item,
            req.quantity,
            address,
            &req.payment,
        )
        .await?;

    remember_order(&state, &order).await;
    Ok((StatusCode::CREATED, Json(OrderResponse::from_order(&order))))
}

/// GET /checkout/last-order — the confirmation page's order, surviving a
/// session reload.
#[tracing::instrument(skip(state))]
pub async fn last_order(
    State(state): State<Arc<AppState>>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order = state
        .session
        .last_viewed_order()
        .await?
        .ok_or_else(|| ApiError::NotFound("No order has been viewed yet".to_string()))?;

    Ok(Json(OrderResponse::from_order(&order)))
}

/// Remembering the confirmation order is best-effort; losing it only costs
/// the reload view.
async fn remember_order(state: &AppState, order: &Order) {
    if let Err(err) = state.session.remember_last_viewed_order(order).await {
        tracing::warn!(error = %err, order_id = %order.id, "failed to store last-viewed order");
    }
}
