//! Cart endpoints for the active session.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use domain::{CartLine, OrderSummary};
use serde::{Deserialize, Serialize};
use services::CartService;
use storage::CatalogStore as _;

use crate::error::ApiError;
use crate::state::AppState;

// -- Request types --

#[derive(Deserialize)]
pub struct AddToCartRequest {
    pub item_id: u32,
}

#[derive(Deserialize)]
pub struct UpdateQuantityRequest {
    pub quantity: u32,
}

// -- Response types --

#[derive(Serialize)]
pub struct CartLineResponse {
    pub item_id: u32,
    pub name: String,
    pub unit_price: String,
    pub quantity: u32,
    pub line_total: String,
    pub image_url: String,
    pub genre: String,
    pub platform: String,
}

#[derive(Serialize)]
pub struct SummaryResponse {
    pub subtotal: String,
    pub tax: String,
    pub total: String,
    pub total_items: u32,
}

#[derive(Serialize)]
pub struct CartResponse {
    pub lines: Vec<CartLineResponse>,
    pub summary: SummaryResponse,
}

impl CartLineResponse {
    fn from_line(line: &CartLine) -> Self {
        Self {
            item_id: line.item_id.as_u32(),
            name: line.name.clone(),
            unit_price: line.unit_price.to_display_string(),
            quantity: line.quantity,
            line_total: line.line_total().to_display_string(),
            image_url: line.image_url.clone(),
            genre: line.genre.clone(),
            platform: line.platform.clone(),
        }
    }
}

impl SummaryResponse {
    pub fn from_summary(summary: &OrderSummary) -> Self {
        Self {
            subtotal: summary.subtotal.to_display_string(),
            tax: summary.tax.to_display_string(),
            total: summary.total.to_display_string(),
            total_items: summary.total_items,
        }
    }
}

fn cart_view(cart: &CartService) -> CartResponse {
    CartResponse {
        lines: cart.lines().iter().map(CartLineResponse::from_line).collect(),
        summary: SummaryResponse::from_summary(&cart.summary()),
    }
}

// -- Handlers --

/// GET /cart — current lines and totals.
#[tracing::instrument(skip(state))]
pub async fn get(State(state): State<Arc<AppState>>) -> Json<CartResponse> {
    let cart = state.cart.lock().await;
    Json(cart_view(&cart))
}

/// POST /cart/items — add one unit of an item.
#[tracing::instrument(skip(state, req), fields(item_id = req.item_id))]
pub async fn add_item(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AddToCartRequest>,
) -> Result<Json<CartResponse>, ApiError> {
    let item = state
        .catalog
        .fetch_by_id(req.item_id.into())
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Item {} not found", req.item_id)))?;

    let mut cart = state.cart.lock().await;
    cart.add(&item).await?;
    Ok(Json(cart_view(&cart)))
}

/// PUT /cart/items/{id} — set a line's quantity.
#[tracing::instrument(skip(state, req))]
pub async fn update_quantity(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u32>,
    Json(req): Json<UpdateQuantityRequest>,
) -> Json<CartResponse> {
    let mut cart = state.cart.lock().await;
    cart.update_quantity(id.into(), req.quantity).await;
    Json(cart_view(&cart))
}

/// DELETE /cart/items/{id} — remove a line.
#[tracing::instrument(skip(state))]
pub async fn remove_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u32>,
) -> Json<CartResponse> {
    let mut cart = state.cart.lock().await;
    cart.remove(id.into()).await;
    Json(cart_view(&cart))
}

/// DELETE /cart — empty the cart.
#[tracing::instrument(skip(state))]
pub async fn clear(State(state): State<Arc<AppState>>) -> Json<CartResponse> {
    let mut cart = state.cart.lock().await;
    cart.clear().await;
    Json(cart_view(&cart))
}

/// GET /cart/summary — totals only.
#[tracing::instrument(skip(state))]
pub async fn summary(State(state): State<Arc<AppState>>) -> Json<SummaryResponse> {
    let cart = state.cart.lock().await;
    Json(SummaryResponse::from_summary(&cart.summary()))
}
