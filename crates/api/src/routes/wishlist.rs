//! Wishlist endpoints for the active session.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use domain::WishlistEntry;
use serde::{Deserialize, Serialize};
use storage::CatalogStore as _;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SaveItemRequest {
    pub item_id: u32,
}

#[derive(Serialize)]
pub struct WishlistEntryResponse {
    pub item_id: u32,
    pub name: String,
    pub price: String,
    pub image_url: String,
    pub genre: String,
    pub platform: String,
}

impl WishlistEntryResponse {
    fn from_entry(entry: &WishlistEntry) -> Self {
        Self {
            item_id: entry.item_id.as_u32(),
            name: entry.name.clone(),
            price: entry.price.to_display_string(),
            image_url: entry.image_url.clone(),
            genre: entry.genre.clone(),
            platform: entry.platform.clone(),
        }
    }
}

#[derive(Serialize)]
pub struct WishlistResponse {
    pub entries: Vec<WishlistEntryResponse>,
}

#[derive(Serialize)]
pub struct SaveItemResponse {
    /// False when the item was already saved (duplicate notice).
    pub added: bool,
    pub entries: Vec<WishlistEntryResponse>,
}

fn entries_view(entries: &[WishlistEntry]) -> Vec<WishlistEntryResponse> {
    entries.iter().map(WishlistEntryResponse::from_entry).collect()
}

/// GET /wishlist — saved items.
#[tracing::instrument(skip(state))]
pub async fn get(State(state): State<Arc<AppState>>) -> Json<WishlistResponse> {
    let wishlist = state.wishlist.lock().await;
    Json(WishlistResponse {
        entries: entries_view(wishlist.entries()),
    })
}

/// POST /wishlist/items — save an item for later.
#[tracing::instrument(skip(state, req), fields(item_id = req.item_id))]
pub async fn save_item(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SaveItemRequest>,
) -> Result<Json<SaveItemResponse>, ApiError> {
    let item = state
        .catalog
        .fetch_by_id(req.item_id.into())
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Item {} not found", req.item_id)))?;

    let mut wishlist = state.wishlist.lock().await;
    let added = wishlist.add(&item).await?;
    Ok(Json(SaveItemResponse {
        added,
        entries: entries_view(wishlist.entries()),
    }))
}

/// DELETE /wishlist/items/{id} — forget a saved item.
#[tracing::instrument(skip(state))]
pub async fn remove_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u32>,
) -> Result<Json<WishlistResponse>, ApiError> {
    let mut wishlist = state.wishlist.lock().await;
    wishlist.remove(id.into()).await?;
    Ok(Json(WishlistResponse {
        entries: entries_view(wishlist.entries()),
    }))
}

/// DELETE /wishlist — forget everything.
#[tracing::instrument(skip(state))]
pub async fn clear(State(state): State<Arc<AppState>>) -> Result<Json<WishlistResponse>, ApiError> {
    let mut wishlist = state.wishlist.lock().await;
    wishlist.clear().await?;
    Ok(Json(WishlistResponse {
        entries: entries_view(wishlist.entries()),
    }))
}
