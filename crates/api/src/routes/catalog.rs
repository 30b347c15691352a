//! Catalog browsing endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use domain::Item;
use serde::Serialize;
use storage::CatalogStore as _;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Serialize)]
pub struct ItemResponse {
    pub id: u32,
    pub name: String,
    pub price: String,
    pub in_stock: bool,
    pub genre: String,
    pub platform: String,
    pub image_url: String,
}

impl ItemResponse {
    pub fn from_item(item: &Item) -> Self {
        Self {
            id: item.id.as_u32(),
            name: item.name.clone(),
            price: item.price.to_display_string(),
            in_stock: item.in_stock,
            genre: item.genre.clone(),
            platform: item.platform.clone(),
            image_url: item.image_url.clone(),
        }
    }
}

/// GET /items — the full catalog.
#[tracing::instrument(skip(state))]
pub async fn list(State(state): State<Arc<AppState>>) -> Result<Json<Vec<ItemResponse>>, ApiError> {
    let items = state.catalog.fetch_all().await?;
    Ok(Json(items.iter().map(ItemResponse::from_item).collect()))
}

/// GET /items/{id} — a single catalog item.
#[tracing::instrument(skip(state))]
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u32>,
) -> Result<Json<ItemResponse>, ApiError> {
    let item = state
        .catalog
        .fetch_by_id(id.into())
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Item {id} not found")))?;

    Ok(Json(ItemResponse::from_item(&item)))
}
