//! Back-office endpoints: the order ledger and user management.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use common::UserId;
use domain::{OrderStatus, User};
use projections::LedgerEntry;
use serde::{Deserialize, Serialize};
use storage::UserStore as _;

use crate::error::ApiError;
use crate::routes::checkout::OrderResponse;
use crate::state::AppState;

// -- Request types --

#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub name: String,
}

#[derive(Deserialize)]
pub struct UpdateUserRequest {
    pub email: String,
    pub name: String,
}

// -- Response types --

#[derive(Serialize)]
pub struct LedgerEntryResponse {
    pub user_id: String,
    pub user_email: String,
    pub user_name: String,
    #[serde(flatten)]
    pub order: OrderResponse,
}

impl LedgerEntryResponse {
    fn from_entry(entry: &LedgerEntry) -> Self {
        Self {
            user_id: entry.user_id.to_string(),
            user_email: entry.user_email.clone(),
            user_name: entry.user_name.clone(),
            order: OrderResponse::from_order(&entry.order),
        }
    }
}

#[derive(Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub name: String,
    pub address_count: usize,
    pub order_count: usize,
    pub wishlist_count: usize,
}

impl UserResponse {
    fn from_user(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.clone(),
            name: user.name.clone(),
            address_count: user.addresses.len(),
            order_count: user.purchase_history.len(),
            wishlist_count: user.wishlist.len(),
        }
    }
}

#[derive(Serialize)]
pub struct UserCreatedResponse {
    pub id: String,
}

// -- Order ledger handlers --

/// GET /admin/orders — rebuild and return the flattened order ledger.
#[tracing::instrument(skip(state))]
pub async fn list_orders(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<LedgerEntryResponse>>, ApiError> {
    state.ledger.refresh().await?;

    let entries = state.ledger.entries().await;
    Ok(Json(
        entries.iter().map(LedgerEntryResponse::from_entry).collect(),
    ))
}

/// PUT /admin/orders/{id}/status — reassign an order's status.
#[tracing::instrument(skip(state, req))]
pub async fn update_order_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<StatusCode, ApiError> {
    let status: OrderStatus = req
        .status
        .parse()
        .map_err(|err: domain::UnknownStatus| ApiError::BadRequest(err.to_string()))?;

    state.ledger.refresh().await?;
    state.ledger.update_status(&id.as_str().into(), status).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /admin/orders/{id} — remove an order from its owner's history.
#[tracing::instrument(skip(state))]
pub async fn delete_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.ledger.refresh().await?;
    state.ledger.delete(&id.as_str().into()).await?;
    Ok(StatusCode::NO_CONTENT)
}

// -- User management handlers --

/// GET /admin/users — list all users.
#[tracing::instrument(skip(state))]
pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = state.users.list().await?;
    Ok(Json(users.iter().map(UserResponse::from_user).collect()))
}

/// POST /admin/users — create a user.
#[tracing::instrument(skip(state, req))]
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserCreatedResponse>), ApiError> {
    let user = User::new(req.email, req.name);
    let id = user.id;
    state.users.create(user).await?;

    Ok((
        StatusCode::CREATED,
        Json(UserCreatedResponse { id: id.to_string() }),
    ))
}

/// PUT /admin/users/{id} — update a user's profile fields.
#[tracing::instrument(skip(state, req))]
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let user_id = parse_user_id(&id)?;
    let mut user = state
        .users
        .get(user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("User {id} not found")))?;

    user.email = req.email;
    user.name = req.name;
    state.users.update(user.clone()).await?;

    Ok(Json(UserResponse::from_user(&user)))
}

/// DELETE /admin/users/{id} — remove a user and, with them, their orders.
#[tracing::instrument(skip(state))]
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let user_id = parse_user_id(&id)?;
    state.users.delete(user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn parse_user_id(id: &str) -> Result<UserId, ApiError> {
    let uuid = uuid::Uuid::parse_str(id)
        .map_err(|e| ApiError::BadRequest(format!("Invalid user id: {e}")))?;
    Ok(UserId::from(uuid))
}
