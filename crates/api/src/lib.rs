//! HTTP API server with observability for the storefront.
//!
//! Exposes the catalog, the session cart and wishlist, checkout, and the
//! admin back office over REST, with structured logging (tracing) and
//! Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use std::sync::Arc;

use axum::Router;
use axum::routing::{delete, get, post, put};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use state::{AppState, create_default_state, demo_catalog};

/// Creates the Axum application router with all routes and shared state.
pub fn create_app(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::render))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        // Catalog
        .route("/items", get(routes::catalog::list))
        .route("/items/{id}", get(routes::catalog::get))
        // Cart
        .route("/cart", get(routes::cart::get))
        .route("/cart", delete(routes::cart::clear))
        .route("/cart/summary", get(routes::cart::summary))
        .route("/cart/items", post(routes::cart::add_item))
        .route("/cart/items/{id}", put(routes::cart::update_quantity))
        .route("/cart/items/{id}", delete(routes::cart::remove_item))
        // Wishlist
        .route("/wishlist", get(routes::wishlist::get))
        .route("/wishlist", delete(routes::wishlist::clear))
        .route("/wishlist/items", post(routes::wishlist::save_item))
        .route("/wishlist/items/{id}", delete(routes::wishlist::remove_item))
        // Checkout
        .route("/checkout", post(routes::checkout::place_order))
        .route("/checkout/buy-now", post(routes::checkout::buy_now))
        .route("/checkout/last-order", get(routes::checkout::last_order))
        // Admin
        .route("/admin/orders", get(routes::admin::list_orders))
        .route(
            "/admin/orders/{id}/status",
            put(routes::admin::update_order_status),
        )
        .route("/admin/orders/{id}", delete(routes::admin::delete_order))
        .route("/admin/users", get(routes::admin::list_users))
        .route("/admin/users", post(routes::admin::create_user))
        .route("/admin/users/{id}", put(routes::admin::update_user))
        .route("/admin/users/{id}", delete(routes::admin::delete_user))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
