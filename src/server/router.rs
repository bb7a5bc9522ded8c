//! Route table for the order API

use super::handlers::{
    AppState, create_order, get_order, health, list_orders, update_order_status,
};
use axum::Router;
use axum::routing::{get, patch};

/// Build the order routes
///
/// - GET   /orders              - List orders
/// - POST  /orders              - Create a `NEW` order
/// - GET   /orders/{id}         - Get one order
/// - PATCH /orders/{id}/status  - Transition an order
/// - GET   /health, /healthz    - Liveness probe
pub fn build_order_routes(state: AppState) -> Router {
    Router::new()
        .route("/orders", get(list_orders).post(create_order))
        .route("/orders/{id}", get(get_order))
        .route("/orders/{id}/status", patch(update_order_status))
        .route("/health", get(health))
        .route("/healthz", get(health))
        .with_state(state)
}
