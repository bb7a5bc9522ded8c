//! Order HTTP handlers
//!
//! Each handler is stateless apart from the shared repository handle; the
//! `Order` values it touches live only for the duration of one request.

use crate::core::error::{ApiError, OrderError};
use crate::core::order::{FailReason, Order, OrderStatus};
use crate::core::repository::{OrderRepository, StatusChange};
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use chrono::Utc;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use uuid::Uuid;

/// Shared state handed to every order handler
#[derive(Clone)]
pub struct AppState {
    pub orders: Arc<dyn OrderRepository>,
}

impl AppState {
    pub fn new(orders: Arc<dyn OrderRepository>) -> Self {
        Self { orders }
    }
}

/// Body of `PATCH /orders/{id}/status`
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    /// Target status, one of `NEW`, `RESERVED`, `CONFIRMED`, `FAILED`
    pub status: String,
    /// Version the caller last observed
    pub expected_version: i64,
    #[serde(default)]
    pub fail_reason_code: Option<String>,
    #[serde(default)]
    pub fail_reason_detail: Option<String>,
}

impl UpdateStatusRequest {
    fn into_change(self) -> Result<StatusChange, ApiError> {
        let status: OrderStatus = self.status.parse()?;

        let fail_reason = match (self.fail_reason_code, self.fail_reason_detail) {
            (Some(code), detail) => Some(FailReason::new(code, detail)?),
            (None, Some(_)) => {
                return Err(OrderError::InvalidFailReason(
                    "detail given without a code".to_string(),
                )
                .into());
            }
            (None, None) => None,
        };

        Ok(StatusChange {
            status,
            fail_reason,
        })
    }
}

fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::InvalidId)
}

/// GET /orders
pub async fn list_orders(State(state): State<AppState>) -> Result<Json<Vec<Order>>, ApiError> {
    let orders = state
        .orders
        .list()
        .await
        .map_err(|e| ApiError::from_repository(e, "failed to fetch orders"))?;

    Ok(Json(orders))
}

/// POST /orders
///
/// Takes no body; the order starts out `NEW`.
pub async fn create_order(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<Order>), ApiError> {
    let created = state
        .orders
        .create(Order::new())
        .await
        .map_err(|e| ApiError::from_repository(e, "failed to create order"))?;

    tracing::info!(order_id = %created.id, "order created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /orders/{id}
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Order>, ApiError> {
    let id = parse_id(&id)?;

    let order = state
        .orders
        .get_by_id(&id)
        .await
        .map_err(|e| ApiError::from_repository(e, "failed to fetch order"))?;

    Ok(Json(order))
}

/// PATCH /orders/{id}/status
pub async fn update_order_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<UpdateStatusRequest>, JsonRejection>,
) -> Result<Json<Order>, ApiError> {
    let id = parse_id(&id)?;
    let Json(request) = body.map_err(|e| ApiError::InvalidBody(e.body_text()))?;
    let expected_version = request.expected_version;
    let change = request.into_change()?;
    let target = change.status;

    let order = state
        .orders
        .update_status(&id, expected_version, change, Utc::now())
        .await
        .map_err(|e| ApiError::from_repository(e, "failed to update order"))?;

    if order.version != expected_version {
        tracing::info!(
            order_id = %order.id,
            status = %target,
            version = order.version,
            "order status changed"
        );
    } else {
        tracing::debug!(order_id = %order.id, status = %target, "order status unchanged");
    }
    Ok(Json(order))
}

/// GET /health and GET /healthz
///
/// Reports that the process is serving HTTP; storage is not consulted.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
