//! Order endpoints: create, get, pay and cancel.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use common::{OrderId, PartId, UserId};
use orders::{Order, PaymentMethod};
use serde::{Deserialize, Serialize};

use super::{AppState, with_deadline};
use crate::error::ApiError;

// -- Request types --

#[derive(Deserialize)]
pub struct CreateOrderRequest {
    pub user_uuid: String,
    pub part_uuids: Vec<String>,
}

#[derive(Deserialize)]
pub struct PayOrderRequest {
    pub payment_method: PaymentMethod,
}

// -- Response types --

#[derive(Serialize)]
pub struct CreateOrderResponse {
    pub order_uuid: String,
    pub total_price: f64,
    pub total_price_cents: i64,
}

#[derive(Serialize)]
pub struct OrderResponse {
    pub order_uuid: String,
    pub user_uuid: String,
    pub part_uuids: Vec<String>,
    pub total_price: f64,
    pub total_price_cents: i64,
    pub transaction_uuid: Option<String>,
    pub payment_method: Option<String>,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            order_uuid: order.id().to_string(),
            user_uuid: order.user_id().to_string(),
            part_uuids: order.part_ids().iter().map(|p| p.to_string()).collect(),
            total_price: order.total_price().as_decimal(),
            total_price_cents: order.total_price().cents(),
            transaction_uuid: order.transaction_id().map(|t| t.to_string()),
            payment_method: order.payment_method().map(|m| m.to_string()),
            status: order.status().to_string(),
            created_at: order.created_at().to_rfc3339(),
            updated_at: order.updated_at().to_rfc3339(),
        }
    }
}

#[derive(Serialize)]
pub struct PayOrderResponse {
    pub transaction_uuid: String,
}

// -- Handlers --

/// POST /api/v1/orders: create an order from catalog parts.
#[tracing::instrument(skip(state, payload))]
pub async fn create(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> Result<Json<CreateOrderResponse>, ApiError> {
    let Json(req) = payload?;
    let user_id: UserId = req
        .user_uuid
        .parse()
        .map_err(|e| ApiError::BadRequest(format!("Invalid user_uuid: {e}")))?;
    let part_ids: Vec<PartId> = req.part_uuids.into_iter().map(PartId::from).collect();

    let created = with_deadline(
        state.request_timeout,
        state.orders.create_order(user_id, part_ids),
    )
    .await?;

    Ok(Json(CreateOrderResponse {
        order_uuid: created.order_id.to_string(),
        total_price: created.total_price.as_decimal(),
        total_price_cents: created.total_price.cents(),
    }))
}

/// GET /api/v1/orders/{order_uuid}
#[tracing::instrument(skip(state))]
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(order_uuid): Path<String>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order_id = parse_order_id(&order_uuid)?;
    let order = state.orders.get_order(order_id).await?;
    Ok(Json(order.into()))
}

/// POST /api/v1/orders/{order_uuid}/pay
#[tracing::instrument(skip(state, payload))]
pub async fn pay(
    State(state): State<Arc<AppState>>,
    Path(order_uuid): Path<String>,
    payload: Result<Json<PayOrderRequest>, JsonRejection>,
) -> Result<Json<PayOrderResponse>, ApiError> {
    let Json(req) = payload?;
    let order_id = parse_order_id(&order_uuid)?;

    let transaction_id = with_deadline(
        state.request_timeout,
        state.orders.pay_order(order_id, req.payment_method),
    )
    .await?;

    Ok(Json(PayOrderResponse {
        transaction_uuid: transaction_id.to_string(),
    }))
}

/// POST /api/v1/orders/{order_uuid}/cancel
#[tracing::instrument(skip(state))]
pub async fn cancel(
    State(state): State<Arc<AppState>>,
    Path(order_uuid): Path<String>,
) -> Result<StatusCode, ApiError> {
    let order_id = parse_order_id(&order_uuid)?;
    state.orders.cancel_order(order_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn parse_order_id(id: &str) -> Result<OrderId, ApiError> {
    id.parse()
        .map_err(|e| ApiError::BadRequest(format!("Invalid order_uuid: {e}")))
}
