use axum::{
    extract::State,
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use hangar_core::identity::{parse_uuid, parse_uuids};
use hangar_core::payment::PaymentMethod;
use hangar_order::{Order, OrderStatus};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, AppJson, AppPath};
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub user_uuid: String,
    pub part_uuids: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateOrderResponse {
    pub order_uuid: Uuid,
    pub total_price_minor: u64,
}

#[derive(Debug, Deserialize)]
pub struct PayOrderRequest {
    pub payment_method: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PayOrderResponse {
    pub transaction_uuid: Uuid,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OrderResponse {
    pub order_uuid: Uuid,
    pub user_uuid: Uuid,
    pub part_uuids: Vec<Uuid>,
    pub total_price_minor: u64,
    pub status: OrderStatus,
    pub transaction_uuid: Option<Uuid>,
    pub payment_method: Option<PaymentMethod>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            order_uuid: order.order_uuid,
            user_uuid: order.user_uuid,
            part_uuids: order.part_uuids,
            total_price_minor: order.total_price_minor,
            status: order.status,
            transaction_uuid: order.transaction_uuid,
            payment_method: order.payment_method,
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/orders", post(create_order))
        .route("/orders/{order_uuid}", get(get_order))
        .route("/orders/{order_uuid}/pay", post(pay_order))
        .route("/orders/{order_uuid}/cancel", post(cancel_order))
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /orders
/// Price the requested parts and open an order
pub async fn create_order(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreateOrderRequest>,
) -> Result<AppJson<CreateOrderResponse>, AppError> {
    let user_uuid = parse_uuid("user_uuid", &req.user_uuid)?;
    let part_uuids = parse_uuids("part_uuids", &req.part_uuids)?;

    let order = state.orders.create_order(user_uuid, part_uuids).await?;

    Ok(AppJson(CreateOrderResponse {
        order_uuid: order.order_uuid,
        total_price_minor: order.total_price_minor,
    }))
}

/// GET /orders/{order_uuid}
pub async fn get_order(
    State(state): State<AppState>,
    AppPath(order_uuid): AppPath<String>,
) -> Result<AppJson<OrderResponse>, AppError> {
    let order_uuid = parse_uuid("order_uuid", &order_uuid)?;
    let order = state.orders.get_order(order_uuid).await?;
    Ok(AppJson(order.into()))
}

/// POST /orders/{order_uuid}/pay
pub async fn pay_order(
    State(state): State<AppState>,
    AppPath(order_uuid): AppPath<String>,
    AppJson(req): AppJson<PayOrderRequest>,
) -> Result<AppJson<PayOrderResponse>, AppError> {
    let order_uuid = parse_uuid("order_uuid", &order_uuid)?;
    // Unknown names fall back to Unspecified, which the orchestrator rejects
    // only after the status checks
    let method: PaymentMethod = req.payment_method.parse().unwrap_or_default();

    let transaction_uuid = state.orders.pay_order(order_uuid, method).await?;

    Ok(AppJson(PayOrderResponse { transaction_uuid }))
}

/// POST /orders/{order_uuid}/cancel
pub async fn cancel_order(
    State(state): State<AppState>,
    AppPath(order_uuid): AppPath<String>,
) -> Result<AppJson<OrderResponse>, AppError> {
    let order_uuid = parse_uuid("order_uuid", &order_uuid)?;
    let order = state.orders.cancel_order(order_uuid).await?;
    Ok(AppJson(order.into()))
}
