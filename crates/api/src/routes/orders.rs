//! Order route handlers.

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use orchard_core::{CouponId, OrderId, OrderStatus, ProductId};

use crate::error::{AppError, Result};
use crate::routes::StatusMessage;
use crate::services::auth::AuthService;
use crate::services::orders::OrderService;
use crate::state::AppState;

// =============================================================================
// Request / Response Types
// =============================================================================

/// Create-order request body.
#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub token: Option<String>,
    pub coupon_code: Option<String>,
}

/// Create-order response body.
#[derive(Debug, Serialize)]
pub struct CreateOrderResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub order_id: OrderId,
}

/// Remove-order request body.
#[derive(Debug, Deserialize)]
pub struct RemoveOrderRequest {
    pub order_id: Option<i32>,
}

/// Query parameters for listing orders.
#[derive(Debug, Deserialize)]
pub struct OrdersQuery {
    pub token: Option<String>,
}

/// One order in the history listing.
#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub id: OrderId,
    pub total_price: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub coupon_id: Option<CouponId>,
    pub items: Vec<OrderItemResponse>,
}

/// One snapshotted line item.
#[derive(Debug, Serialize)]
pub struct OrderItemResponse {
    pub product_id: ProductId,
    pub quantity: i32,
    pub price: Decimal,
    pub total_price: Decimal,
}

// =============================================================================
// Handlers
// =============================================================================

/// Convert the caller's cart into a priced order.
///
/// POST /create-order
pub async fn create_order(
    State(state): State<AppState>,
    Json(req): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<CreateOrderResponse>)> {
    let Some(token) = req.token else {
        return Err(AppError::Validation("Invalid data".to_owned()));
    };

    let auth = AuthService::new(state.pool(), state.config().token_ttl());
    let user = auth.verify(&token).await?;

    let orders = OrderService::new(state.pool());
    let order = orders.create(user.id, req.coupon_code.as_deref()).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateOrderResponse {
            status: "success",
            message: "Order created successfully",
            order_id: order.id,
        }),
    ))
}

/// Delete an order that is still pending.
///
/// POST /remove-order
pub async fn remove_order(
    State(state): State<AppState>,
    Json(req): Json<RemoveOrderRequest>,
) -> Result<Json<StatusMessage>> {
    let Some(order_id) = req.order_id else {
        return Err(AppError::Validation("Invalid data".to_owned()));
    };

    let orders = OrderService::new(state.pool());
    orders.remove(OrderId::new(order_id)).await?;

    Ok(Json(StatusMessage::success("Order removed successfully")))
}

/// The caller's order history, newest first, as a bare JSON array.
///
/// GET /orders?token=
pub async fn orders(
    State(state): State<AppState>,
    Query(query): Query<OrdersQuery>,
) -> Result<Json<Vec<OrderResponse>>> {
    let Some(token) = query.token else {
        return Err(AppError::Validation("Invalid data".to_owned()));
    };

    let auth = AuthService::new(state.pool(), state.config().token_ttl());
    let user = auth.verify(&token).await?;

    let service = OrderService::new(state.pool());
    let history = service.list(user.id).await?;

    let body = history
        .into_iter()
        .map(|entry| OrderResponse {
            id: entry.order.id,
            total_price: entry.order.total_price,
            status: entry.order.status,
            created_at: entry.order.created_at,
            coupon_id: entry.order.coupon_id,
            items: entry
                .items
                .into_iter()
                .map(|item| {
                    let total_price = item.line_total();
                    OrderItemResponse {
                        product_id: item.product_id,
                        quantity: item.quantity,
                        price: item.price,
                        total_price,
                    }
                })
                .collect(),
        })
        .collect();

    Ok(Json(body))
}
