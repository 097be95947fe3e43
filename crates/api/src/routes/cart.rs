//! Cart route handlers.

use axum::{
    Json,
    extract::{Query, State},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use orchard_core::ProductId;

use crate::error::{AppError, Result};
use crate::routes::StatusMessage;
use crate::services::auth::AuthService;
use crate::services::cart::CartService;
use crate::state::AppState;

// =============================================================================
// Request / Response Types
// =============================================================================

/// Add-to-cart request body.
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub token: Option<String>,
    pub product_id: Option<i32>,
    pub quantity: Option<i32>,
}

/// Remove-from-cart request body.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartRequest {
    pub token: Option<String>,
    pub product_id: Option<i32>,
}

/// Query parameters for reading the cart.
#[derive(Debug, Deserialize)]
pub struct CartQuery {
    pub token: Option<String>,
}

/// One cart line as shown to the client.
#[derive(Debug, Serialize)]
pub struct CartLineResponse {
    pub product_id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub quantity: i32,
    pub total_price: Decimal,
}

// =============================================================================
// Handlers
// =============================================================================

/// Add a quantity of a product to the caller's cart.
///
/// POST /add-to-cart
///
/// Quantities accumulate across repeated calls for the same product.
pub async fn add_to_cart(
    State(state): State<AppState>,
    Json(req): Json<AddToCartRequest>,
) -> Result<Json<StatusMessage>> {
    let (Some(token), Some(product_id), Some(quantity)) =
        (req.token, req.product_id, req.quantity)
    else {
        return Err(AppError::Validation("Invalid data".to_owned()));
    };
    if quantity < 1 {
        return Err(AppError::Validation("Invalid data".to_owned()));
    }

    let auth = AuthService::new(state.pool(), state.config().token_ttl());
    let user = auth.verify(&token).await?;

    let carts = CartService::new(state.pool());
    carts.add(user.id, ProductId::new(product_id), quantity).await?;

    Ok(Json(StatusMessage::success("Product added to cart")))
}

/// Drop a product's line from the caller's cart.
///
/// POST /remove-from-cart
///
/// Removing a product that isn't in the cart still succeeds.
pub async fn remove_from_cart(
    State(state): State<AppState>,
    Json(req): Json<RemoveFromCartRequest>,
) -> Result<Json<StatusMessage>> {
    let (Some(token), Some(product_id)) = (req.token, req.product_id) else {
        return Err(AppError::Validation("Invalid data".to_owned()));
    };

    let auth = AuthService::new(state.pool(), state.config().token_ttl());
    let user = auth.verify(&token).await?;

    let carts = CartService::new(state.pool());
    carts.remove(user.id, ProductId::new(product_id)).await?;

    Ok(Json(StatusMessage::success("Product removed from cart")))
}

/// The caller's cart lines, as a bare JSON array.
///
/// GET /cart?token=
pub async fn cart(
    State(state): State<AppState>,
    Query(query): Query<CartQuery>,
) -> Result<Json<Vec<CartLineResponse>>> {
    let Some(token) = query.token else {
        return Err(AppError::Validation("Invalid data".to_owned()));
    };

    let auth = AuthService::new(state.pool(), state.config().token_ttl());
    let user = auth.verify(&token).await?;

    let carts = CartService::new(state.pool());
    let lines = carts.list(user.id).await?;

    let body = lines
        .into_iter()
        .map(|line| {
            let total_price = line.line_total();
            CartLineResponse {
                product_id: line.product_id,
                name: line.name,
                price: line.unit_price,
                quantity: line.quantity,
                total_price,
            }
        })
        .collect();

    Ok(Json(body))
}
