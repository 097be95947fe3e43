//! HTTP route handlers for the Orchard API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                   - Liveness check
//! GET  /health/ready             - Readiness check (verifies database)
//!
//! # Auth
//! POST /register                 - Create an account
//! POST /login                    - Issue a bearer token
//! POST /check-token              - Resolve a token to its account
//! POST /logout                   - Revoke a token
//!
//! # Catalog
//! GET  /categories-and-products  - Categories with their product summaries
//! GET  /product/{id}             - Product detail
//!
//! # Cart
//! POST /add-to-cart              - Add quantity of a product
//! POST /remove-from-cart         - Drop a product's line
//! GET  /cart?token=              - Current cart lines
//!
//! # Orders
//! POST /create-order             - Convert the cart into a priced order
//! POST /remove-order             - Delete a still-pending order
//! GET  /orders?token=            - Order history with line items
//! ```
//!
//! Every success body carries `status: "success"`, every failure
//! `{"status": "error", "message": ...}`, except the listing endpoints which
//! return bare JSON arrays. The bearer token travels in the request body (or
//! query string for GETs), not in a header.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod orders;

use axum::{
    Router,
    routing::{get, post},
};
use serde::Serialize;

use crate::state::AppState;

/// Success envelope for endpoints that only report a message.
#[derive(Debug, Serialize)]
pub struct StatusMessage {
    pub status: &'static str,
    pub message: &'static str,
}

impl StatusMessage {
    /// A `status: "success"` envelope with the given message.
    #[must_use]
    pub const fn success(message: &'static str) -> Self {
        Self {
            status: "success",
            message,
        }
    }
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/check-token", post(auth::check_token))
        .route("/logout", post(auth::logout))
}

/// Create the catalog routes router.
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/categories-and-products",
            get(catalog::categories_and_products),
        )
        .route("/product/{id}", get(catalog::product))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/add-to-cart", post(cart::add_to_cart))
        .route("/remove-from-cart", post(cart::remove_from_cart))
        .route("/cart", get(cart::cart))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/create-order", post(orders::create_order))
        .route("/remove-order", post(orders::remove_order))
        .route("/orders", get(orders::orders))
}

/// Create all routes for the API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(catalog_routes())
        .merge(cart_routes())
        .merge(order_routes())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_shape() {
        let body = StatusMessage::success("Order created successfully");
        let json = serde_json::to_value(body).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["message"], "Order created successfully");
    }
}
