//! Database operations for the Orchard `PostgreSQL` database.
//!
//! ## Tables
//!
//! - `user_account` / `auth_token` - accounts and opaque bearer tokens
//! - `category` / `product` - catalog
//! - `cart` / `cart_item` - one mutable basket per user
//! - `coupon` - discount rules
//! - `customer_order` / `order_item` - immutable priced orders
//! - `review` - per-product ratings (no API surface yet)
//!
//! Queries use the runtime sqlx API (`query`/`query_as` with `FromRow`) so the
//! workspace builds without a live database.
//!
//! # Migrations
//!
//! Migrations live in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p orchard-cli -- migrate
//! ```

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub mod carts;
pub mod catalog;
pub mod coupons;
pub mod orders;
pub mod tokens;
pub mod users;

/// Errors surfaced by repositories.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique username).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
