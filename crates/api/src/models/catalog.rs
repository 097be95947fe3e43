//! Catalog domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use orchard_core::{CategoryId, ProductId};

/// A product category.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

/// A catalog product.
///
/// `price` is what new cart lines and order snapshots are priced from;
/// existing order items keep the price they were bought at.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub stock: i32,
    pub category_id: Option<CategoryId>,
    /// Relative path under the media root, if an image was uploaded.
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}
