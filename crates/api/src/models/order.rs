//! Order domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use orchard_core::{CouponId, OrderId, OrderItemId, OrderStatus, ProductId, UserId};

/// A priced order. Immutable after creation apart from its status.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    /// Final total, after any coupon discount.
    pub total_price: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    /// The coupon attached at creation, if any (possibly inert).
    pub coupon_id: Option<CouponId>,
}

/// A line-item snapshot. `price` is the product price at purchase time and
/// never changes, even if the catalog price does.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OrderItem {
    pub id: OrderItemId,
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub quantity: i32,
    pub price: Decimal,
}

impl OrderItem {
    /// Snapshot price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// An order together with its line items.
#[derive(Debug, Clone)]
pub struct OrderWithItems {
    pub order: Order,
    pub items: Vec<OrderItem>,
}
