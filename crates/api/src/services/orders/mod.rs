//! Order service.
//!
//! Converts a mutable cart into an immutable priced order. The whole
//! pipeline - cart read, coupon application, stock reservation, order and
//! line-item inserts, cart clearing - runs in one database transaction, so a
//! failure at any step leaves neither a partial order nor dangling cart state.

mod error;

pub use error::OrderError;

use chrono::Utc;
use sqlx::PgPool;

use orchard_core::{OrderId, UserId};

use crate::db::RepositoryError;
use crate::db::carts::CartRepository;
use crate::db::orders::{self as orders_db, OrderRepository};
use crate::db::coupons as coupons_db;
use crate::models::cart;
use crate::models::order::{Order, OrderWithItems};

/// Order service.
pub struct OrderService<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderService<'a> {
    /// Create a new order service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create an order from the user's cart, optionally applying a coupon.
    ///
    /// The coupon code must exist, but a coupon that is outside its validity
    /// window or has hit its usage cap is attached without discounting
    /// anything and without counting a redemption - the order still succeeds
    /// at full price.
    ///
    /// Line items snapshot the product prices read at the top of the
    /// transaction, so the pre-discount total always equals the sum of the
    /// snapshots.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::EmptyCart` if the cart has no lines.
    /// Returns `OrderError::InvalidCoupon` if the code matches no coupon.
    /// Returns `OrderError::InsufficientStock` if any line exceeds remaining
    /// stock. All failures roll the transaction back.
    pub async fn create(
        &self,
        user_id: UserId,
        coupon_code: Option<&str>,
    ) -> Result<Order, OrderError> {
        let cart_id = CartRepository::new(self.pool).find_or_create(user_id).await?;

        let mut tx = self.pool.begin().await.map_err(RepositoryError::from)?;

        let lines = orders_db::lines_for_update(&mut tx, cart_id).await?;
        if lines.is_empty() {
            return Err(OrderError::EmptyCart);
        }

        let subtotal = cart::subtotal(&lines);

        // Resolve the coupon before any write so an unknown code aborts with
        // nothing to roll back beyond the row locks.
        let coupon = match coupon_code {
            Some(code) => Some(
                coupons_db::get_by_code(&mut tx, code)
                    .await?
                    .ok_or(OrderError::InvalidCoupon)?,
            ),
            None => None,
        };

        let mut total_price = subtotal;
        if let Some(coupon) = &coupon {
            // Expired or exhausted coupons ride along inert: attached to the
            // order, no discount, no redemption counted.
            if coupon.is_valid(Utc::now()) && coupons_db::redeem(&mut tx, coupon.id).await? {
                total_price = coupon.discount(subtotal);
            }
        }

        for line in &lines {
            if !orders_db::reserve_stock(&mut tx, line.product_id, line.quantity).await? {
                return Err(OrderError::InsufficientStock {
                    product_id: line.product_id,
                });
            }
        }

        let order = orders_db::insert(
            &mut tx,
            user_id,
            total_price,
            coupon.as_ref().map(|c| c.id),
        )
        .await?;

        for line in &lines {
            orders_db::insert_item(&mut tx, order.id, line.product_id, line.quantity, line.unit_price)
                .await?;
        }

        orders_db::clear_cart(&mut tx, cart_id).await?;

        tx.commit().await.map_err(RepositoryError::from)?;

        tracing::info!(
            order_id = %order.id,
            user_id = %user_id,
            total = %order.total_price,
            "order created"
        );

        Ok(order)
    }

    /// Remove an order that has not started processing.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::NotFound` if no such order exists.
    /// Returns `OrderError::NotRemovable` unless the order is still pending.
    pub async fn remove(&self, order_id: OrderId) -> Result<(), OrderError> {
        let repo = OrderRepository::new(self.pool);

        let order = repo.get(order_id).await?.ok_or(OrderError::NotFound)?;

        if !order.status.is_removable() {
            return Err(OrderError::NotRemovable);
        }

        repo.delete(order_id).await?;

        Ok(())
    }

    /// The user's orders with their line items, newest first.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::Repository` if the database operation fails.
    pub async fn list(&self, user_id: UserId) -> Result<Vec<OrderWithItems>, OrderError> {
        let repo = OrderRepository::new(self.pool);

        let orders = repo.list_for_user(user_id).await?;
        let mut out = Vec::with_capacity(orders.len());
        for order in orders {
            let items = repo.items(order.id).await?;
            out.push(OrderWithItems { order, items });
        }

        Ok(out)
    }
}
