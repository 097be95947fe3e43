//! Order repository and the in-transaction pieces of order assembly.
//!
//! `OrderRepository` covers pool-bound reads and removal. The free functions
//! take a connection and are composed into a single transaction by the order
//! service, so a failure at any step leaves no partial order behind.

use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};

use orchard_core::{CartId, CouponId, OrderId, ProductId, UserId};

use super::RepositoryError;
use crate::models::cart::CartLine;
use crate::models::order::{Order, OrderItem};

const ORDER_COLUMNS: &str = "id, user_id, total_price, status, created_at, coupon_id";

/// Repository for order rows.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get an order by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let row = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM customer_order WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;
        Ok(row)
    }

    /// A user's orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM customer_order \
             WHERE user_id = $1 ORDER BY created_at DESC, id DESC"
        ))
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;
        Ok(rows)
    }

    /// Line items of an order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn items(&self, order_id: OrderId) -> Result<Vec<OrderItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderItem>(
            "SELECT id, order_id, product_id, quantity, price \
             FROM order_item WHERE order_id = $1 ORDER BY id",
        )
        .bind(order_id)
        .fetch_all(self.pool)
        .await?;
        Ok(rows)
    }

    /// Delete an order; its line items cascade.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no such order exists.
    pub async fn delete(&self, id: OrderId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM customer_order WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

/// The cart's lines joined with their products, with the product rows locked
/// until the surrounding transaction ends. Everything downstream (subtotal,
/// stock reservation, snapshots) prices from this one read.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn lines_for_update(
    conn: &mut PgConnection,
    cart_id: CartId,
) -> Result<Vec<CartLine>, RepositoryError> {
    let rows = sqlx::query_as::<_, CartLine>(
        "SELECT ci.product_id, p.name, p.price AS unit_price, ci.quantity \
         FROM cart_item ci \
         JOIN product p ON p.id = ci.product_id \
         WHERE ci.cart_id = $1 \
         ORDER BY ci.id \
         FOR UPDATE OF p",
    )
    .bind(cart_id)
    .fetch_all(conn)
    .await?;
    Ok(rows)
}

/// Atomically reserve stock for one line: decrement if and only if enough
/// remains. Returns `false` when the product is short.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the update fails.
pub async fn reserve_stock(
    conn: &mut PgConnection,
    product_id: ProductId,
    quantity: i32,
) -> Result<bool, RepositoryError> {
    let result = sqlx::query("UPDATE product SET stock = stock - $2 WHERE id = $1 AND stock >= $2")
        .bind(product_id)
        .bind(quantity)
        .execute(conn)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Insert the order row with its final (post-discount) total.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the insert fails.
pub async fn insert(
    conn: &mut PgConnection,
    user_id: UserId,
    total_price: Decimal,
    coupon_id: Option<CouponId>,
) -> Result<Order, RepositoryError> {
    let row = sqlx::query_as::<_, Order>(&format!(
        "INSERT INTO customer_order (user_id, total_price, coupon_id) \
         VALUES ($1, $2, $3) \
         RETURNING {ORDER_COLUMNS}"
    ))
    .bind(user_id)
    .bind(total_price)
    .bind(coupon_id)
    .fetch_one(conn)
    .await?;
    Ok(row)
}

/// Insert one line-item snapshot.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the insert fails.
pub async fn insert_item(
    conn: &mut PgConnection,
    order_id: OrderId,
    product_id: ProductId,
    quantity: i32,
    price: Decimal,
) -> Result<(), RepositoryError> {
    sqlx::query(
        "INSERT INTO order_item (order_id, product_id, quantity, price) \
         VALUES ($1, $2, $3, $4)",
    )
    .bind(order_id)
    .bind(product_id)
    .bind(quantity)
    .bind(price)
    .execute(conn)
    .await?;
    Ok(())
}

/// Empty the cart after its lines have been snapshotted.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the delete fails.
pub async fn clear_cart(conn: &mut PgConnection, cart_id: CartId) -> Result<(), RepositoryError> {
    sqlx::query("DELETE FROM cart_item WHERE cart_id = $1")
        .bind(cart_id)
        .execute(conn)
        .await?;
    Ok(())
}
