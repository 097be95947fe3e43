//! Coupon queries.
//!
//! These run inside the order-creation transaction, so they take a
//! connection rather than binding to the pool.

use sqlx::PgConnection;

use orchard_core::CouponId;

use super::RepositoryError;
use crate::models::coupon::Coupon;

/// Look up a coupon by its code.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn get_by_code(
    conn: &mut PgConnection,
    code: &str,
) -> Result<Option<Coupon>, RepositoryError> {
    let row = sqlx::query_as::<_, Coupon>(
        "SELECT id, code, discount_type, discount_value, valid_from, valid_to, \
                usage_limit, used_count \
         FROM coupon WHERE code = $1",
    )
    .bind(code)
    .fetch_optional(conn)
    .await?;
    Ok(row)
}

/// Count one redemption against the coupon's usage limit.
///
/// The increment is guarded in SQL, so `used_count` can never pass
/// `usage_limit` even under concurrent checkouts. Returns `false` when the
/// cap was already reached and nothing was counted.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the update fails.
pub async fn redeem(conn: &mut PgConnection, id: CouponId) -> Result<bool, RepositoryError> {
    let result = sqlx::query(
        "UPDATE coupon SET used_count = used_count + 1 \
         WHERE id = $1 AND (usage_limit IS NULL OR used_count < usage_limit)",
    )
    .bind(id)
    .execute(conn)
    .await?;
    Ok(result.rows_affected() > 0)
}
