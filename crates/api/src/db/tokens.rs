//! Auth token repository.

use sqlx::PgPool;

use orchard_core::UserId;

use super::RepositoryError;
use crate::models::user::AuthToken;

/// Repository for opaque bearer token rows.
pub struct TokenRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> TokenRepository<'a> {
    /// Create a new token repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Store a freshly issued token.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn insert(
        &self,
        user_id: UserId,
        token: &str,
        duration_secs: i64,
    ) -> Result<AuthToken, RepositoryError> {
        let row = sqlx::query_as::<_, AuthToken>(
            "INSERT INTO auth_token (user_id, token, duration_secs) \
             VALUES ($1, $2, $3) \
             RETURNING id, user_id, token, created_at, duration_secs",
        )
        .bind(user_id)
        .bind(token)
        .bind(duration_secs)
        .fetch_one(self.pool)
        .await?;
        Ok(row)
    }

    /// Look up a token row by its opaque string.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, token: &str) -> Result<Option<AuthToken>, RepositoryError> {
        let row = sqlx::query_as::<_, AuthToken>(
            "SELECT id, user_id, token, created_at, duration_secs \
             FROM auth_token WHERE token = $1",
        )
        .bind(token)
        .fetch_optional(self.pool)
        .await?;
        Ok(row)
    }

    /// Delete a token row.
    ///
    /// Returns `true` if a row was deleted. Deleting an already-deleted token
    /// is a no-op, which makes concurrent expiry sweeps of the same token safe.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, token: &str) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM auth_token WHERE token = $1")
            .bind(token)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
