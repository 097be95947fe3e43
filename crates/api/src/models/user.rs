//! User and auth token domain types.

use chrono::{DateTime, Duration, Utc};

use orchard_core::{Email, Role, TokenId, UserId};

/// A registered account.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Unique login name.
    pub username: String,
    /// Unique email address.
    pub email: Email,
    /// Authorization attribute consumed by collaborators; not enforced here.
    pub role: Role,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

/// An opaque bearer token bound to one account.
///
/// Tokens expire at `created_at + duration_secs` and are deleted lazily on
/// first use after expiry, or explicitly on logout.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AuthToken {
    pub id: TokenId,
    pub user_id: UserId,
    pub token: String,
    pub created_at: DateTime<Utc>,
    pub duration_secs: i64,
}

impl AuthToken {
    /// The instant this token stops being accepted.
    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.created_at + Duration::seconds(self.duration_secs)
    }

    /// Whether the token has expired as of `now`.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at() < now
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use orchard_core::{TokenId, UserId};

    fn token_created_at(created_at: DateTime<Utc>, duration_secs: i64) -> AuthToken {
        AuthToken {
            id: TokenId::new(1),
            user_id: UserId::new(1),
            token: "opaque".to_owned(),
            created_at,
            duration_secs,
        }
    }

    #[test]
    fn test_fresh_token_is_not_expired() {
        let now = Utc::now();
        let token = token_created_at(now, 86_400);
        assert!(!token.is_expired(now));
    }

    #[test]
    fn test_token_valid_at_exact_expiry_instant() {
        let now = Utc::now();
        let token = token_created_at(now - Duration::seconds(100), 100);
        assert!(!token.is_expired(now));
        assert!(token.is_expired(now + Duration::seconds(1)));
    }

    #[test]
    fn test_old_token_is_expired() {
        let now = Utc::now();
        let token = token_created_at(now - Duration::days(2), 86_400);
        assert!(token.is_expired(now));
    }
}
