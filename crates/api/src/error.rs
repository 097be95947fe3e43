//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server-side errors to
//! Sentry before responding to the client. All route handlers return
//! `Result<T, AppError>`; the response body is always the JSON envelope
//! `{"status": "error", "message": ...}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::auth::AuthError;
use crate::services::cart::CartError;
use crate::services::orders::OrderError;

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Cart operation failed.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Order operation failed.
    #[error("Order error: {0}")]
    Order(#[from] OrderError),

    /// Missing or malformed request input.
    #[error("Bad request: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON body of every error response.
#[derive(Debug, Serialize)]
struct ErrorBody {
    status: &'static str,
    message: String,
}

impl AppError {
    /// Whether this is a server-side fault worth reporting.
    fn is_server_error(&self) -> bool {
        matches!(
            self,
            Self::Database(_)
                | Self::Internal(_)
                | Self::Auth(AuthError::Repository(_) | AuthError::PasswordHash)
                | Self::Cart(CartError::Repository(_))
                | Self::Order(OrderError::Repository(_))
        )
    }

    /// The HTTP status and client-facing message for this error.
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            Self::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),

            Self::Auth(err) => match err {
                AuthError::UsernameTaken => {
                    (StatusCode::BAD_REQUEST, "Username already taken".to_owned())
                }
                AuthError::EmailTaken => {
                    (StatusCode::BAD_REQUEST, "Email already registered".to_owned())
                }
                AuthError::InvalidEmail(_) => {
                    (StatusCode::BAD_REQUEST, "Invalid email address".to_owned())
                }
                AuthError::WeakPassword(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
                AuthError::InvalidCredentials => (
                    StatusCode::UNAUTHORIZED,
                    "Invalid username or password".to_owned(),
                ),
                AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid token".to_owned()),
                AuthError::TokenExpired => (StatusCode::UNAUTHORIZED, "Token expired".to_owned()),
                AuthError::Repository(_) | AuthError::PasswordHash => internal(),
            },

            Self::Cart(err) => match err {
                CartError::ProductNotFound => {
                    (StatusCode::NOT_FOUND, "Product not found".to_owned())
                }
                CartError::InsufficientStock => {
                    (StatusCode::BAD_REQUEST, "Not enough stock".to_owned())
                }
                CartError::Repository(_) => internal(),
            },

            Self::Order(err) => match err {
                OrderError::EmptyCart => (StatusCode::BAD_REQUEST, "Cart is empty".to_owned()),
                OrderError::InvalidCoupon => {
                    (StatusCode::BAD_REQUEST, "Invalid coupon".to_owned())
                }
                OrderError::InsufficientStock { .. } => {
                    (StatusCode::BAD_REQUEST, "Not enough stock".to_owned())
                }
                OrderError::NotFound => (StatusCode::NOT_FOUND, "Order not found".to_owned()),
                OrderError::NotRemovable => {
                    (StatusCode::BAD_REQUEST, "Order cannot be removed".to_owned())
                }
                OrderError::Repository(_) => internal(),
            },

            Self::Database(_) | Self::Internal(_) => internal(),
        }
    }
}

/// Generic 500 pair; details stay in Sentry and the logs.
fn internal() -> (StatusCode, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error".to_owned(),
    )
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if self.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let (status, message) = self.status_and_message();

        let body = ErrorBody {
            status: "error",
            message,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_validation_and_not_found_status_codes() {
        assert_eq!(
            status_of(AppError::Validation("Invalid data".to_owned())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::NotFound("Product not found".to_owned())),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_auth_status_codes() {
        assert_eq!(
            status_of(AppError::Auth(AuthError::InvalidToken)),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(AppError::Auth(AuthError::TokenExpired)),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(AppError::Auth(AuthError::InvalidCredentials)),
            StatusCode::UNAUTHORIZED
        );
        // Duplicate registration is a 400 in this API, not a 409
        assert_eq!(
            status_of(AppError::Auth(AuthError::UsernameTaken)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::Auth(AuthError::EmailTaken)),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_cart_and_order_status_codes() {
        assert_eq!(
            status_of(AppError::Cart(CartError::ProductNotFound)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::Cart(CartError::InsufficientStock)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::Order(OrderError::EmptyCart)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::Order(OrderError::InvalidCoupon)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::Order(OrderError::NotFound)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::Order(OrderError::NotRemovable)),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_client_messages() {
        let (_, msg) = AppError::Auth(AuthError::InvalidCredentials).status_and_message();
        assert_eq!(msg, "Invalid username or password");

        let (_, msg) = AppError::Order(OrderError::EmptyCart).status_and_message();
        assert_eq!(msg, "Cart is empty");

        let (_, msg) = AppError::Cart(CartError::InsufficientStock).status_and_message();
        assert_eq!(msg, "Not enough stock");
    }

    #[test]
    fn test_internal_details_are_not_exposed() {
        let (status, msg) =
            AppError::Internal("connection pool exhausted".to_owned()).status_and_message();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(msg, "Internal server error");
    }

    #[test]
    fn test_error_envelope_shape() {
        let body = ErrorBody {
            status: "error",
            message: "Cart is empty".to_owned(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["message"], "Cart is empty");
    }
}
