//! Authentication route handlers.
//!
//! Registration, login, token introspection, and logout. Fields arrive as
//! options and are checked by hand so a missing field reads as the API's own
//! "Invalid data" envelope rather than a framework rejection.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use orchard_core::{Email, Role};

use crate::error::{AppError, Result};
use crate::routes::StatusMessage;
use crate::services::auth::AuthService;
use crate::state::AppState;

// =============================================================================
// Request / Response Types
// =============================================================================

/// Registration request body.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Login response body.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub status: &'static str,
    pub token: String,
}

/// Body of any endpoint that only needs the bearer token.
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub token: Option<String>,
}

/// Token introspection response body.
#[derive(Debug, Serialize)]
pub struct CheckTokenResponse {
    pub status: &'static str,
    pub data: TokenData,
}

/// The identity a token resolves to.
#[derive(Debug, Serialize)]
pub struct TokenData {
    pub email: Email,
    pub username: String,
    pub role: Role,
}

// =============================================================================
// Handlers
// =============================================================================

/// Create a new account.
///
/// POST /register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<StatusMessage>)> {
    let (Some(username), Some(email), Some(password)) = (req.username, req.email, req.password)
    else {
        return Err(AppError::Validation("Invalid data".to_owned()));
    };

    let auth = AuthService::new(state.pool(), state.config().token_ttl());
    let user = auth.register(&username, &email, &password).await?;

    tracing::info!(user_id = %user.id, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(StatusMessage::success("User registered successfully")),
    ))
}

/// Authenticate and issue a fresh bearer token.
///
/// POST /login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let (Some(username), Some(password)) = (req.username, req.password) else {
        return Err(AppError::Validation("Invalid data".to_owned()));
    };

    let auth = AuthService::new(state.pool(), state.config().token_ttl());
    let (_user, token) = auth.login(&username, &password).await?;

    Ok(Json(LoginResponse {
        status: "success",
        token,
    }))
}

/// Resolve a token to the account it belongs to.
///
/// POST /check-token
pub async fn check_token(
    State(state): State<AppState>,
    Json(req): Json<TokenRequest>,
) -> Result<Json<CheckTokenResponse>> {
    let Some(token) = req.token else {
        return Err(AppError::Validation("Invalid data".to_owned()));
    };

    let auth = AuthService::new(state.pool(), state.config().token_ttl());
    let user = auth.verify(&token).await?;

    Ok(Json(CheckTokenResponse {
        status: "success",
        data: TokenData {
            email: user.email,
            username: user.username,
            role: user.role,
        },
    }))
}

/// Revoke a token.
///
/// POST /logout
pub async fn logout(
    State(state): State<AppState>,
    Json(req): Json<TokenRequest>,
) -> Result<Json<StatusMessage>> {
    let Some(token) = req.token else {
        return Err(AppError::Validation("Invalid data".to_owned()));
    };

    let auth = AuthService::new(state.pool(), state.config().token_ttl());
    auth.revoke(&token).await?;

    Ok(Json(StatusMessage::success("Logged out")))
}
