/**
 * Login Handler
 *
 * This module implements the authentication handler for POST /login.
 *
 * # Authentication Process
 *
 * 1. Look up the user by username
 * 2. Verify the password against the stored bcrypt hash
 * 3. Issue a fresh token
 *
 * # Security
 *
 * - An unknown username and a wrong password return the same 401, so the
 *   endpoint cannot be used to enumerate accounts
 * - Password verification is constant-time (via bcrypt)
 * - Passwords are never logged or returned
 */

use axum::{extract::State, response::Json};
use sqlx::PgPool;

use crate::auth::handlers::types::{LoginRequest, TokenResponse};
use crate::auth::password::verify_password;
use crate::auth::sessions::TokenService;
use crate::auth::users::get_user_by_username;
use crate::error::ApiError;

/// Login handler
///
/// # Errors
///
/// * `401 Unauthorized` - unknown username or wrong password
/// * `500 Internal Server Error` - database or token failure
pub async fn login(
    State(pool): State<PgPool>,
    State(tokens): State<TokenService>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    tracing::info!(username = %request.username, "login request");

    let user = get_user_by_username(&pool, &request.username)
        .await?
        .ok_or_else(|| {
            tracing::warn!(username = %request.username, "login for unknown username");
            ApiError::Unauthenticated
        })?;

    let valid = verify_password(&request.password, &user.password_hash)?;
    if !valid {
        tracing::warn!(username = %request.username, "wrong password");
        return Err(ApiError::Unauthenticated);
    }

    let token = tokens.issue(&user.username)?;
    tracing::info!(username = %user.username, "user logged in");

    Ok(Json(TokenResponse::bearer(token)))
}
