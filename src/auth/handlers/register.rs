/**
 * Registration Handler
 *
 * This module implements the user registration handler for POST /register.
 *
 * # Registration Process
 *
 * 1. Validate username format, email shape, and password policy
 * 2. Check that username and email are not already taken
 * 3. Hash the password with bcrypt
 * 4. Create the user
 * 5. Issue a token so the new account is signed in immediately
 *
 * # Validation
 *
 * - Username: 3-30 characters, starts with a letter, letters/digits/
 *   underscores only
 * - Email: must contain '@' (basic shape check)
 * - Password: the full acceptance policy in `auth::password`; violations
 *   come back as a 422 listing every failed rule
 *
 * # Security
 *
 * - The plaintext password is hashed before anything is stored
 * - Validation runs before any database access
 */

use axum::{extract::State, response::Json};
use sqlx::PgPool;

use crate::auth::handlers::types::{RegisterRequest, TokenResponse};
use crate::auth::password::{hash_password, validate_password};
use crate::auth::sessions::TokenService;
use crate::auth::users::{create_user, get_user_by_email, get_user_by_username};
use crate::error::ApiError;

/// Validate username format
///
/// Usernames must be 3-30 characters, start with a letter, and contain
/// only alphanumeric characters and underscores.
fn is_valid_username(username: &str) -> bool {
    if username.len() < 3 || username.len() > 30 {
        return false;
    }

    let mut chars = username.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Registration handler
///
/// # Errors
///
/// * `422 Unprocessable Entity` - username/email format or password policy
/// * `400 Bad Request` - username or email already taken
/// * `500 Internal Server Error` - hashing, database, or token failure
pub async fn register(
    State(pool): State<PgPool>,
    State(tokens): State<TokenService>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    tracing::info!(username = %request.username, "registration request");

    if !is_valid_username(&request.username) {
        return Err(ApiError::validation(
            "username",
            vec![
                "Username must be 3-30 characters, start with a letter, and contain only letters, numbers, and underscores.".to_string(),
            ],
        ));
    }

    if !request.email.contains('@') {
        return Err(ApiError::validation(
            "email",
            vec!["Email address is not valid.".to_string()],
        ));
    }

    // Policy before hashing, and both before any database access.
    if let Err(failures) = validate_password(&request.password) {
        return Err(ApiError::validation("password", failures));
    }

    if get_user_by_username(&pool, &request.username).await?.is_some() {
        tracing::warn!(username = %request.username, "username already registered");
        return Err(ApiError::Conflict("username already registered".to_string()));
    }

    if get_user_by_email(&pool, &request.email).await?.is_some() {
        tracing::warn!(email = %request.email, "email already registered");
        return Err(ApiError::Conflict("email already registered".to_string()));
    }

    let password_hash = hash_password(&request.password)?;
    let user = create_user(&pool, &request.username, &request.email, &password_hash).await?;

    let token = tokens.issue(&user.username)?;
    tracing::info!(username = %user.username, "user registered");

    Ok(Json(TokenResponse::bearer(token)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_format() {
        assert!(is_valid_username("alice"));
        assert!(is_valid_username("alice_42"));
        assert!(!is_valid_username("al"));
        assert!(!is_valid_username("4lice"));
        assert!(!is_valid_username("alice!"));
        assert!(!is_valid_username(&"a".repeat(31)));
    }
}
