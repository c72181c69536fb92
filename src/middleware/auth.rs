/**
 * Identity Resolution
 *
 * This module turns an incoming request's Authorization header into a
 * full `User` record, or rejects the request with 401.
 *
 * # Resolution Steps
 *
 * 1. The header must be present and of the form `Bearer <token>`
 * 2. The token must verify (signature intact, not expired, subject set)
 * 3. The subject username must resolve to an existing user
 *
 * Every failure along that chain is reported identically as 401: an
 * expired token, a forged token, and a token for a since-removed account
 * are indistinguishable from outside, so the API leaks nothing about
 * which accounts exist. Only a database failure during the lookup is
 * different - that is a 500, not a 401.
 */

use axum::{extract::FromRequestParts, http::header::AUTHORIZATION, http::request::Parts};

use crate::auth::users::{get_user_by_username, User};
use crate::error::ApiError;
use crate::server::state::AppState;

/// Extractor for the authenticated caller
///
/// Use as a handler parameter; handlers taking `CurrentUser` can only be
/// reached with a valid bearer token.
///
/// # Example
///
/// ```rust,ignore
/// async fn get_me(CurrentUser(user): CurrentUser) -> Json<UserResponse> {
///     // `user` is the full database record of the caller
/// }
/// ```
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Get Authorization header
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| {
                tracing::warn!("missing authorization header");
                ApiError::Unauthenticated
            })?;

        // Extract token (format: "Bearer <token>")
        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            tracing::warn!("authorization header is not a bearer token");
            ApiError::Unauthenticated
        })?;

        // Verify token; expired and malformed collapse into the same 401
        let subject = state.tokens.verify(token).map_err(|e| {
            tracing::warn!(reason = %e, "rejected bearer token");
            ApiError::Unauthenticated
        })?;

        // Resolve subject to a user. An unknown subject gets the same 401
        // as a bad token; only a store failure is allowed to differ.
        let user = get_user_by_username(&state.pool, &subject)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "user lookup failed during authentication");
                ApiError::internal(e)
            })?
            .ok_or_else(|| {
                tracing::warn!(subject = %subject, "token subject does not resolve to a user");
                ApiError::Unauthenticated
            })?;

        Ok(CurrentUser(user))
    }
}
