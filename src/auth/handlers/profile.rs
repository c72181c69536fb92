/**
 * Public Profile Handler
 *
 * GET /users/{username} - unauthenticated view of a user's profile and
 * their full current link set. Fetches the user, then the links, as two
 * explicit queries.
 */

use axum::{
    extract::{Path, State},
    response::Json,
};
use sqlx::PgPool;

use crate::auth::handlers::types::ProfileResponse;
use crate::auth::users::get_user_by_username;
use crate::error::ApiError;
use crate::links::db::list_all_links_by_user;
use crate::links::types::LinkResponse;

/// Public profile handler
///
/// # Errors
/// * `404 Not Found` - no such username
pub async fn get_user_profile(
    State(pool): State<PgPool>,
    Path(username): Path<String>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let user = get_user_by_username(&pool, &username)
        .await?
        .ok_or(ApiError::NotFound("user"))?;

    let links = list_all_links_by_user(&pool, user.id).await?;
    let links = links.into_iter().map(LinkResponse::from).collect();

    Ok(Json(ProfileResponse::from_user(user, links)))
}
