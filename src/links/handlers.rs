/**
 * Link Handlers
 *
 * HTTP handlers for the link endpoints:
 *
 * - `GET /links` - list the caller's links
 * - `POST /links` - create a link owned by the caller
 * - `GET /links/{id}` - fetch one of the caller's links
 * - `PUT /links/{id}` - partially update one of the caller's links
 * - `DELETE /links/{id}` - delete one of the caller's links
 * - `GET /users/{username}/links` - public, paginated listing by username
 *
 * # Ownership
 *
 * The authenticated routes resolve the caller first and pass the caller's
 * user id into every query; a link that exists under a different owner is
 * reported as 404. The public listing is deliberately a separate,
 * unauthenticated read path.
 */

use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use sqlx::PgPool;

use crate::error::ApiError;
use crate::links::db;
use crate::links::types::{
    CreateLinkRequest, DetailResponse, LinkResponse, Pagination, UpdateLinkRequest,
};
use crate::middleware::auth::CurrentUser;

/// List the caller's links
///
/// Returns the full current set in insertion order.
pub async fn list_my_links(
    State(pool): State<PgPool>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<LinkResponse>>, ApiError> {
    let links = db::list_all_links_by_user(&pool, user.id).await?;
    Ok(Json(links.into_iter().map(LinkResponse::from).collect()))
}

/// Create a link owned by the caller
pub async fn add_link(
    State(pool): State<PgPool>,
    CurrentUser(user): CurrentUser,
    Json(request): Json<CreateLinkRequest>,
) -> Result<Json<LinkResponse>, ApiError> {
    request.validate()?;

    let link = db::create_link(&pool, user.id, &request.title, &request.url).await?;
    tracing::info!(user = %user.username, link_id = link.id, "link created");

    Ok(Json(link.into()))
}

/// Fetch a single link owned by the caller
///
/// # Errors
/// * `404 Not Found` - id absent, or owned by a different user
pub async fn get_single_link(
    State(pool): State<PgPool>,
    CurrentUser(user): CurrentUser,
    Path(link_id): Path<i64>,
) -> Result<Json<LinkResponse>, ApiError> {
    let link = db::get_link(&pool, link_id, user.id)
        .await?
        .ok_or(ApiError::NotFound("link"))?;
    Ok(Json(link.into()))
}

/// Partially update a link owned by the caller
///
/// Absent fields keep their stored values.
///
/// # Errors
/// * `404 Not Found` - id absent, or owned by a different user
pub async fn edit_link(
    State(pool): State<PgPool>,
    CurrentUser(user): CurrentUser,
    Path(link_id): Path<i64>,
    Json(request): Json<UpdateLinkRequest>,
) -> Result<Json<LinkResponse>, ApiError> {
    request.validate()?;

    let link = db::update_link(
        &pool,
        link_id,
        user.id,
        request.title.as_deref(),
        request.url.as_deref(),
    )
    .await?
    .ok_or(ApiError::NotFound("link"))?;

    Ok(Json(link.into()))
}

/// Delete a link owned by the caller
///
/// # Errors
/// * `404 Not Found` - id absent, or owned by a different user
pub async fn delete_user_link(
    State(pool): State<PgPool>,
    CurrentUser(user): CurrentUser,
    Path(link_id): Path<i64>,
) -> Result<Json<DetailResponse>, ApiError> {
    let deleted = db::delete_link(&pool, link_id, user.id)
        .await?
        .ok_or(ApiError::NotFound("link"))?;
    tracing::info!(user = %user.username, link_id = deleted.id, "link deleted");

    Ok(Json(DetailResponse {
        detail: "Deleted".to_string(),
    }))
}

/// Public, paginated listing of a user's links
///
/// Unauthenticated by design. An unknown username yields an empty list
/// rather than a 404, so this path reveals nothing about which usernames
/// exist.
pub async fn list_user_links(
    State(pool): State<PgPool>,
    Path(username): Path<String>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<Vec<LinkResponse>>, ApiError> {
    let Some(user) = crate::auth::users::get_user_by_username(&pool, &username).await? else {
        return Ok(Json(Vec::new()));
    };

    let links = db::list_links_by_user(
        &pool,
        user.id,
        i64::from(pagination.limit),
        i64::from(pagination.offset),
    )
    .await?;

    Ok(Json(links.into_iter().map(LinkResponse::from).collect()))
}
