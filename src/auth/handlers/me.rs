/**
 * Current User Handlers
 *
 * GET /me returns the authenticated caller's profile, links included.
 *
 * PATCH /me updates the profile from a multipart form with two optional
 * parts:
 *
 * - `bio` - text; present means "set to this value" (an empty string
 *   clears the bio), absent means "leave untouched"
 * - `avatar` - file bytes; sniffed for a real PNG/JPEG signature, stored
 *   through the configured avatar backend, and the resulting URL saved
 *
 * # Upload Validation
 *
 * The uploaded file name and declared content type are ignored. Only the
 * leading bytes decide whether the upload is accepted; a renamed `.png`
 * containing anything else is rejected with 400.
 */

use axum::{
    extract::{Multipart, State},
    response::Json,
};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::handlers::types::UserResponse;
use crate::auth::users::update_profile;
use crate::error::ApiError;
use crate::links::db::list_all_links_by_user;
use crate::links::types::LinkResponse;
use crate::middleware::auth::CurrentUser;
use crate::storage::{image::sniff_image, AvatarStore};

/// Get current user handler
///
/// Returns the caller's profile with the full current link set.
pub async fn get_me(
    State(pool): State<PgPool>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<UserResponse>, ApiError> {
    let links = list_all_links_by_user(&pool, user.id).await?;
    let links = links.into_iter().map(LinkResponse::from).collect();
    Ok(Json(UserResponse::from_user(user, links)))
}

/// Update current user handler (multipart)
///
/// # Errors
///
/// * `400 Bad Request` - avatar bytes are not PNG/JPEG, or the multipart
///   body is malformed
/// * `500 Internal Server Error` - avatar storage or database failure
pub async fn update_me(
    State(pool): State<PgPool>,
    State(avatars): State<Arc<dyn AvatarStore>>,
    CurrentUser(user): CurrentUser,
    mut multipart: Multipart,
) -> Result<Json<UserResponse>, ApiError> {
    let mut bio: Option<String> = None;
    let mut avatar_bytes: Option<Vec<u8>> = None;

    while let Some(field) = multipart.next_field().await? {
        match field.name() {
            Some("bio") => bio = Some(field.text().await?),
            Some("avatar") => {
                let bytes = field.bytes().await?;
                // Browsers send an empty part for an unset file input;
                // that means "no new avatar", not "replace with nothing".
                if !bytes.is_empty() {
                    avatar_bytes = Some(bytes.to_vec());
                }
            }
            _ => continue,
        }
    }

    let mut avatar_url: Option<String> = None;
    if let Some(bytes) = avatar_bytes {
        let kind = sniff_image(&bytes).ok_or_else(|| {
            tracing::warn!(user = %user.username, "avatar upload rejected by content sniffing");
            ApiError::BadRequest("invalid image format, only PNG and JPEG are accepted".to_string())
        })?;

        let name = format!(
            "{}_{}{}",
            user.username,
            Uuid::new_v4().simple(),
            kind.extension()
        );
        let url = avatars.store(&bytes, &name).await?;
        tracing::info!(user = %user.username, %url, "avatar stored");
        avatar_url = Some(url);
    }

    let updated = update_profile(&pool, user.id, bio.as_deref(), avatar_url.as_deref())
        .await?
        .ok_or(ApiError::NotFound("user"))?;

    let links = list_all_links_by_user(&pool, updated.id).await?;
    let links = links.into_iter().map(LinkResponse::from).collect();
    Ok(Json(UserResponse::from_user(updated, links)))
}
