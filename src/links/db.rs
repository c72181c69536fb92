/**
 * Link Model and Database Operations
 *
 * This module holds the link row type and every query that touches the
 * `links` table.
 *
 * # Ownership Scoping
 *
 * All single-link operations take the caller's user id and filter on it
 * in the WHERE clause. A link owned by a different user therefore comes
 * back as `None`, indistinguishable from an id that never existed. Only
 * the listing queries take a bare user id, and they are scoped to that
 * user's links by construction.
 */

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

/// Link struct representing a row in the `links` table
///
/// Ids are BIGSERIAL, so ascending id order is insertion order; the
/// paginated listings rely on that.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Link {
    /// Unique link ID
    pub id: i64,
    /// Display title
    pub title: String,
    /// Target URL
    pub url: String,
    /// Owning user (foreign key, mandatory)
    pub user_id: Uuid,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
}

/// Create a new link owned by `user_id`
pub async fn create_link(
    pool: &PgPool,
    user_id: Uuid,
    title: &str,
    url: &str,
) -> Result<Link, sqlx::Error> {
    let link = sqlx::query_as::<_, Link>(
        r#"
        INSERT INTO links (title, url, user_id, created_at)
        VALUES ($1, $2, $3, $4)
        RETURNING id, title, url, user_id, created_at
        "#,
    )
    .bind(title)
    .bind(url)
    .bind(user_id)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(link)
}

/// List a user's links in insertion order with offset pagination
///
/// # Arguments
/// * `limit` / `offset` - any non-negative values; defaults are applied
///   at the API layer, and no upper bound is enforced here
pub async fn list_links_by_user(
    pool: &PgPool,
    user_id: Uuid,
    limit: i64,
    offset: i64,
) -> Result<Vec<Link>, sqlx::Error> {
    let links = sqlx::query_as::<_, Link>(
        r#"
        SELECT id, title, url, user_id, created_at
        FROM links
        WHERE user_id = $1
        ORDER BY id ASC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(links)
}

/// List all of a user's links in insertion order
///
/// Used by the owner listing and the profile responses, which return the
/// full current link set.
pub async fn list_all_links_by_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Link>, sqlx::Error> {
    let links = sqlx::query_as::<_, Link>(
        r#"
        SELECT id, title, url, user_id, created_at
        FROM links
        WHERE user_id = $1
        ORDER BY id ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(links)
}

/// Fetch a single link owned by `user_id`
///
/// # Returns
/// The link, or None when the id does not exist or belongs to another user
pub async fn get_link(
    pool: &PgPool,
    link_id: i64,
    user_id: Uuid,
) -> Result<Option<Link>, sqlx::Error> {
    let link = sqlx::query_as::<_, Link>(
        r#"
        SELECT id, title, url, user_id, created_at
        FROM links
        WHERE id = $1 AND user_id = $2
        "#,
    )
    .bind(link_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(link)
}

/// Partially update a link owned by `user_id`
///
/// `None` fields keep their current value; provided fields are replaced.
///
/// # Returns
/// The updated link, or None under the same ownership rule as `get_link`
pub async fn update_link(
    pool: &PgPool,
    link_id: i64,
    user_id: Uuid,
    title: Option<&str>,
    url: Option<&str>,
) -> Result<Option<Link>, sqlx::Error> {
    let link = sqlx::query_as::<_, Link>(
        r#"
        UPDATE links
        SET title = COALESCE($3, title),
            url = COALESCE($4, url)
        WHERE id = $1 AND user_id = $2
        RETURNING id, title, url, user_id, created_at
        "#,
    )
    .bind(link_id)
    .bind(user_id)
    .bind(title)
    .bind(url)
    .fetch_optional(pool)
    .await?;

    Ok(link)
}

/// Delete a link owned by `user_id`
///
/// # Returns
/// The deleted row for confirmation, or None under the ownership rule
pub async fn delete_link(
    pool: &PgPool,
    link_id: i64,
    user_id: Uuid,
) -> Result<Option<Link>, sqlx::Error> {
    let link = sqlx::query_as::<_, Link>(
        r#"
        DELETE FROM links
        WHERE id = $1 AND user_id = $2
        RETURNING id, title, url, user_id, created_at
        "#,
    )
    .bind(link_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(link)
}
