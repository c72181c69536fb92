/**
 * User Model and Database Operations
 *
 * This module holds the user row type and every query that touches the
 * `users` table. Handlers never write SQL against users anywhere else.
 */

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

/// User struct representing a user in the database
///
/// The password hash never leaves the server: response types are built
/// from individual fields, and this struct skips the hash when serialized.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID)
    pub id: Uuid,
    /// Username (unique)
    pub username: String,
    /// User email address (unique)
    pub email: String,
    /// Hashed password (bcrypt)
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Free-form profile text, empty by default
    pub bio: String,
    /// URL of the stored avatar, empty until one is uploaded
    pub avatar_url: String,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
    /// Updated at timestamp
    pub updated_at: DateTime<Utc>,
}

/// Create a new user
///
/// # Arguments
/// * `pool` - Database connection pool
/// * `username` - User's chosen username
/// * `email` - User email
/// * `password_hash` - Hashed password
///
/// # Returns
/// Created user or error; a unique-constraint violation surfaces as a
/// database error for the caller to map to a conflict.
pub async fn create_user(
    pool: &PgPool,
    username: &str,
    email: &str,
    password_hash: &str,
) -> Result<User, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, username, email, password_hash, bio, avatar_url, created_at, updated_at)
        VALUES ($1, $2, $3, $4, '', '', $5, $6)
        RETURNING id, username, email, password_hash, bio, avatar_url, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

/// Get user by username
///
/// # Returns
/// User or None if not found
pub async fn get_user_by_username(
    pool: &PgPool,
    username: &str,
) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, email, password_hash, bio, avatar_url, created_at, updated_at
        FROM users
        WHERE username = $1
        "#,
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Get user by email
///
/// # Returns
/// User or None if not found
pub async fn get_user_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, email, password_hash, bio, avatar_url, created_at, updated_at
        FROM users
        WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Get user by ID
///
/// # Returns
/// User or None if not found
pub async fn get_user_by_id(pool: &PgPool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, email, password_hash, bio, avatar_url, created_at, updated_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Partially update a user's profile
///
/// Only the provided fields change: a `None` leaves the column exactly as
/// it was, while `Some("")` explicitly clears it. This is the partial
/// update contract for PATCH /me.
///
/// # Returns
/// The updated user, or None if the id does not exist
pub async fn update_profile(
    pool: &PgPool,
    user_id: Uuid,
    bio: Option<&str>,
    avatar_url: Option<&str>,
) -> Result<Option<User>, sqlx::Error> {
    let now = Utc::now();

    let user = sqlx::query_as::<_, User>(
        r#"
        UPDATE users
        SET bio = COALESCE($2, bio),
            avatar_url = COALESCE($3, avatar_url),
            updated_at = $4
        WHERE id = $1
        RETURNING id, username, email, password_hash, bio, avatar_url, created_at, updated_at
        "#,
    )
    .bind(user_id)
    .bind(bio)
    .bind(avatar_url)
    .bind(now)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}
