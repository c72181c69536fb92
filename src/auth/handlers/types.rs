/**
 * Authentication Handler Types
 *
 * Request and response types for registration, login, and the profile
 * endpoints, shared across handlers.
 */

use serde::{Deserialize, Serialize};

use crate::auth::users::User;
use crate::links::types::LinkResponse;

/// Registration request
#[derive(Deserialize, Serialize, Debug)]
pub struct RegisterRequest {
    /// Desired username (unique)
    pub username: String,
    /// Email address (unique)
    pub email: String,
    /// Plaintext password; validated against the policy, then hashed
    pub password: String,
}

/// Login request
#[derive(Deserialize, Serialize, Debug)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Token response
///
/// Returned by both register and login. `token_type` is always
/// `"bearer"`; clients send the token back as `Authorization: Bearer`.
#[derive(Serialize, Deserialize, Debug)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}

/// Authenticated self view (GET /me, PATCH /me)
///
/// Carries the email, unlike the public profile. Never carries the
/// password hash.
#[derive(Serialize, Deserialize, Debug)]
pub struct UserResponse {
    pub username: String,
    pub email: String,
    pub bio: String,
    pub avatar_url: String,
    pub links: Vec<LinkResponse>,
}

impl UserResponse {
    pub fn from_user(user: User, links: Vec<LinkResponse>) -> Self {
        Self {
            username: user.username,
            email: user.email,
            bio: user.bio,
            avatar_url: user.avatar_url,
            links,
        }
    }
}

/// Public profile view (GET /users/{username})
///
/// No email on the public path.
#[derive(Serialize, Deserialize, Debug)]
pub struct ProfileResponse {
    pub username: String,
    pub bio: String,
    pub avatar_url: String,
    pub links: Vec<LinkResponse>,
}

impl ProfileResponse {
    pub fn from_user(user: User, links: Vec<LinkResponse>) -> Self {
        Self {
            username: user.username,
            bio: user.bio,
            avatar_url: user.avatar_url,
            links,
        }
    }
}
