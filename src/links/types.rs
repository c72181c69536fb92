/**
 * Link Handler Types
 *
 * Request and response types for the link endpoints, plus their
 * validation. Validation runs before any domain logic and reports
 * field-level errors.
 */

use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::links::db::Link;

/// Create link request
#[derive(Deserialize, Serialize, Debug)]
pub struct CreateLinkRequest {
    /// Display title for the link
    pub title: String,
    /// Target URL
    pub url: String,
}

impl CreateLinkRequest {
    /// Reject empty titles and urls before touching the database
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.title.trim().is_empty() {
            return Err(ApiError::validation(
                "title",
                vec!["Title must not be empty.".to_string()],
            ));
        }
        if self.url.trim().is_empty() {
            return Err(ApiError::validation(
                "url",
                vec!["URL must not be empty.".to_string()],
            ));
        }
        Ok(())
    }
}

/// Update link request
///
/// Absent fields leave the stored value untouched.
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct UpdateLinkRequest {
    pub title: Option<String>,
    pub url: Option<String>,
}

impl UpdateLinkRequest {
    /// Provided fields must still be non-empty
    pub fn validate(&self) -> Result<(), ApiError> {
        if matches!(self.title.as_deref(), Some(t) if t.trim().is_empty()) {
            return Err(ApiError::validation(
                "title",
                vec!["Title must not be empty.".to_string()],
            ));
        }
        if matches!(self.url.as_deref(), Some(u) if u.trim().is_empty()) {
            return Err(ApiError::validation(
                "url",
                vec!["URL must not be empty.".to_string()],
            ));
        }
        Ok(())
    }
}

/// Link response (public shape, no owner id)
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LinkResponse {
    pub id: i64,
    pub title: String,
    pub url: String,
}

impl From<Link> for LinkResponse {
    fn from(link: Link) -> Self {
        Self {
            id: link.id,
            title: link.title,
            url: link.url,
        }
    }
}

/// Deletion confirmation body
#[derive(Serialize, Deserialize, Debug)]
pub struct DetailResponse {
    pub detail: String,
}

/// Offset pagination query parameters
///
/// Unsigned types make "any non-negative value" a parse-level guarantee.
#[derive(Deserialize, Debug)]
pub struct Pagination {
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub offset: u32,
}

fn default_limit() -> u32 {
    10
}
