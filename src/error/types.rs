/**
 * API Error Types
 *
 * This module defines the error type returned by HTTP handlers.
 * Every domain outcome that is not a success maps onto exactly one
 * variant, and every variant maps onto exactly one HTTP status code.
 *
 * # Status Code Mapping
 *
 * - `Validation` - 422 Unprocessable Entity
 * - `BadRequest` - 400 Bad Request
 * - `Conflict` - 400 Bad Request (duplicate unique field)
 * - `Unauthenticated` - 401 Unauthorized
 * - `NotFound` - 404 Not Found
 * - `Internal` - 500 Internal Server Error
 */

use axum::http::StatusCode;
use thiserror::Error;

/// Errors returned by API handlers
///
/// A resource that exists but belongs to another user is reported as
/// `NotFound`, indistinguishable from an id that never existed.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Input failed schema or policy validation
    ///
    /// Carries the offending field and one message per violated rule.
    #[error("validation failed on {field}")]
    Validation {
        /// Name of the request field that failed validation
        field: &'static str,
        /// One human-readable message per violated rule
        messages: Vec<String>,
    },

    /// Request content is unusable (e.g. avatar bytes are not an image)
    #[error("{0}")]
    BadRequest(String),

    /// A unique field (username, email) is already taken
    #[error("{0}")]
    Conflict(String),

    /// Missing, malformed, or expired credentials
    #[error("authentication required")]
    Unauthenticated,

    /// Resource absent, or owned by someone else
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Unexpected storage or backend failure
    ///
    /// The context string is logged server-side; clients only ever see
    /// an opaque generic message.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Build a `Validation` error for a single field
    pub fn validation(field: &'static str, messages: Vec<String>) -> Self {
        Self::Validation { field, messages }
    }

    /// Build an `Internal` error from any displayable context
    pub fn internal(context: impl std::fmt::Display) -> Self {
        Self::Internal(context.to_string())
    }

    /// Stable machine-readable kind for the response body
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::Conflict(_) => "CONFLICT",
            Self::Unauthenticated => "UNAUTHORIZED",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::BadRequest(_) | Self::Conflict(_) => StatusCode::BAD_REQUEST,
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_mapping() {
        let validation = ApiError::validation("password", vec!["too short".into()]);
        assert_eq!(validation.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

        let conflict = ApiError::Conflict("username already registered".into());
        assert_eq!(conflict.status_code(), StatusCode::BAD_REQUEST);

        assert_eq!(
            ApiError::Unauthenticated.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ApiError::NotFound("link").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::internal("boom").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_not_found_names_resource() {
        let error = ApiError::NotFound("link");
        assert_eq!(error.to_string(), "link not found");
    }

    #[test]
    fn test_kind_strings() {
        assert_eq!(ApiError::Unauthenticated.kind(), "UNAUTHORIZED");
        assert_eq!(ApiError::NotFound("user").kind(), "NOT_FOUND");
        assert_eq!(ApiError::internal("x").kind(), "INTERNAL_ERROR");
    }
}
