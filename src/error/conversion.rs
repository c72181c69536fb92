/**
 * Error Conversion
 *
 * This module converts `ApiError` into HTTP responses and collaborator
 * errors (database, hashing, multipart parsing, avatar storage) into
 * `ApiError`, so handlers can use `?` throughout.
 *
 * # Response Format
 *
 * Error responses are JSON:
 *
 * ```json
 * {
 *   "error": "VALIDATION_ERROR",
 *   "detail": "validation failed on password",
 *   "errors": ["Password must be at least 8 characters long."]
 * }
 * ```
 *
 * The `errors` array is only present for validation failures. Internal
 * errors are logged with their full context and returned with an opaque
 * detail string.
 */

use axum::{
    extract::multipart::MultipartError,
    response::{IntoResponse, Response},
    Json,
};

use crate::error::types::ApiError;
use crate::storage::StorageError;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Internal details stay on the server; the client gets a stub.
        let detail = match &self {
            ApiError::Internal(context) => {
                tracing::error!(%context, "internal error while handling request");
                "internal server error".to_string()
            }
            other => other.to_string(),
        };

        let mut body = serde_json::json!({
            "error": self.kind(),
            "detail": detail,
        });
        if let ApiError::Validation { messages, .. } = &self {
            body["errors"] = serde_json::json!(messages);
        }

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for ApiError {
    /// Map database errors onto the taxonomy
    ///
    /// A unique-constraint violation means a duplicate username or email
    /// slipped past the handler's precheck (two concurrent registrations);
    /// it is still a `Conflict`, not an internal fault. Everything else is
    /// unexpected and surfaces as `Internal`.
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return ApiError::Conflict("value already taken".to_string());
            }
        }
        ApiError::internal(err)
    }
}

impl From<bcrypt::BcryptError> for ApiError {
    fn from(err: bcrypt::BcryptError) -> Self {
        ApiError::internal(err)
    }
}

impl From<jsonwebtoken::errors::Error> for ApiError {
    /// Only reached on the issuing path; verification failures are mapped
    /// to `Unauthenticated` at the identity resolver.
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        ApiError::internal(err)
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        ApiError::BadRequest(format!("invalid multipart body: {}", err))
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        ApiError::internal(err)
    }
}
