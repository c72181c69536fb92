//! API Error Module
//!
//! This module defines the error taxonomy shared by every HTTP handler.
//!
//! # Architecture
//!
//! The error module is organized into focused submodules:
//!
//! - **`types`** - Error type definitions and status-code mapping
//! - **`conversion`** - Conversions into HTTP responses and from
//!   collaborator errors (sqlx, bcrypt, multipart, storage)
//!
//! # Error Taxonomy
//!
//! - `Validation` - malformed or policy-violating input (422)
//! - `BadRequest` - unusable request content, e.g. a non-image avatar (400)
//! - `Conflict` - duplicate value for a unique field (400)
//! - `Unauthenticated` - missing/invalid/expired token or bad credentials (401)
//! - `NotFound` - resource absent or not owned by the caller (404)
//! - `Internal` - unexpected storage/backend failure (500)
//!
//! Ownership violations are reported as `NotFound`, never as a distinct
//! "forbidden" signal. `Internal` errors are logged with context server-side
//! and returned to the client as an opaque generic message.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::ApiError;
