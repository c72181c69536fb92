//! Links Module
//!
//! Everything link-shaped: the `links` table queries with their ownership
//! scoping, the request/response types, and the HTTP handlers for the
//! owner-scoped CRUD surface plus the public per-username listing.
//!
//! # Ownership
//!
//! Every owner-scoped query filters on `user_id` in SQL, so a link that
//! belongs to someone else is simply absent from the caller's view. The
//! handlers turn that absence into 404 - there is no "forbidden" path.

/// Link model and database operations
pub mod db;

/// HTTP handlers for link endpoints
pub mod handlers;

/// Request/response types for link endpoints
pub mod types;

pub use db::Link;
