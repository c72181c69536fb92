//! linkbio - Link-in-Bio Backend
//!
//! A link-in-bio backend: user registration and login, profile management
//! with avatar upload, and CRUD over each user's list of links, exposed as
//! an HTTP/JSON API.
//!
//! # Overview
//!
//! The interesting part of this service is the authentication and
//! authorization layer - password hashing, signed expiring tokens,
//! per-request identity resolution - combined with the ownership rule for
//! links: a link that belongs to someone else is indistinguishable from a
//! link that does not exist. Everything else (connection pool, migrations,
//! static media serving, the image-service client, CORS, rate limiting) is
//! collaborator plumbing around that core.
//!
//! # Module Structure
//!
//! - **`server`** - configuration, shared state, application assembly
//! - **`routes`** - the route table
//! - **`auth`** - passwords, tokens, user records, auth/profile handlers
//! - **`links`** - link records and the link CRUD handlers
//! - **`middleware`** - identity resolution and rate limiting
//! - **`storage`** - avatar storage backends and image sniffing
//! - **`error`** - the API error taxonomy
//!
//! # Request Flow
//!
//! ```text
//! request
//!   └─> router (routes/)
//!        ├─> rate limiter        (middleware/, /register and /login only)
//!        ├─> CurrentUser         (middleware/, bearer routes only)
//!        │     ├─> TokenService  (auth/sessions)
//!        │     └─> user lookup   (auth/users)
//!        └─> handler (auth/handlers, links/handlers)
//!              └─> gateway queries (auth/users, links/db)
//! ```
//!
//! # Concurrency
//!
//! Each request is an independent tokio task; the only shared state is
//! the connection pool, the (immutable) token key material, the avatar
//! store handle, and the rate-limiter counters. No request ever blocks
//! another beyond pool checkout.

/// Startup: configuration, state, application assembly
pub mod server;

/// Route configuration
pub mod routes;

/// Authentication, user accounts, profile handlers
pub mod auth;

/// Link records and handlers
pub mod links;

/// Identity resolution and rate limiting
pub mod middleware;

/// Avatar storage backends
pub mod storage;

/// API error taxonomy
pub mod error;

// Re-export commonly used types
pub use error::ApiError;
pub use server::{AppConfig, AppState};
