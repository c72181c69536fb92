//! Middleware Module
//!
//! Request-processing pieces that run before handlers:
//!
//! - **`auth`** - the `CurrentUser` extractor, which resolves the bearer
//!   token in the Authorization header to a full user record
//! - **`rate_limit`** - per-client-address fixed-window limiting for the
//!   registration and login routes

/// Bearer-token identity resolution
pub mod auth;

/// Per-address request rate limiting
pub mod rate_limit;

pub use auth::CurrentUser;
pub use rate_limit::RateLimiter;
