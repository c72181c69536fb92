//! Authentication and Profile Handlers
//!
//! One submodule per endpoint, plus the shared request/response types.

/// Request/response types shared by the handlers
pub mod types;

/// POST /register
pub mod register;

/// POST /login
pub mod login;

/// GET /me and PATCH /me
pub mod me;

/// GET /users/{username} (public profile)
pub mod profile;

pub use login::login;
pub use me::{get_me, update_me};
pub use profile::get_user_profile;
pub use register::register;
