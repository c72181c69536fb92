//! Authentication Module
//!
//! User accounts and the credential machinery around them: password
//! hashing and policy, signed session tokens, the user table queries, and
//! the HTTP handlers for registration, login, and the profile endpoints.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── password.rs     - bcrypt hashing + password acceptance policy
//! ├── sessions.rs     - TokenService (JWT issue/verify)
//! ├── users.rs        - User model and database operations
//! └── handlers/       - HTTP handlers
//!     ├── mod.rs      - Handler exports
//!     ├── types.rs    - Request/response types
//!     ├── register.rs - POST /register
//!     ├── login.rs    - POST /login
//!     ├── me.rs       - GET /me, PATCH /me (bio + avatar upload)
//!     └── profile.rs  - GET /users/{username} (public)
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Register**: credentials validated → password hashed → user created
//!    → token issued
//! 2. **Login**: password verified against the stored hash → token issued
//! 3. **Authenticated request**: `CurrentUser` extractor verifies the
//!    bearer token and loads the caller's record
//!
//! # Security
//!
//! - Passwords are bcrypt-hashed before storage and never serialized
//! - Tokens are signed, expiring, and carry only the username as subject
//! - Invalid credentials and invalid tokens both collapse to 401 with no
//!   information about which part failed

/// bcrypt hashing and the password acceptance policy
pub mod password;

/// Signed session tokens
pub mod sessions;

/// User model and database operations
pub mod users;

/// HTTP handlers for auth and profile endpoints
pub mod handlers;

// Re-export commonly used types and handlers
pub use handlers::types::{LoginRequest, RegisterRequest, TokenResponse, UserResponse};
pub use handlers::{get_me, get_user_profile, login, register, update_me};
pub use sessions::{TokenError, TokenService};
