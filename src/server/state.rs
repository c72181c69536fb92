/**
 * Application State
 *
 * The `AppState` struct is the single state container handed to the
 * router. It holds the connection pool, the token service, the avatar
 * store, and the two rate limiters; everything in it is cheap to clone
 * and safe to share across request tasks.
 *
 * # State Extraction
 *
 * The `FromRef` implementations let handlers extract just the piece they
 * need (`State<PgPool>`, `State<TokenService>`, ...) instead of the whole
 * `AppState`, which keeps handler signatures honest about what they use.
 */

use axum::extract::FromRef;
use sqlx::PgPool;
use std::sync::Arc;

use crate::auth::sessions::TokenService;
use crate::middleware::rate_limit::RateLimiter;
use crate::storage::AvatarStore;

/// Shared application state
///
/// # Thread Safety
///
/// - `PgPool` is internally reference-counted
/// - `TokenService` holds only immutable key material
/// - The avatar store sits behind an `Arc`
/// - Rate limiters share their window map behind `Arc<Mutex<...>>`
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub pool: PgPool,
    /// Issues and verifies identity tokens
    pub tokens: TokenService,
    /// Configured avatar storage backend
    pub avatars: Arc<dyn AvatarStore>,
    /// Window counter for POST /register
    pub register_limiter: RateLimiter,
    /// Window counter for POST /login
    pub login_limiter: RateLimiter,
}

impl FromRef<AppState> for PgPool {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.pool.clone()
    }
}

impl FromRef<AppState> for TokenService {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.tokens.clone()
    }
}

impl FromRef<AppState> for Arc<dyn AvatarStore> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.avatars.clone()
    }
}
