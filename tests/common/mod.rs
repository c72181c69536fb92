//! Test fixtures
//!
//! Builds a full application (real router, real state) in two flavors:
//!
//! - `offline_app` - a lazy connection pool that never dials out; good
//!   for everything that fails before touching the database (validation,
//!   token rejection, rate limiting)
//! - `database_app` - a real pool from `TEST_DATABASE_URL`, migrated and
//!   truncated; returns `None` when the variable is unset so those tests
//!   skip instead of failing on machines without PostgreSQL

// Not every test binary uses every fixture.
#![allow(dead_code)]

use axum_test::TestServer;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::sync::Arc;
use tempfile::TempDir;

use linkbio::auth::sessions::TokenService;
use linkbio::middleware::rate_limit::RateLimiter;
use linkbio::routes::router::create_router;
use linkbio::server::state::AppState;
use linkbio::storage::LocalAvatarStore;

pub const TEST_SECRET: &str = "test-secret";

/// A running test application
pub struct TestApp {
    pub server: TestServer,
    pub tokens: TokenService,
    // Keeps the avatar directory alive for the test's duration.
    _media: TempDir,
}

fn build_app(pool: PgPool, register_limit: u32, login_limit: u32) -> TestApp {
    let media = tempfile::tempdir().expect("failed to create media tempdir");
    let avatars = LocalAvatarStore::new(media.path().join("avatars"), "/media/avatars")
        .expect("failed to create avatar store");
    let tokens = TokenService::new(TEST_SECRET, 30);

    let state = AppState {
        pool,
        tokens: tokens.clone(),
        avatars: Arc::new(avatars),
        register_limiter: RateLimiter::per_minute(register_limit),
        login_limiter: RateLimiter::per_minute(login_limit),
    };

    let server = TestServer::new(create_router(state)).expect("failed to start test server");
    TestApp {
        server,
        tokens,
        _media: media,
    }
}

/// Application over a pool that never connects
///
/// Only exercise routes that fail before reaching the database.
pub fn offline_app() -> TestApp {
    offline_app_with_limits(100, 100)
}

/// Offline application with explicit rate-limit budgets
pub fn offline_app_with_limits(register_limit: u32, login_limit: u32) -> TestApp {
    let pool = PgPoolOptions::new()
        // Keep the inevitable connection failures snappy.
        .acquire_timeout(std::time::Duration::from_secs(2))
        .connect_lazy("postgres://nobody@localhost:1/linkbio_offline")
        .expect("lazy pool construction should not fail");
    build_app(pool, register_limit, login_limit)
}

/// Application over a real database, or `None` to skip
///
/// Runs migrations and truncates both tables, so call sites should be
/// serialized (`#[serial]`).
pub async fn database_app() -> Option<TestApp> {
    let url = std::env::var("TEST_DATABASE_URL").ok()?;

    let pool = PgPool::connect(&url)
        .await
        .expect("TEST_DATABASE_URL is set but unreachable");
    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("failed to run migrations on test database");
    sqlx::query("TRUNCATE TABLE links, users CASCADE")
        .execute(&pool)
        .await
        .expect("failed to truncate test tables");

    Some(build_app(pool, 1000, 1000))
}

/// Minimal bytes that sniff as a PNG
pub fn png_bytes() -> Vec<u8> {
    let mut bytes = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
    bytes.extend_from_slice(&[0x00, 0x00, 0x00, 0x0D, b'I', b'H', b'D', b'R']);
    bytes
}
