/**
 * Server Initialization
 *
 * Assembles the running application from an `AppConfig`:
 *
 * 1. Connect the PostgreSQL pool and run migrations
 * 2. Build the token service and avatar store from configuration
 * 3. Create the rate limiters
 * 4. Build the router, mount /media for the local storage backend, and
 *    apply the CORS layer
 *
 * Unlike optional collaborators, the database is load-bearing here: a
 * connection or migration failure aborts startup instead of limping on.
 */

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::ServeDir;

use crate::middleware::rate_limit::RateLimiter;
use crate::routes::router::create_router;
use crate::server::config::{AppConfig, AvatarBackend};
use crate::server::state::AppState;
use crate::storage;

/// Startup failures
#[derive(Debug, Error)]
pub enum InitError {
    #[error("failed to connect to database: {0}")]
    Database(sqlx::Error),
    #[error("failed to run migrations: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
    #[error("failed to initialize avatar storage: {0}")]
    Storage(#[from] std::io::Error),
}

/// Create and configure the axum application
///
/// # Errors
///
/// Fails when the database is unreachable, migrations cannot run, or the
/// local media directory cannot be created.
pub async fn create_app(config: &AppConfig) -> Result<Router, InitError> {
    tracing::info!("connecting to database");
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .map_err(InitError::Database)?;

    tracing::info!("running database migrations");
    sqlx::migrate!().run(&pool).await?;

    let state = AppState {
        pool,
        tokens: crate::auth::sessions::TokenService::new(
            &config.jwt_secret,
            config.token_ttl_minutes,
        ),
        avatars: storage::from_config(&config.avatar_backend)?,
        register_limiter: RateLimiter::per_minute(config.register_rate_limit),
        login_limiter: RateLimiter::per_minute(config.login_rate_limit),
    };

    let mut app = create_router(state);

    // The local backend serves its own files; the remote backend's URLs
    // point elsewhere and need no mount.
    if let AvatarBackend::Local { media_root } = &config.avatar_backend {
        app = app.nest_service("/media", ServeDir::new(media_root));
        tracing::info!(root = %media_root.display(), "serving media directory at /media");
    }

    app = app.layer(cors_layer(&config.cors_origins));

    tracing::info!("application initialized");
    Ok(app)
}

/// Build the CORS layer from the configured origins
fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
}
