/**
 * Server Configuration
 *
 * All configuration is read from the environment exactly once at
 * startup, into an explicit `AppConfig` that gets passed into
 * `create_app`. Components receive what they need at construction; no
 * code elsewhere reads environment variables.
 *
 * # Environment Variables
 *
 * | Variable | Default | Meaning |
 * |---|---|---|
 * | `PORT` | `8000` | Listen port |
 * | `DATABASE_URL` | required | PostgreSQL connection string |
 * | `SECRET_KEY` | required | Token signing secret |
 * | `TOKEN_TTL_MINUTES` | `30` | Token lifetime |
 * | `AVATAR_BACKEND` | `local` | `local` or `remote` |
 * | `MEDIA_ROOT` | `media` | Local backend: media directory |
 * | `UPLOAD_URL` | required for `remote` | Image service endpoint |
 * | `UPLOAD_API_KEY` | required for `remote` | Image service credential |
 * | `CORS_ORIGINS` | `http://localhost:3000` | Comma-separated origins |
 * | `REGISTER_RATE_LIMIT` | `5` | Registrations per minute per address |
 * | `LOGIN_RATE_LIMIT` | `10` | Logins per minute per address |
 *
 * The signing secret has no default on purpose: a server that signs
 * identity tokens with a known fallback value is not authenticating
 * anyone.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Configuration loading failures
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value for environment variable {0}")]
    Invalid(&'static str),
}

/// Which avatar storage backend to use
#[derive(Debug, Clone)]
pub enum AvatarBackend {
    /// Store files under `media_root` and serve them at /media
    Local { media_root: PathBuf },
    /// Upload to a remote image service
    Remote { upload_url: String, api_key: String },
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Listen port
    pub port: u16,
    /// PostgreSQL connection string
    pub database_url: String,
    /// Token signing secret
    pub jwt_secret: String,
    /// Token lifetime in minutes
    pub token_ttl_minutes: u64,
    /// Avatar storage backend selection
    pub avatar_backend: AvatarBackend,
    /// Allowed CORS origins
    pub cors_origins: Vec<String>,
    /// Registrations allowed per minute per client address
    pub register_rate_limit: u32,
    /// Logins allowed per minute per client address
    pub login_rate_limit: u32,
}

fn optional(name: &'static str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    optional(name).ok_or(ConfigError::Missing(name))
}

fn parsed<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match optional(name) {
        Some(value) => value.parse().map_err(|_| ConfigError::Invalid(name)),
        None => Ok(default),
    }
}

impl AppConfig {
    /// Load configuration from the environment
    pub fn from_env() -> Result<Self, ConfigError> {
        let avatar_backend = match optional("AVATAR_BACKEND").as_deref() {
            None | Some("local") => AvatarBackend::Local {
                media_root: PathBuf::from(
                    optional("MEDIA_ROOT").unwrap_or_else(|| "media".to_string()),
                ),
            },
            Some("remote") => AvatarBackend::Remote {
                upload_url: required("UPLOAD_URL")?,
                api_key: required("UPLOAD_API_KEY")?,
            },
            Some(_) => return Err(ConfigError::Invalid("AVATAR_BACKEND")),
        };

        let cors_origins = optional("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:3000".to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Ok(Self {
            port: parsed("PORT", 8000)?,
            database_url: required("DATABASE_URL")?,
            jwt_secret: required("SECRET_KEY")?,
            token_ttl_minutes: parsed("TOKEN_TTL_MINUTES", 30)?,
            avatar_backend,
            cors_origins,
            register_rate_limit: parsed("REGISTER_RATE_LIMIT", 5)?,
            login_rate_limit: parsed("LOGIN_RATE_LIMIT", 10)?,
        })
    }
}
