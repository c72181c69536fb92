/**
 * Request Rate Limiting
 *
 * Fixed-window request counting per client IP address, applied as a
 * route layer on the registration and login endpoints. This sits outside
 * the core domain logic: a blocked request never reaches a handler, and
 * the 429 response is produced here, not by the API error taxonomy.
 *
 * # Window Semantics
 *
 * The first request from an address opens a window; requests within the
 * window are counted and the limit-plus-first request is rejected until
 * the window expires, at which point the counter resets. This matches
 * "N requests per minute" closely enough for an abuse gate.
 */

use axum::{
    extract::{ConnectInfo, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Shared fixed-window counter keyed by client address
///
/// Cheap to clone; each rate-limited route group holds its own instance
/// so the registration and login budgets are independent.
#[derive(Clone)]
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    windows: Arc<Mutex<HashMap<IpAddr, (Instant, u32)>>>,
}

impl RateLimiter {
    /// Create a limiter allowing `max_requests` per `window`
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            windows: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Limiter allowing `max_per_minute` requests per minute
    pub fn per_minute(max_per_minute: u32) -> Self {
        Self::new(max_per_minute, Duration::from_secs(60))
    }

    /// Record a request from `addr` and decide whether it may proceed
    pub fn check(&self, addr: IpAddr) -> bool {
        let now = Instant::now();
        let mut windows = self.windows.lock().expect("rate limiter lock poisoned");

        let entry = windows.entry(addr).or_insert((now, 0));
        if now.duration_since(entry.0) >= self.window {
            // Window elapsed, start a fresh one.
            *entry = (now, 0);
        }
        entry.1 += 1;
        entry.1 <= self.max_requests
    }
}

/// Axum middleware enforcing a `RateLimiter`
///
/// The client address comes from `ConnectInfo`; when the server is built
/// without connect info (in-process tests), all requests share one
/// bucket, which is exactly what those tests want anyway.
pub async fn rate_limit(
    State(limiter): State<RateLimiter>,
    request: Request,
    next: Next,
) -> Response {
    let addr = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ci| ci.0.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST));

    if !limiter.check(addr) {
        tracing::warn!(%addr, "rate limit exceeded");
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(serde_json::json!({
                "error": "RATE_LIMITED",
                "detail": "too many requests, slow down",
            })),
        )
            .into_response();
    }

    next.run(request).await
}
