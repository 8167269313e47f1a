//! Rate limiting middleware.
//!
//! Blunt in-memory request-count ceiling per IP address over a fixed window,
//! applied uniformly to all routes.

use crate::config::RateLimitConfig;
use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::warn;

/// Rate limiter state tracking request counts per IP.
#[derive(Clone)]
pub struct RateLimitLayer {
    config: RateLimitConfig,
    state: Arc<Mutex<HashMap<IpAddr, WindowEntry>>>,
}

struct WindowEntry {
    count: u32,
    window_start: Instant,
}

impl RateLimitLayer {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            state: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Count this request against the client's window; `Err` carries the time
    /// until the window resets.
    fn check(&self, ip: IpAddr) -> Result<(), Duration> {
        let mut state = self.state.lock();
        let now = Instant::now();

        let entry = state.entry(ip).or_insert(WindowEntry {
            count: 0,
            window_start: now,
        });

        // Reset window if expired
        if now.duration_since(entry.window_start) >= self.config.window {
            entry.count = 0;
            entry.window_start = now;
        }

        entry.count += 1;

        if entry.count > self.config.max_requests {
            let reset_at = entry.window_start + self.config.window;
            Err(reset_at.duration_since(now))
        } else {
            Ok(())
        }
    }

    /// Periodic cleanup of stale entries (call from a background task).
    pub fn cleanup(&self) {
        let mut state = self.state.lock();
        let now = Instant::now();
        let window = self.config.window;

        state.retain(|_, entry| now.duration_since(entry.window_start) < window * 2);
    }
}

/// Rate limiting middleware function.
pub async fn rate_limit_middleware(
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    axum::extract::State(limiter): axum::extract::State<RateLimitLayer>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let ip = addr.ip();

    match limiter.check(ip) {
        Ok(()) => next.run(request).await,
        Err(retry_after) => {
            warn!(
                ip = %ip,
                retry_after_secs = retry_after.as_secs(),
                "Rate limit exceeded"
            );

            let body = serde_json::json!({
                "error": "Too many requests",
            });

            (
                StatusCode::TOO_MANY_REQUESTS,
                [("Retry-After", retry_after.as_secs().to_string())],
                axum::Json(body),
            )
                .into_response()
        }
    }
}
