//! Startup Configuration
//! Mission: Load and validate process configuration before serving anything

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

/// Per-IP rate limit settings: a blunt request-count ceiling over a fixed
/// window, applied uniformly to all routes.
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub max_requests: u32,
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        // 100 requests per 15 minutes.
        Self {
            max_requests: 100,
            window: Duration::from_secs(15 * 60),
        }
    }
}

/// Explicit process configuration, passed into constructors at startup.
///
/// Missing required values fail here, before any request is served.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite database file path.
    pub database_path: String,
    /// Process-wide token signing secret.
    pub jwt_secret: String,
    /// TCP port to listen on.
    pub port: u16,
    pub rate_limit: RateLimitConfig,
}

impl Config {
    /// Read configuration from the environment. `DATABASE_PATH` and
    /// `JWT_SECRET` are required; everything else has a default.
    pub fn from_env() -> Result<Self> {
        let database_path =
            env::var("DATABASE_PATH").context("DATABASE_PATH is missing in environment variables")?;
        let jwt_secret =
            env::var("JWT_SECRET").context("JWT_SECRET is missing in environment variables")?;

        let port = env::var("PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(10000);

        let defaults = RateLimitConfig::default();
        let max_requests = env::var("RATE_LIMIT_MAX_REQUESTS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .filter(|&v| v > 0)
            .unwrap_or(defaults.max_requests);
        let window_secs = env::var("RATE_LIMIT_WINDOW_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|&v| v > 0)
            .unwrap_or(defaults.window.as_secs());

        Ok(Self {
            database_path,
            jwt_secret,
            port,
            rate_limit: RateLimitConfig {
                max_requests,
                window: Duration::from_secs(window_secs),
            },
        })
    }
}
