use std::time::Duration;

use lana_core::rate_limit::{RateLimitConfig, DEFAULT_MAX_REQUESTS, DEFAULT_WINDOW_SECS};

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Path of the static site content JSON file.
    pub content_path: String,
    /// Shared bearer token for section edits. Writes are refused when unset.
    pub dashboard_token: Option<String>,
    /// Inquiry rate limit per client address.
    pub rate_limit: RateLimitConfig,
    /// How often expired rate-limit windows are swept.
    pub rate_limit_sweep_interval: Duration,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                 |
    /// |--------------------------|-------------------------|
    /// | `HOST`                   | `0.0.0.0`               |
    /// | `PORT`                   | `3000`                  |
    /// | `CORS_ORIGINS`           | `http://localhost:3000` |
    /// | `REQUEST_TIMEOUT_SECS`   | `30`                    |
    /// | `CONTENT_PATH`           | `content/site.json`     |
    /// | `DASHBOARD_TOKEN`        | unset                   |
    /// | `RATE_LIMIT_MAX`         | `5`                     |
    /// | `RATE_LIMIT_WINDOW_SECS` | `3600`                  |
    /// | `RATE_LIMIT_SWEEP_SECS`  | `600`                   |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let content_path =
            std::env::var("CONTENT_PATH").unwrap_or_else(|_| "content/site.json".into());

        let dashboard_token = std::env::var("DASHBOARD_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty());

        let max_requests: u32 = std::env::var("RATE_LIMIT_MAX")
            .unwrap_or_else(|_| DEFAULT_MAX_REQUESTS.to_string())
            .parse()
            .expect("RATE_LIMIT_MAX must be a valid u32");

        let window_secs: i64 = std::env::var("RATE_LIMIT_WINDOW_SECS")
            .unwrap_or_else(|_| DEFAULT_WINDOW_SECS.to_string())
            .parse()
            .expect("RATE_LIMIT_WINDOW_SECS must be a valid i64");

        let sweep_interval = positive_secs(
            &std::env::var("RATE_LIMIT_SWEEP_SECS").unwrap_or_else(|_| "600".into()),
        )
        .expect("RATE_LIMIT_SWEEP_SECS must be a positive u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            content_path,
            dashboard_token,
            rate_limit: RateLimitConfig {
                max_requests,
                window: chrono::Duration::seconds(window_secs),
            },
            rate_limit_sweep_interval: sweep_interval,
        }
    }
}

/// Parse a whole number of seconds, rejecting zero (a zero-period
/// `tokio::time::interval` panics).
fn positive_secs(raw: &str) -> Option<Duration> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
}
