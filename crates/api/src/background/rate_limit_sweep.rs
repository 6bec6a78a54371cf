//! Periodic cleanup of expired rate-limit windows.
//!
//! Without it the in-process store would keep one entry for every address
//! that ever submitted an inquiry. Runs on a fixed interval using
//! `tokio::time::interval`.

use std::time::Duration;

use lana_core::rate_limit::RateLimiter;
use tokio_util::sync::CancellationToken;

/// Run the sweep loop until `cancel` is triggered.
pub async fn run(limiter: RateLimiter, every: Duration, cancel: CancellationToken) {
    tracing::info!(
        interval_secs = every.as_secs(),
        "Rate limit sweep job started"
    );

    let mut interval = tokio::time::interval(every);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Rate limit sweep job stopping");
                break;
            }
            _ = interval.tick() => {
                match limiter.sweep_expired().await {
                    Ok(removed) if removed > 0 => {
                        tracing::info!(removed, "Rate limit sweep: dropped expired windows");
                    }
                    Ok(_) => {
                        tracing::debug!("Rate limit sweep: nothing to drop");
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Rate limit sweep failed");
                    }
                }
            }
        }
    }
}
