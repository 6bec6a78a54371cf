//! Fixed-window rate limiting keyed by client address.
//!
//! [`RateLimiter`] owns the policy (limit, window) and asks a
//! [`RateLimitStore`] to atomically check-and-count a hit. The in-process
//! [`InMemoryRateLimitStore`] is only correct for a single instance; a shared
//! store can be dropped in behind the same trait without touching callers.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::clock::{Clock, SystemClock};
use crate::error::CoreError;
use crate::types::Timestamp;

/// Default number of admitted requests per window.
pub const DEFAULT_MAX_REQUESTS: u32 = 5;

/// Default window length: one hour.
pub const DEFAULT_WINDOW_SECS: i64 = 60 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub max_requests: u32,
    pub window: chrono::Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: DEFAULT_MAX_REQUESTS,
            window: chrono::Duration::seconds(DEFAULT_WINDOW_SECS),
        }
    }
}

/// Counter state of one key's current window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowState {
    /// Admitted requests in this window.
    pub count: u32,
    /// First instant that belongs to the next window.
    pub reset_at: Timestamp,
}

impl WindowState {
    pub fn is_expired(&self, now: Timestamp) -> bool {
        now >= self.reset_at
    }
}

/// Store verdict for a single hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Admitted(WindowState),
    Rejected(WindowState),
}

/// Persistence for per-key window counters.
#[async_trait::async_trait]
pub trait RateLimitStore: Send + Sync {
    /// Count a hit for `key` if the window still has room.
    ///
    /// Opens a fresh window when none exists or the current one has expired.
    /// A rejected hit is not counted.
    async fn try_acquire(
        &self,
        key: &str,
        now: Timestamp,
        config: &RateLimitConfig,
    ) -> Result<Admission, CoreError>;

    /// Drop every window that has expired at `now`. Returns how many went.
    async fn sweep(&self, now: Timestamp) -> Result<usize, CoreError>;
}

/// Single-process store backed by a mutex-guarded map.
#[derive(Debug, Default)]
pub struct InMemoryRateLimitStore {
    windows: Mutex<HashMap<String, WindowState>>,
}

impl InMemoryRateLimitStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn is_empty(&self) -> bool {
        self.windows.lock().await.is_empty()
    }
}

#[async_trait::async_trait]
impl RateLimitStore for InMemoryRateLimitStore {
    async fn try_acquire(
        &self,
        key: &str,
        now: Timestamp,
        config: &RateLimitConfig,
    ) -> Result<Admission, CoreError> {
        let mut windows = self.windows.lock().await;

        match windows.get_mut(key) {
            Some(state) if !state.is_expired(now) => {
                if state.count >= config.max_requests {
                    return Ok(Admission::Rejected(*state));
                }
                state.count += 1;
                Ok(Admission::Admitted(*state))
            }
            _ => {
                let state = WindowState {
                    count: 1,
                    reset_at: now + config.window,
                };
                windows.insert(key.to_string(), state);
                Ok(Admission::Admitted(state))
            }
        }
    }

    async fn sweep(&self, now: Timestamp) -> Result<usize, CoreError> {
        let mut windows = self.windows.lock().await;
        let before = windows.len();
        windows.retain(|_, state| !state.is_expired(now));
        Ok(before - windows.len())
    }
}

/// Outcome of a rate-limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    Allowed { remaining: u32 },
    Limited { retry_after: chrono::Duration },
}

impl RateLimitDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateLimitDecision::Allowed { .. })
    }
}

/// Fixed-window limiter with an injected clock and store.
#[derive(Clone)]
pub struct RateLimiter {
    config: RateLimitConfig,
    clock: Arc<dyn Clock>,
    store: Arc<dyn RateLimitStore>,
}

impl RateLimiter {
    pub fn new(
        config: RateLimitConfig,
        clock: Arc<dyn Clock>,
        store: Arc<dyn RateLimitStore>,
    ) -> Self {
        Self {
            config,
            clock,
            store,
        }
    }

    /// Wall clock and an in-process store.
    pub fn in_memory(config: RateLimitConfig) -> Self {
        Self::new(
            config,
            Arc::new(SystemClock),
            Arc::new(InMemoryRateLimitStore::new()),
        )
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    /// Record a hit for `key` and decide whether it may proceed.
    pub async fn check(&self, key: &str) -> Result<RateLimitDecision, CoreError> {
        let now = self.clock.now();
        let decision = match self.store.try_acquire(key, now, &self.config).await? {
            Admission::Admitted(state) => RateLimitDecision::Allowed {
                remaining: self.config.max_requests.saturating_sub(state.count),
            },
            Admission::Rejected(state) => RateLimitDecision::Limited {
                retry_after: state.reset_at - now,
            },
        };
        Ok(decision)
    }

    /// Remove expired windows from the store.
    pub async fn sweep_expired(&self) -> Result<usize, CoreError> {
        self.store.sweep(self.clock.now()).await
    }
}
