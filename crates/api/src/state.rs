use std::sync::Arc;

use lana_core::clock::Clock;
use lana_core::content::SiteContent;
use lana_core::rate_limit::RateLimiter;
use lana_core::sections::SectionStore;
use lana_delivery::InquiryMailer;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    /// Static content loaded at startup; read-only.
    pub content: Arc<SiteContent>,
    /// Per-address inquiry throttle.
    pub rate_limiter: RateLimiter,
    /// Outbound inquiry email.
    pub mailer: Arc<dyn InquiryMailer>,
    /// Editable text sections.
    pub sections: Arc<dyn SectionStore>,
    /// Source of "now" and "today".
    pub clock: Arc<dyn Clock>,
}
