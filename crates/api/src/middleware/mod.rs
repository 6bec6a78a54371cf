//! Request extractors shared by handlers.
//!
//! - [`client_addr::ClientAddr`] -- Best-effort client address for rate limiting.
//! - [`dashboard::DashboardAccess`] -- Requires the shared dashboard bearer token.

pub mod client_addr;
pub mod dashboard;
