use axum::routing::post;
use axum::Router;

use crate::handlers::inquiry;
use crate::state::AppState;

/// Inquiry routes mounted at `/inquiry`.
///
/// ```text
/// POST /  -> submit_inquiry
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(inquiry::submit_inquiry))
}
