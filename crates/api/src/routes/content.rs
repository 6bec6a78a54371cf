use axum::routing::get;
use axum::Router;

use crate::handlers::content;
use crate::state::AppState;

/// Site content routes mounted at `/content`.
///
/// ```text
/// GET /  -> get_content
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(content::get_content))
}
