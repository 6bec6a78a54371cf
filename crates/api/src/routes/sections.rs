use axum::routing::get;
use axum::Router;

use crate::handlers::sections;
use crate::state::AppState;

/// Editable section routes mounted at `/sections`.
///
/// ```text
/// GET /{section}  -> get_section
/// PUT /{section}  -> update_section
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/{section}",
        get(sections::get_section).put(sections::update_section),
    )
}
