pub mod availability;
pub mod content;
pub mod health;
pub mod inquiry;
pub mod sections;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /inquiry                      submit inquiry (POST)
///
/// /availability                 booked intervals and dates (GET)
/// /availability/check           is one date booked (GET)
/// /calendar/{year}/{month}      month grid with selection (GET)
///
/// /content                      localized site content (GET)
///
/// /sections/{section}           get (public), update (dashboard token)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/inquiry", inquiry::router())
        .merge(availability::router())
        .nest("/content", content::router())
        .nest("/sections", sections::router())
}
