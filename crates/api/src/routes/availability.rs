use axum::routing::get;
use axum::Router;

use crate::handlers::availability;
use crate::state::AppState;

/// Availability and calendar routes, merged at the `/api/v1` root.
///
/// ```text
/// GET /availability               -> get_availability
/// GET /availability/check         -> check_date
/// GET /calendar/{year}/{month}    -> get_calendar
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/availability", get(availability::get_availability))
        .route("/availability/check", get(availability::check_date))
        .route("/calendar/{year}/{month}", get(availability::get_calendar))
}
