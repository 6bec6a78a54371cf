use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use lana_core::locale::Locale;
use serde::Deserialize;

use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LocaleQuery {
    pub locale: Option<String>,
}

/// GET /api/v1/content?locale=hr|en
///
/// Site details, amenities, gallery and house rules in one locale.
pub async fn get_content(
    State(state): State<AppState>,
    Query(query): Query<LocaleQuery>,
) -> impl IntoResponse {
    let locale = Locale::from_tag(query.locale.as_deref());
    Json(DataResponse {
        data: state.content.localized(locale),
    })
}
