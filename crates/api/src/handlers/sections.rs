//! Handlers for the editable text sections.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use lana_core::error::CoreError;
use lana_core::sections::validate_section_write;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::dashboard::DashboardAccess;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UpdateSection {
    pub text: String,
}

/// GET /api/v1/sections/{section}
pub async fn get_section(
    State(state): State<AppState>,
    Path(section): Path<String>,
) -> AppResult<impl IntoResponse> {
    let entry = state
        .sections
        .get(&section)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Section",
            key: section,
        }))?;

    Ok(Json(DataResponse { data: entry }))
}

/// PUT /api/v1/sections/{section}
///
/// Replace a section's text. Requires the dashboard token.
pub async fn update_section(
    _access: DashboardAccess,
    State(state): State<AppState>,
    Path(section): Path<String>,
    Json(input): Json<UpdateSection>,
) -> AppResult<impl IntoResponse> {
    validate_section_write(&section, &input.text)?;

    let entry = state
        .sections
        .put(&section, input.text, state.clock.now())
        .await?;

    tracing::info!(section = %entry.section, chars = entry.text.chars().count(), "Section updated");

    Ok(Json(DataResponse { data: entry }))
}
