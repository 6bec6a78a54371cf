//! Shared-token guard for dashboard writes.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use lana_core::error::CoreError;

use crate::error::AppError;
use crate::state::AppState;

/// Proof that the request carried the configured dashboard token.
///
/// ```ignore
/// async fn update(_access: DashboardAccess, State(state): State<AppState>) -> AppResult<()> { ... }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DashboardAccess;

impl FromRequestParts<AppState> for DashboardAccess {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let expected = state.config.dashboard_token.as_deref().ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Dashboard editing is disabled".into()))
        })?;

        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        if !constant_time_eq(token.as_bytes(), expected.as_bytes()) {
            return Err(AppError::Core(CoreError::Unauthorized(
                "Invalid dashboard token".into(),
            )));
        }

        Ok(DashboardAccess)
    }
}

/// Byte comparison whose running time does not depend on where inputs differ.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
