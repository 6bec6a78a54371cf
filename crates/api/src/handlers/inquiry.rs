//! Booking inquiry submission.
//!
//! Pipeline: rate limit -> parse -> validate -> send. Each stage short-circuits
//! with its own error kind, so a throttled client never reaches validation and
//! an invalid inquiry never reaches the mailer.

use axum::body::Bytes;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use lana_core::inquiry::InquiryPayload;
use lana_core::locale::Locale;
use lana_core::rate_limit::RateLimitDecision;
use serde::Serialize;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::middleware::client_addr::ClientAddr;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct InquiryAccepted {
    pub success: bool,
    pub message: &'static str,
    /// Identifier quoted in the operator email.
    pub reference: Uuid,
}

/// Localized acknowledgement text.
pub fn success_message(locale: Locale) -> &'static str {
    locale.pick(
        "Vaš upit je uspješno poslan!",
        "Your inquiry has been sent successfully!",
    )
}

/// POST /api/v1/inquiry
///
/// Validate a booking inquiry and email it to the operator.
pub async fn submit_inquiry(
    State(state): State<AppState>,
    client: ClientAddr,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    enforce_rate_limit(&state, &client).await?;

    let payload: InquiryPayload = serde_json::from_slice(&body)
        .map_err(|e| AppError::BadRequest(format!("Invalid JSON body: {e}")))?;
    let locale = Locale::from_tag(payload.locale.as_deref());

    let inquiry = payload.into_inquiry().map_err(|errors| {
        tracing::debug!(client = %client, errors = errors.len(), "Inquiry rejected by validation");
        AppError::InvalidInquiry(errors)
    })?;

    let reference = Uuid::now_v7();
    state
        .mailer
        .send_inquiry(&inquiry, locale, reference)
        .await
        .map_err(|source| {
            tracing::error!(%reference, client = %client, "Inquiry could not be delivered");
            AppError::Delivery { locale, source }
        })?;

    tracing::info!(
        %reference,
        client = %client,
        %locale,
        check_in = %inquiry.check_in,
        check_out = %inquiry.check_out,
        guests = inquiry.guests,
        "Inquiry forwarded",
    );

    Ok(Json(DataResponse {
        data: InquiryAccepted {
            success: true,
            message: success_message(locale),
            reference,
        },
    }))
}

/// Reject the request if `client` is over quota. A failing store lets the
/// request through.
async fn enforce_rate_limit(state: &AppState, client: &ClientAddr) -> AppResult<()> {
    match state.rate_limiter.check(client.as_str()).await {
        Ok(RateLimitDecision::Allowed { remaining }) => {
            tracing::debug!(client = %client, remaining, "Inquiry admitted by rate limiter");
            Ok(())
        }
        Ok(RateLimitDecision::Limited { retry_after }) => {
            tracing::warn!(client = %client, "Inquiry rate limit exceeded");
            Err(AppError::RateLimited {
                retry_after_secs: u64::try_from(retry_after.num_seconds()).unwrap_or(0).max(1),
            })
        }
        Err(e) => {
            tracing::warn!(client = %client, error = %e, "Rate limit store failed, admitting request");
            Ok(())
        }
    }
}
