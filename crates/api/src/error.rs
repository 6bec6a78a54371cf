use axum::http::header::RETRY_AFTER;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use lana_core::error::CoreError;
use lana_core::inquiry::FieldError;
use lana_core::locale::Locale;
use lana_delivery::MailError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `lana_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The inquiry failed schema validation.
    #[error("Inquiry validation failed ({} field errors)", .0.len())]
    InvalidInquiry(Vec<FieldError>),

    /// The client exceeded its submission quota.
    #[error("Rate limit exceeded, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    /// The inquiry email could not be sent.
    #[error("Inquiry delivery failed: {source}")]
    Delivery {
        locale: Locale,
        #[source]
        source: MailError,
    },

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// Generic user-facing text for a failed send.
pub fn delivery_failure_message(locale: Locale) -> &'static str {
    locale.pick(
        "Greška pri slanju emaila. Molimo pokušajte ponovno.",
        "Error sending email. Please try again.",
    )
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, key } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} '{key}' not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- Inquiry pipeline ---
            AppError::InvalidInquiry(details) => {
                let body = json!({
                    "error": "Validation failed",
                    "code": "VALIDATION_ERROR",
                    "details": details,
                });
                return (StatusCode::BAD_REQUEST, axum::Json(body)).into_response();
            }
            AppError::RateLimited { retry_after_secs } => {
                let body = json!({
                    "error": "Too many requests. Please try again later.",
                    "code": "RATE_LIMITED",
                });
                let mut response = (StatusCode::TOO_MANY_REQUESTS, axum::Json(body)).into_response();
                response
                    .headers_mut()
                    .insert(RETRY_AFTER, HeaderValue::from(*retry_after_secs));
                return response;
            }
            AppError::Delivery { locale, source } => {
                tracing::error!(error = %source, "Inquiry email delivery failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DELIVERY_FAILED",
                    delivery_failure_message(*locale).to_string(),
                )
            }

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
