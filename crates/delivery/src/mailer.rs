use lana_core::inquiry::Inquiry;
use lana_core::locale::Locale;
use uuid::Uuid;

use crate::email::MailError;

/// Forwards a validated inquiry to the property operator.
#[async_trait::async_trait]
pub trait InquiryMailer: Send + Sync {
    /// Send one email for `inquiry`. No retries: a failure is returned as is.
    async fn send_inquiry(
        &self,
        inquiry: &Inquiry,
        locale: Locale,
        reference: Uuid,
    ) -> Result<(), MailError>;
}

/// Mailer installed when SMTP settings are absent.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledMailer;

#[async_trait::async_trait]
impl InquiryMailer for DisabledMailer {
    async fn send_inquiry(
        &self,
        _inquiry: &Inquiry,
        _locale: Locale,
        reference: Uuid,
    ) -> Result<(), MailError> {
        tracing::warn!(%reference, "Inquiry dropped: SMTP is not configured");
        Err(MailError::NotConfigured)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[tokio::test]
    async fn disabled_mailer_always_fails() {
        let inquiry = Inquiry {
            name: "Ana".into(),
            email: "ana@example.com".into(),
            phone: "+385911234567".into(),
            guests: 2,
            check_in: NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(),
            check_out: NaiveDate::from_ymd_opt(2025, 8, 5).unwrap(),
            message: None,
        };
        let result = DisabledMailer
            .send_inquiry(&inquiry, Locale::En, Uuid::now_v7())
            .await;
        assert!(matches!(result, Err(MailError::NotConfigured)));
    }
}
