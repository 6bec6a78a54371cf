//! Inquiry delivery via SMTP.
//!
//! [`SmtpMailer`] wraps the `lettre` async SMTP transport. Configuration is
//! loaded from environment variables; if `SMTP_HOST` or `INQUIRY_TO` is not
//! set, [`EmailConfig::from_env`] returns `None` and the caller should install
//! a [`DisabledMailer`](crate::DisabledMailer) instead.

use lana_core::inquiry::Inquiry;
use lana_core::locale::Locale;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use uuid::Uuid;

use crate::mailer::InquiryMailer;
use crate::message::render_inquiry_email;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for email delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    /// SMTP settings are missing, so nothing can be sent.
    #[error("SMTP is not configured")]
    NotConfigured,

    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// A sender, recipient or reply-to address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),
}

// ---------------------------------------------------------------------------
// EmailConfig
// ---------------------------------------------------------------------------

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Port that speaks TLS from the first byte.
const IMPLICIT_TLS_PORT: u16 = 465;

/// Sender used when neither `SMTP_FROM` nor `SMTP_USER` is set.
const DEFAULT_FROM_ADDRESS: &str = "noreply@mobilehome-lana.local";

#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// SMTP server hostname.
    pub smtp_host: String,
    /// SMTP server port (defaults to 587).
    pub smtp_port: u16,
    /// RFC 5322 "From" address.
    pub from_address: String,
    /// Operator mailbox that receives inquiries.
    pub inquiry_to: String,
    pub smtp_user: Option<String>,
    pub smtp_password: Option<String>,
}

impl EmailConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable     | Required | Default                           |
    /// |--------------|----------|-----------------------------------|
    /// | `SMTP_HOST`  | yes      | -                                 |
    /// | `INQUIRY_TO` | yes      | -                                 |
    /// | `SMTP_PORT`  | no       | `587`                             |
    /// | `SMTP_USER`  | no       | -                                 |
    /// | `SMTP_PASS`  | no       | -                                 |
    /// | `SMTP_FROM`  | no       | `SMTP_USER`, else a local noreply |
    pub fn from_env() -> Option<Self> {
        let smtp_host = non_empty_var("SMTP_HOST")?;
        let inquiry_to = non_empty_var("INQUIRY_TO")?;
        let smtp_user = non_empty_var("SMTP_USER");
        Some(Self {
            smtp_host,
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            from_address: non_empty_var("SMTP_FROM")
                .or_else(|| smtp_user.clone())
                .unwrap_or_else(|| DEFAULT_FROM_ADDRESS.to_string()),
            inquiry_to,
            smtp_user,
            smtp_password: non_empty_var("SMTP_PASS"),
        })
    }

    /// Whether the connection uses implicit TLS rather than STARTTLS.
    pub fn implicit_tls(&self) -> bool {
        self.smtp_port == IMPLICIT_TLS_PORT
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// ---------------------------------------------------------------------------
// SmtpMailer
// ---------------------------------------------------------------------------

/// Sends inquiry emails to the operator via SMTP.
pub struct SmtpMailer {
    config: EmailConfig,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    /// Build the transport. No connection is opened until the first send.
    pub fn new(config: EmailConfig) -> Result<Self, MailError> {
        let builder = if config.implicit_tls() {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
        };
        let mut builder = builder.port(config.smtp_port);

        if let (Some(user), Some(pass)) = (&config.smtp_user, &config.smtp_password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        Ok(Self {
            transport: builder.build(),
            config,
        })
    }

    /// Assemble the MIME message without sending it.
    pub fn build_message(
        &self,
        inquiry: &Inquiry,
        locale: Locale,
        reference: Uuid,
    ) -> Result<Message, MailError> {
        let rendered = render_inquiry_email(inquiry, locale, reference);
        let reply_to = Mailbox::new(Some(inquiry.name.clone()), inquiry.email.parse()?);

        Message::builder()
            .from(self.config.from_address.parse()?)
            .to(self.config.inquiry_to.parse()?)
            .reply_to(reply_to)
            .subject(rendered.subject)
            .multipart(MultiPart::alternative_plain_html(
                rendered.text,
                rendered.html,
            ))
            .map_err(|e| MailError::Build(e.to_string()))
    }
}

#[async_trait::async_trait]
impl InquiryMailer for SmtpMailer {
    async fn send_inquiry(
        &self,
        inquiry: &Inquiry,
        locale: Locale,
        reference: Uuid,
    ) -> Result<(), MailError> {
        let message = self.build_message(inquiry, locale, reference)?;
        self.transport.send(message).await?;

        tracing::info!(
            %reference,
            %locale,
            guests = inquiry.guests,
            "Inquiry email sent"
        );
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn config(port: u16) -> EmailConfig {
        EmailConfig {
            smtp_host: "smtp.example.com".into(),
            smtp_port: port,
            from_address: "site@example.com".into(),
            inquiry_to: "owner@example.com".into(),
            smtp_user: None,
            smtp_password: None,
        }
    }

    fn inquiry() -> Inquiry {
        Inquiry {
            name: "Ana".into(),
            email: "ana@example.com".into(),
            phone: "+385911234567".into(),
            guests: 2,
            check_in: NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(),
            check_out: NaiveDate::from_ymd_opt(2025, 8, 5).unwrap(),
            message: None,
        }
    }

    #[test]
    fn from_env_returns_none_without_smtp_host() {
        std::env::remove_var("SMTP_HOST");
        assert!(EmailConfig::from_env().is_none());
    }

    #[test]
    fn port_465_uses_implicit_tls() {
        assert!(config(465).implicit_tls());
        assert!(!config(587).implicit_tls());
    }

    #[test]
    fn message_has_operator_recipient_and_visitor_reply_to() {
        let mailer = SmtpMailer::new(config(587)).unwrap();
        let message = mailer
            .build_message(&inquiry(), Locale::En, Uuid::nil())
            .unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();
        assert!(raw.contains("To: owner@example.com"));
        assert!(raw.contains("From: site@example.com"));
        assert!(raw.contains("Reply-To: Ana <ana@example.com>"));
        assert!(raw.contains("Subject: New Booking Inquiry - Ana"));
    }

    #[test]
    fn invalid_from_address_is_reported() {
        let mut cfg = config(587);
        cfg.from_address = "not an address".into();
        let mailer = SmtpMailer::new(cfg).unwrap();
        let err = mailer
            .build_message(&inquiry(), Locale::Hr, Uuid::nil())
            .unwrap_err();
        assert!(err.to_string().contains("Email address parse error"));
    }

    #[test]
    fn mail_error_display_not_configured() {
        assert_eq!(MailError::NotConfigured.to_string(), "SMTP is not configured");
    }
}
