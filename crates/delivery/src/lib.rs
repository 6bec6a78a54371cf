//! Outbound email for booking inquiries.
//!
//! - [`InquiryMailer`] -- the port the API calls to forward an inquiry.
//! - [`SmtpMailer`] -- SMTP implementation on top of `lettre`.
//! - [`DisabledMailer`] -- stand-in used when SMTP is not configured; every
//!   send fails with [`MailError::NotConfigured`].
//! - [`message`] -- localized subject and body rendering.

pub mod email;
pub mod mailer;
pub mod message;

pub use email::{EmailConfig, MailError, SmtpMailer};
pub use mailer::{DisabledMailer, InquiryMailer};
pub use message::{render_inquiry_email, InquiryEmail};
