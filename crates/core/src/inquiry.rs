//! Booking inquiry schema and validation.
//!
//! Visitors submit an [`InquiryPayload`]; [`InquiryPayload::into_inquiry`]
//! either yields a typed [`Inquiry`] or a list of [`FieldError`]s. Error
//! codes are stable identifiers the frontend maps to localized text, so they
//! must not change casually.
//!
//! Dates are accepted in ISO `YYYY-MM-DD` form only.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidateEmail, ValidationError, ValidationErrors};

use crate::dates::parse_iso_date;

/// Smallest accepted party size.
pub const MIN_GUESTS: i64 = 1;

/// Largest accepted party size (capacity of the mobile home).
pub const MAX_GUESTS: i64 = 6;

/// Upper bound on the free-text message, in characters. Mirrors the `length`
/// rule on [`InquiryPayload::message`].
pub const MAX_MESSAGE_CHARS: u64 = 2000;

// ---------------------------------------------------------------------------
// Error codes
// ---------------------------------------------------------------------------

pub mod codes {
    pub const NAME_REQUIRED: &str = "nameRequired";
    pub const EMAIL_REQUIRED: &str = "emailRequired";
    pub const EMAIL_INVALID: &str = "emailInvalid";
    pub const PHONE_REQUIRED: &str = "phoneRequired";
    pub const GUESTS_REQUIRED: &str = "guestsRequired";
    pub const GUESTS_INVALID: &str = "guestsInvalid";
    pub const GUESTS_MIN: &str = "guestsMin";
    pub const GUESTS_MAX: &str = "guestsMax";
    pub const CHECK_IN_REQUIRED: &str = "checkInRequired";
    pub const CHECK_IN_INVALID: &str = "checkInInvalid";
    pub const CHECK_OUT_REQUIRED: &str = "checkOutRequired";
    pub const CHECK_OUT_INVALID: &str = "checkOutInvalid";
    pub const CHECK_OUT_AFTER_CHECK_IN: &str = "checkOutAfterCheckIn";
    pub const MESSAGE_TOO_LONG: &str = "messageTooLong";
}

// ---------------------------------------------------------------------------
// Field errors
// ---------------------------------------------------------------------------

/// Inquiry form fields, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum InquiryField {
    Name,
    Email,
    Phone,
    Guests,
    CheckIn,
    CheckOut,
    Message,
}

impl InquiryField {
    fn from_struct_field(name: &str) -> Option<Self> {
        match name {
            "name" => Some(Self::Name),
            "email" => Some(Self::Email),
            "phone" => Some(Self::Phone),
            "guests" => Some(Self::Guests),
            "check_in" => Some(Self::CheckIn),
            "check_out" => Some(Self::CheckOut),
            "message" => Some(Self::Message),
            _ => None,
        }
    }
}

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: InquiryField,
    pub code: String,
}

impl FieldError {
    pub fn new(field: InquiryField, code: &str) -> Self {
        Self {
            field,
            code: code.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Guest count input
// ---------------------------------------------------------------------------

/// Guest count as submitted. Accepts a JSON number or numeric text; any
/// integral value (`3`, `"7.0"`, `1e10`) is a count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum GuestInput {
    #[default]
    Missing,
    Invalid,
    Count(i64),
}

impl<'de> Deserialize<'de> for GuestInput {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(match value {
            serde_json::Value::Null => GuestInput::Missing,
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => GuestInput::Count(i),
                None => n.as_f64().map_or(GuestInput::Invalid, GuestInput::from_float),
            },
            serde_json::Value::String(s) if s.trim().is_empty() => GuestInput::Missing,
            serde_json::Value::String(s) => s
                .trim()
                .parse::<f64>()
                .map_or(GuestInput::Invalid, GuestInput::from_float),
            _ => GuestInput::Invalid,
        })
    }
}

impl GuestInput {
    /// Integral values become a count, saturating at the `i64` bounds so
    /// huge values still fail the range rules. Fractions, NaN and infinities
    /// are invalid.
    fn from_float(f: f64) -> Self {
        if f.is_finite() && f.fract() == 0.0 {
            GuestInput::Count(f as i64)
        } else {
            GuestInput::Invalid
        }
    }
}

// ---------------------------------------------------------------------------
// Payload
// ---------------------------------------------------------------------------

/// Raw inquiry as posted by the form. Every field is optional on the wire so
/// that missing values surface as field errors rather than parse failures.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InquiryPayload {
    #[serde(default)]
    #[validate(custom(function = "validate_name"))]
    pub name: String,

    #[serde(default)]
    #[validate(custom(function = "validate_email_address"))]
    pub email: String,

    #[serde(default)]
    #[validate(custom(function = "validate_phone"))]
    pub phone: String,

    #[serde(default)]
    #[validate(custom(function = "validate_guests"))]
    pub guests: GuestInput,

    #[serde(default)]
    #[validate(custom(function = "validate_check_in"))]
    pub check_in: String,

    #[serde(default)]
    #[validate(custom(function = "validate_check_out"))]
    pub check_out: String,

    #[serde(default)]
    #[validate(length(max = 2000, code = "messageTooLong"))]
    pub message: Option<String>,

    /// Locale tag of the submitting page; not validated.
    #[serde(default)]
    pub locale: Option<String>,
}

/// A validated inquiry, ready to be forwarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Inquiry {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub guests: u8,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub message: Option<String>,
}

impl Inquiry {
    /// Number of nights between check-in and check-out.
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }
}

impl InquiryPayload {
    /// Run every field rule plus the check-out-after-check-in rule.
    ///
    /// Errors are ordered by field; each field reports at most one code.
    pub fn into_inquiry(self) -> Result<Inquiry, Vec<FieldError>> {
        let mut errors = match self.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };

        let check_in = parse_iso_date(self.check_in.trim());
        let check_out = parse_iso_date(self.check_out.trim());
        if let (Some(check_in), Some(check_out)) = (check_in, check_out) {
            if check_out <= check_in {
                errors.add(
                    "check_out",
                    ValidationError::new(codes::CHECK_OUT_AFTER_CHECK_IN),
                );
            }
        }

        let field_errors = collect_field_errors(&errors);
        if !field_errors.is_empty() {
            return Err(field_errors);
        }

        match (self.guests, check_in, check_out) {
            (GuestInput::Count(guests), Some(check_in), Some(check_out)) => Ok(Inquiry {
                name: self.name.trim().to_string(),
                email: self.email.trim().to_string(),
                phone: self.phone.trim().to_string(),
                guests: u8::try_from(guests).unwrap_or(u8::MAX),
                check_in,
                check_out,
                message: self
                    .message
                    .map(|m| m.trim().to_string())
                    .filter(|m| !m.is_empty()),
            }),
            // Unreachable when the field rules passed; report rather than panic.
            _ => Err(vec![FieldError::new(
                InquiryField::Guests,
                codes::GUESTS_REQUIRED,
            )]),
        }
    }
}

fn collect_field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .filter_map(|(name, errs)| {
            let field = InquiryField::from_struct_field(name)?;
            errs.first().map(|e| FieldError::new(field, &e.code))
        })
        .collect();
    out.sort_by_key(|e| e.field);
    out
}

// ---------------------------------------------------------------------------
// Field rules
// ---------------------------------------------------------------------------

fn required(value: &str, code: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(code));
    }
    Ok(())
}

fn validate_name(value: &str) -> Result<(), ValidationError> {
    required(value, codes::NAME_REQUIRED)
}

fn validate_phone(value: &str) -> Result<(), ValidationError> {
    required(value, codes::PHONE_REQUIRED)
}

fn validate_email_address(value: &str) -> Result<(), ValidationError> {
    required(value, codes::EMAIL_REQUIRED)?;
    if !value.trim().validate_email() {
        return Err(ValidationError::new(codes::EMAIL_INVALID));
    }
    Ok(())
}

fn validate_guests(value: &GuestInput) -> Result<(), ValidationError> {
    match *value {
        GuestInput::Missing => Err(ValidationError::new(codes::GUESTS_REQUIRED)),
        GuestInput::Invalid => Err(ValidationError::new(codes::GUESTS_INVALID)),
        GuestInput::Count(n) if n < MIN_GUESTS => Err(ValidationError::new(codes::GUESTS_MIN)),
        GuestInput::Count(n) if n > MAX_GUESTS => Err(ValidationError::new(codes::GUESTS_MAX)),
        GuestInput::Count(_) => Ok(()),
    }
}

fn validate_date(
    value: &str,
    required_code: &'static str,
    invalid_code: &'static str,
) -> Result<(), ValidationError> {
    required(value, required_code)?;
    match parse_iso_date(value.trim()) {
        Some(_) => Ok(()),
        None => Err(ValidationError::new(invalid_code)),
    }
}

fn validate_check_in(value: &str) -> Result<(), ValidationError> {
    validate_date(value, codes::CHECK_IN_REQUIRED, codes::CHECK_IN_INVALID)
}

fn validate_check_out(value: &str) -> Result<(), ValidationError> {
    validate_date(value, codes::CHECK_OUT_REQUIRED, codes::CHECK_OUT_INVALID)
}
