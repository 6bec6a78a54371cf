//! Domain logic for the Mobile Home Lana booking backend.
//!
//! Everything here is free of HTTP concerns so it can be exercised directly
//! by unit tests and reused by the API crate:
//!
//! - [`dates`] -- booked-interval membership and enumeration.
//! - [`selection`] -- the calendar check-in/check-out selection state machine.
//! - [`calendar`] -- month grid construction for the availability calendar.
//! - [`inquiry`] -- booking inquiry schema and field-level validation.
//! - [`rate_limit`] -- fixed-window rate limiter with pluggable clock and store.
//! - [`locale`] -- supported locales and localized date display.
//! - [`content`] -- static site content loaded at startup.
//! - [`sections`] -- editable text sections behind a key-value port.

pub mod calendar;
pub mod clock;
pub mod content;
pub mod dates;
pub mod error;
pub mod inquiry;
pub mod locale;
pub mod rate_limit;
pub mod sections;
pub mod selection;
pub mod types;
