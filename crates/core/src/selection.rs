//! Check-in/check-out selection state machine for the availability calendar.
//!
//! ```text
//!   None ──pick d──▶ CheckIn(d)
//!   CheckIn(a) ──pick b > a──▶ Range(a, b)
//!   CheckIn(a) ──pick b < a──▶ CheckIn(b)
//!   CheckIn(a) ──pick a──────▶ CheckIn(a)
//!   Range(_, _) ──pick d──▶ CheckIn(d)
//! ```
//!
//! Past dates and booked dates are never selectable and leave the state
//! untouched.

use chrono::NaiveDate;
use serde::Serialize;

use crate::dates::{format_iso_date, is_date_booked, BookedInterval};

/// Current calendar selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Selection {
    #[default]
    None,
    CheckIn {
        check_in: NaiveDate,
    },
    Range {
        check_in: NaiveDate,
        check_out: NaiveDate,
    },
}

/// Why a picked date was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rejected {
    /// The date is before today.
    Past,
    /// The date falls inside a booked interval.
    Booked,
}

/// Result of picking a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The pick was accepted; carries the new selection (which may equal the
    /// previous one when the current check-in is picked again).
    Moved(Selection),
    /// The pick was ignored; the previous selection still holds.
    Rejected(Rejected),
}

impl Selection {
    /// Rebuild a selection from optional endpoints, e.g. from query
    /// parameters. A check-out without a check-in, or one that does not
    /// follow the check-in, is dropped.
    pub fn from_dates(check_in: Option<NaiveDate>, check_out: Option<NaiveDate>) -> Self {
        match (check_in, check_out) {
            (Some(check_in), Some(check_out)) if check_out > check_in => Self::Range {
                check_in,
                check_out,
            },
            (Some(check_in), _) => Self::CheckIn { check_in },
            (None, _) => Self::None,
        }
    }

    /// Apply a date pick.
    pub fn select(
        self,
        date: NaiveDate,
        today: NaiveDate,
        booked: &[BookedInterval],
    ) -> SelectOutcome {
        if date < today {
            return SelectOutcome::Rejected(Rejected::Past);
        }
        if is_date_booked(date, booked) {
            return SelectOutcome::Rejected(Rejected::Booked);
        }

        let next = match self {
            Self::None | Self::Range { .. } => Self::CheckIn { check_in: date },
            Self::CheckIn { check_in } if date > check_in => Self::Range {
                check_in,
                check_out: date,
            },
            Self::CheckIn { check_in } if date < check_in => Self::CheckIn { check_in: date },
            Self::CheckIn { .. } => self,
        };
        SelectOutcome::Moved(next)
    }

    /// Like [`Selection::select`], returning the resulting selection whether
    /// or not the pick was accepted.
    pub fn apply(self, date: NaiveDate, today: NaiveDate, booked: &[BookedInterval]) -> Self {
        match self.select(date, today, booked) {
            SelectOutcome::Moved(next) => next,
            SelectOutcome::Rejected(_) => self,
        }
    }

    pub fn check_in(&self) -> Option<NaiveDate> {
        match self {
            Self::None => None,
            Self::CheckIn { check_in } | Self::Range { check_in, .. } => Some(*check_in),
        }
    }

    pub fn check_out(&self) -> Option<NaiveDate> {
        match self {
            Self::Range { check_out, .. } => Some(*check_out),
            _ => None,
        }
    }

    /// Whether `date` is the selected check-in or check-out.
    pub fn is_endpoint(&self, date: NaiveDate) -> bool {
        self.check_in() == Some(date) || self.check_out() == Some(date)
    }

    /// Whether `date` lies strictly between check-in and check-out.
    pub fn contains_strictly(&self, date: NaiveDate) -> bool {
        match self {
            Self::Range {
                check_in,
                check_out,
            } => *check_in < date && date < *check_out,
            _ => false,
        }
    }

    /// `(checkIn, checkOut)` strings used to pre-fill the inquiry form;
    /// absent endpoints are empty strings.
    pub fn as_form_dates(&self) -> (String, String) {
        (
            self.check_in().map(format_iso_date).unwrap_or_default(),
            self.check_out().map(format_iso_date).unwrap_or_default(),
        )
    }
}
