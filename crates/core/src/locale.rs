//! Supported locales and localized date display.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Short English month names, indexed by `month0`.
const EN_MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const HR_WEEKDAYS: [&str; 7] = ["Pon", "Uto", "Sri", "Čet", "Pet", "Sub", "Ned"];
const EN_WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// A site language. Croatian is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Hr,
    En,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::Hr => "hr",
            Locale::En => "en",
        }
    }

    /// Parse a locale tag, falling back to the default for anything unknown.
    ///
    /// Region suffixes are ignored, so `en-GB` maps to [`Locale::En`].
    pub fn from_tag(tag: Option<&str>) -> Self {
        let Some(tag) = tag else {
            return Self::default();
        };
        let primary = tag.split(['-', '_']).next().unwrap_or_default();
        match primary.trim().to_ascii_lowercase().as_str() {
            "en" => Locale::En,
            "hr" => Locale::Hr,
            _ => Self::default(),
        }
    }

    /// Pick between the Croatian and English variant of a value.
    pub fn pick<'a, T: ?Sized>(&self, hr: &'a T, en: &'a T) -> &'a T {
        match self {
            Locale::Hr => hr,
            Locale::En => en,
        }
    }

    /// Human-readable date: `01.08.2025.` in Croatian, `Aug 1, 2025` in English.
    pub fn format_date(&self, date: NaiveDate) -> String {
        match self {
            Locale::Hr => date.format("%d.%m.%Y.").to_string(),
            Locale::En => format!(
                "{} {}, {}",
                EN_MONTHS[date.month0() as usize],
                date.day(),
                date.year()
            ),
        }
    }

    /// Weekday column headers, Monday first.
    pub fn weekday_headers(&self) -> [&'static str; 7] {
        match self {
            Locale::Hr => HR_WEEKDAYS,
            Locale::En => EN_WEEKDAYS,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
