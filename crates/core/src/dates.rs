//! Booked-interval membership and enumeration.
//!
//! Booked intervals come from the static content file as pairs of ISO date
//! strings. Nothing here trusts those strings: an interval that fails to
//! parse, or whose end precedes its start, simply never matches.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Strict `YYYY-MM-DD` shape. Calendar validity is checked by chrono.
static ISO_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid regex"));

/// Display and wire format for dates.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// A reservation window, inclusive on both ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookedInterval {
    #[serde(rename = "startISO")]
    pub start_iso: String,
    #[serde(rename = "endISO")]
    pub end_iso: String,
}

impl BookedInterval {
    pub fn new(start_iso: impl Into<String>, end_iso: impl Into<String>) -> Self {
        Self {
            start_iso: start_iso.into(),
            end_iso: end_iso.into(),
        }
    }

    /// Parsed `(start, end)` pair, or `None` if either side is malformed or
    /// the interval is inverted.
    pub fn range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let start = parse_iso_date(&self.start_iso)?;
        let end = parse_iso_date(&self.end_iso)?;
        (start <= end).then_some((start, end))
    }

    /// Whether `date` falls inside this interval (inclusive).
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.range()
            .is_some_and(|(start, end)| start <= date && date <= end)
    }
}

/// Parse a strict ISO 8601 calendar date (`YYYY-MM-DD`).
///
/// Rejects other shapes (`2025-8-1`, `01/08/2025`, datetimes) and impossible
/// dates such as `2025-02-30`.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    if !ISO_DATE_RE.is_match(value) {
        return None;
    }
    NaiveDate::parse_from_str(value, ISO_DATE_FORMAT).ok()
}

/// Format a date as `YYYY-MM-DD`.
pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

/// Whether `date` falls within any booked interval.
pub fn is_date_booked(date: NaiveDate, intervals: &[BookedInterval]) -> bool {
    intervals.iter().any(|interval| interval.contains(date))
}

/// Every booked date across all intervals, ascending and de-duplicated.
pub fn booked_dates(intervals: &[BookedInterval]) -> Vec<NaiveDate> {
    let mut dates = BTreeSet::new();
    for (start, end) in intervals.iter().filter_map(BookedInterval::range) {
        dates.extend(start.iter_days().take_while(|d| *d <= end));
    }
    dates.into_iter().collect()
}

/// Intervals that will never match, for reporting at load time.
pub fn malformed_intervals(intervals: &[BookedInterval]) -> Vec<&BookedInterval> {
    intervals.iter().filter(|i| i.range().is_none()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, ISO_DATE_FORMAT).unwrap()
    }

    fn july() -> Vec<BookedInterval> {
        vec![BookedInterval::new("2025-07-10", "2025-07-15")]
    }

    #[test]
    fn date_inside_interval_is_booked() {
        assert!(is_date_booked(date("2025-07-12"), &july()));
    }

    #[test]
    fn boundaries_are_inclusive() {
        assert!(is_date_booked(date("2025-07-10"), &july()));
        assert!(is_date_booked(date("2025-07-15"), &july()));
    }

    #[test]
    fn date_outside_interval_is_free() {
        assert!(!is_date_booked(date("2025-07-16"), &july()));
        assert!(!is_date_booked(date("2025-07-09"), &july()));
    }

    #[test]
    fn any_matching_interval_counts() {
        let intervals = vec![
            BookedInterval::new("2025-06-01", "2025-06-03"),
            BookedInterval::new("2025-08-20", "2025-08-22"),
        ];
        assert!(is_date_booked(date("2025-08-21"), &intervals));
        assert!(!is_date_booked(date("2025-07-01"), &intervals));
    }

    #[test]
    fn malformed_interval_never_matches() {
        let intervals = vec![
            BookedInterval::new("not-a-date", "2025-07-15"),
            BookedInterval::new("2025-07-10", "2025-13-01"),
            BookedInterval::new("", ""),
        ];
        assert!(!is_date_booked(date("2025-07-12"), &intervals));
        assert!(booked_dates(&intervals).is_empty());
    }

    #[test]
    fn malformed_interval_does_not_hide_valid_ones() {
        let intervals = vec![
            BookedInterval::new("garbage", "garbage"),
            BookedInterval::new("2025-07-10", "2025-07-15"),
        ];
        assert!(is_date_booked(date("2025-07-10"), &intervals));
        assert_eq!(malformed_intervals(&intervals).len(), 1);
    }

    #[test]
    fn inverted_interval_never_matches() {
        let intervals = vec![BookedInterval::new("2025-07-15", "2025-07-10")];
        assert!(!is_date_booked(date("2025-07-12"), &intervals));
        assert!(booked_dates(&intervals).is_empty());
    }

    #[test]
    fn enumeration_covers_every_day_inclusive() {
        let dates = booked_dates(&july());
        assert_eq!(dates.len(), 6);
        assert_eq!(dates.first(), Some(&date("2025-07-10")));
        assert_eq!(dates.last(), Some(&date("2025-07-15")));
    }

    #[test]
    fn enumeration_merges_overlaps_and_sorts() {
        let intervals = vec![
            BookedInterval::new("2025-07-14", "2025-07-16"),
            BookedInterval::new("2025-07-10", "2025-07-15"),
        ];
        let dates = booked_dates(&intervals);
        assert_eq!(dates.len(), 7);
        assert!(dates.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn single_day_interval() {
        let intervals = vec![BookedInterval::new("2025-12-31", "2025-12-31")];
        assert_eq!(booked_dates(&intervals), vec![date("2025-12-31")]);
    }

    #[test]
    fn parse_is_strict() {
        assert_eq!(parse_iso_date("2025-08-01"), Some(date("2025-08-01")));
        assert_eq!(parse_iso_date("2025-8-1"), None);
        assert_eq!(parse_iso_date("01/08/2025"), None);
        assert_eq!(parse_iso_date("2025-08-01T10:00:00"), None);
        assert_eq!(parse_iso_date("2025-02-30"), None);
        assert_eq!(parse_iso_date(" 2025-08-01"), None);
    }

    #[test]
    fn interval_serializes_with_iso_field_names() {
        let json = serde_json::to_value(BookedInterval::new("2025-07-10", "2025-07-15")).unwrap();
        assert_eq!(json["startISO"], "2025-07-10");
        assert_eq!(json["endISO"], "2025-07-15");
    }
}
