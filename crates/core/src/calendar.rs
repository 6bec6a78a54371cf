//! Month grid for the availability calendar.
//!
//! Weeks start on Monday. A grid always covers whole weeks, so it may include
//! trailing days of the previous month and leading days of the next one.

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use serde::Serialize;

use crate::dates::{is_date_booked, BookedInterval};
use crate::error::CoreError;
use crate::locale::Locale;
use crate::selection::Selection;

/// Display status of a single day, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DayStatus {
    Past,
    Booked,
    Selected,
    InRange,
    Available,
}

impl DayStatus {
    /// Whether a click on this day may change the selection.
    pub fn is_selectable(&self) -> bool {
        !matches!(self, DayStatus::Past | DayStatus::Booked)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub in_month: bool,
    pub status: DayStatus,
}

/// A year/month pair, always holding a valid month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    /// A month is valid only if its whole grid and both neighbouring months
    /// are representable dates.
    pub fn new(year: i32, month: u32) -> Result<Self, CoreError> {
        let representable = NaiveDate::from_ymd_opt(year, month, 1).and_then(|first| {
            let previous = first.checked_sub_months(Months::new(1))?;
            let grid_start = first.checked_sub_days(Days::new(7))?;
            let grid_end = first
                .checked_add_months(Months::new(1))?
                .checked_add_days(Days::new(7))?;
            Some((previous.min(grid_start), grid_end))
        });
        representable
            .map(|_| Self { year, month })
            .ok_or_else(|| CoreError::Validation(format!("Invalid month: {year}-{month:02}")))
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    pub fn last_day(&self) -> NaiveDate {
        self.next().first_day().pred_opt().unwrap_or_default()
    }

    pub fn previous(&self) -> Self {
        Self::of(self.first_day() - Months::new(1))
    }

    pub fn next(&self) -> Self {
        Self::of(self.first_day() + Months::new(1))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthGrid {
    pub month: YearMonth,
    pub previous: YearMonth,
    pub next: YearMonth,
    pub weekdays: [&'static str; 7],
    pub weeks: Vec<[CalendarDay; 7]>,
}

/// Build the grid for `month` as seen on `today`, highlighting `selection`.
pub fn build_month_grid(
    month: YearMonth,
    today: NaiveDate,
    booked: &[BookedInterval],
    selection: &Selection,
    locale: Locale,
) -> MonthGrid {
    let first = month.first_day();
    let last = month.last_day();
    let grid_start = first - Days::new(u64::from(first.weekday().num_days_from_monday()));
    let grid_end = last + Days::new(u64::from(6 - last.weekday().num_days_from_monday()));

    let days: Vec<CalendarDay> = grid_start
        .iter_days()
        .take_while(|d| *d <= grid_end)
        .map(|date| CalendarDay {
            date,
            in_month: date.month() == month.month && date.year() == month.year,
            status: day_status(date, today, booked, selection),
        })
        .collect();

    let weeks = days
        .chunks_exact(7)
        .filter_map(|week| <[CalendarDay; 7]>::try_from(week.to_vec()).ok())
        .collect();

    MonthGrid {
        month,
        previous: month.previous(),
        next: month.next(),
        weekdays: locale.weekday_headers(),
        weeks,
    }
}

/// Status of one day: past beats booked beats selected beats in-range.
pub fn day_status(
    date: NaiveDate,
    today: NaiveDate,
    booked: &[BookedInterval],
    selection: &Selection,
) -> DayStatus {
    if date < today {
        DayStatus::Past
    } else if is_date_booked(date, booked) {
        DayStatus::Booked
    } else if selection.is_endpoint(date) {
        DayStatus::Selected
    } else if selection.contains_strictly(date) {
        DayStatus::InRange
    } else {
        DayStatus::Available
    }
}

/// First weekday of a grid row.
pub const WEEK_START: Weekday = Weekday::Mon;
