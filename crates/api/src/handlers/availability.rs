//! Handlers for booked dates and the availability calendar.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::NaiveDate;
use lana_core::calendar::{build_month_grid, MonthGrid, YearMonth};
use lana_core::dates::{booked_dates, is_date_booked, parse_iso_date, BookedInterval};
use lana_core::locale::Locale;
use lana_core::selection::{Rejected, SelectOutcome, Selection};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct Availability<'a> {
    pub intervals: &'a [BookedInterval],
    pub booked_dates: Vec<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct CheckDateQuery {
    pub date: String,
}

#[derive(Debug, Serialize)]
pub struct DateCheck {
    pub date: NaiveDate,
    pub booked: bool,
}

#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    pub locale: Option<String>,
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    /// A date the visitor just clicked, applied to the selection above.
    pub pick: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FormDates {
    #[serde(rename = "checkIn")]
    pub check_in: String,
    #[serde(rename = "checkOut")]
    pub check_out: String,
}

#[derive(Debug, Serialize)]
pub struct CalendarView {
    pub today: NaiveDate,
    pub selection: Selection,
    /// Set when `pick` was ignored.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejected: Option<Rejected>,
    /// Values to pre-fill the inquiry form with.
    pub form: FormDates,
    #[serde(flatten)]
    pub grid: MonthGrid,
}

/// GET /api/v1/availability
///
/// All booked intervals plus every booked date they cover.
pub async fn get_availability(State(state): State<AppState>) -> impl IntoResponse {
    let intervals = &state.content.availability;
    Json(DataResponse {
        data: Availability {
            intervals,
            booked_dates: booked_dates(intervals),
        },
    })
    .into_response()
}

/// GET /api/v1/availability/check?date=YYYY-MM-DD
pub async fn check_date(
    State(state): State<AppState>,
    Query(query): Query<CheckDateQuery>,
) -> AppResult<impl IntoResponse> {
    let date = parse_date_param("date", &query.date)?;
    let booked = is_date_booked(date, &state.content.availability);

    Ok(Json(DataResponse {
        data: DateCheck { date, booked },
    }))
}

/// GET /api/v1/calendar/{year}/{month}?locale=&check_in=&check_out=&pick=
///
/// Month grid with per-day status. The selection rebuilt from `check_in` and
/// `check_out` is advanced by `pick`, if given, and then highlighted.
pub async fn get_calendar(
    State(state): State<AppState>,
    Path((year, month)): Path<(i32, u32)>,
    Query(query): Query<CalendarQuery>,
) -> AppResult<impl IntoResponse> {
    let month = YearMonth::new(year, month)?;
    let locale = Locale::from_tag(query.locale.as_deref());
    let today = state.clock.today();

    let check_in = optional_date_param("check_in", query.check_in.as_deref())?;
    let check_out = optional_date_param("check_out", query.check_out.as_deref())?;
    let current = Selection::from_dates(check_in, check_out);

    let (selection, rejected) = match optional_date_param("pick", query.pick.as_deref())? {
        Some(date) => match current.select(date, today, &state.content.availability) {
            SelectOutcome::Moved(next) => (next, None),
            SelectOutcome::Rejected(reason) => {
                tracing::debug!(%date, ?reason, "Calendar pick ignored");
                (current, Some(reason))
            }
        },
        None => (current, None),
    };

    let grid = build_month_grid(
        month,
        today,
        &state.content.availability,
        &selection,
        locale,
    );
    let (form_check_in, form_check_out) = selection.as_form_dates();

    Ok(Json(DataResponse {
        data: CalendarView {
            today,
            selection,
            rejected,
            form: FormDates {
                check_in: form_check_in,
                check_out: form_check_out,
            },
            grid,
        },
    }))
}

fn parse_date_param(name: &str, value: &str) -> AppResult<NaiveDate> {
    parse_iso_date(value.trim()).ok_or_else(|| {
        AppError::BadRequest(format!("{name} must be a date in YYYY-MM-DD format"))
    })
}

fn optional_date_param(name: &str, value: Option<&str>) -> AppResult<Option<NaiveDate>> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => parse_date_param(name, v).map(Some),
        None => Ok(None),
    }
}
