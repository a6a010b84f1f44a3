// sparkify-core/src/domain/calendar.rs

use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::Serialize;

/// Calendar decomposition of a play's start time (UTC).
///
/// `week` follows ISO-8601: weeks start on Monday and week 1 is the one
/// holding the first Thursday of the year, so late-December dates may report
/// week 1 and early-January dates week 52 or 53. `year` is the calendar year,
/// not the ISO week-year. `weekday` counts from Monday = 0 to Sunday = 6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarFields {
    pub hour: u32,
    pub day: u32,
    pub week: u32,
    pub month: u32,
    pub year: i32,
    pub weekday: u32,
}

impl CalendarFields {
    /// `None` when `millis` lies outside the range chrono can represent.
    pub fn from_epoch_millis(millis: i64) -> Option<Self> {
        let instant = DateTime::<Utc>::from_timestamp_millis(millis)?;
        Some(Self::from_datetime(&instant))
    }

    pub fn from_datetime(instant: &DateTime<Utc>) -> Self {
        Self {
            hour: instant.hour(),
            day: instant.day(),
            week: instant.iso_week().week(),
            month: instant.month(),
            year: instant.year(),
            weekday: instant.weekday().num_days_from_monday(),
        }
    }
}
