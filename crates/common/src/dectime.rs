//! Decimal time: a continuous day-number timeline used as the plot x axis.
//!
//! A decimal time is the date-number of January 1 of a row's year plus the
//! row's fractional day-of-year offset. Date-numbers are proleptic Gregorian
//! ordinals with 0001-01-01 as day 1.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::Serialize;

use crate::error::TableError;
use crate::table::OutputRecord;

const MICROS_PER_DAY: f64 = 86_400_000_000.0;

/// Date-number of January 1 of `year`, or `None` outside chrono's range.
pub fn jan1_date_number(year: i32) -> Option<f64> {
    NaiveDate::from_ymd_opt(year, 1, 1).map(|date| date.num_days_from_ce() as f64)
}

/// One decimal time per row.
///
/// The leap-year rule is not applied here; the stored offset is added as is.
pub fn make_dectime(rows: &[OutputRecord]) -> Result<Vec<f64>, TableError> {
    rows.iter()
        .enumerate()
        .map(|(row, record)| {
            jan1_date_number(record.year)
                .map(|base| base + record.dectime)
                .ok_or(TableError::InvalidYear {
                    row,
                    value: record.year as f64,
                })
        })
        .collect()
}

/// Inverse of [`from_datetime`], rounded to the nearest microsecond.
pub fn to_datetime(dectime: f64) -> Option<NaiveDateTime> {
    if !dectime.is_finite() {
        return None;
    }

    let day = dectime.floor();
    let micros = ((dectime - day) * MICROS_PER_DAY).round() as i64;
    let ordinal = i32::try_from(day as i64).ok()?;
    let midnight = NaiveDate::from_num_days_from_ce_opt(ordinal)?
        .and_time(NaiveTime::from_hms_opt(0, 0, 0)?);

    midnight.checked_add_signed(Duration::microseconds(micros))
}

pub fn from_datetime(datetime: NaiveDateTime) -> f64 {
    let seconds = datetime.num_seconds_from_midnight() as f64
        + datetime.nanosecond() as f64 / 1_000_000_000.0;
    datetime.date().num_days_from_ce() as f64 + seconds / 86_400.0
}

/// Calendar breakdown of a decimal time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarStamp {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
}

impl From<NaiveDateTime> for CalendarStamp {
    fn from(value: NaiveDateTime) -> Self {
        Self {
            year: value.year(),
            month: value.month(),
            day: value.day(),
            hour: value.hour(),
        }
    }
}

pub fn calendar_stamps(dectimes: &[f64]) -> Result<Vec<CalendarStamp>, TableError> {
    dectimes
        .iter()
        .enumerate()
        .map(|(row, &value)| {
            to_datetime(value)
                .map(CalendarStamp::from)
                .ok_or(TableError::InvalidDecimalTime { row, value })
        })
        .collect()
}

#[cfg(test)]
mod tests;
