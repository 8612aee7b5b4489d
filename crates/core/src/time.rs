//! Parsing and arithmetic for calendar dates and minute-resolution times of day.

use chrono::{NaiveDate, NaiveTime, Timelike};

use crate::errors::{BookingError, BookingResult};

/// Longest session that can be booked, in minutes.
pub const MAX_DURATION_MINUTES: i64 = 24 * 60;

pub fn parse_date(value: &str) -> BookingResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| BookingError::InvalidInput(format!("Malformed date '{}', expected YYYY-MM-DD", value)))
}

/// Accepts `HH:MM` and `HH:MM:SS`. Seconds are dropped.
pub fn parse_time_of_day(value: &str) -> BookingResult<NaiveTime> {
    let value = value.trim();
    let parsed = NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|_| BookingError::InvalidInput(format!("Malformed time '{}', expected HH:MM", value)))?;
    Ok(truncate_to_minute(parsed))
}

pub fn validate_duration(duration_minutes: i64) -> BookingResult<()> {
    if duration_minutes <= 0 {
        return Err(BookingError::InvalidInput(format!(
            "duration_minutes must be positive, got {}",
            duration_minutes
        )));
    }
    if duration_minutes > MAX_DURATION_MINUTES {
        return Err(BookingError::InvalidInput(format!(
            "duration_minutes must not exceed {}, got {}",
            MAX_DURATION_MINUTES, duration_minutes
        )));
    }
    Ok(())
}

pub fn minutes_since_midnight(time: NaiveTime) -> i64 {
    i64::from(time.hour()) * 60 + i64::from(time.minute())
}

/// Inverse of [`minutes_since_midnight`] for values inside a single day.
pub fn time_from_minutes(minutes: i64) -> Option<NaiveTime> {
    if !(0..MAX_DURATION_MINUTES).contains(&minutes) {
        return None;
    }
    NaiveTime::from_hms_opt((minutes / 60) as u32, (minutes % 60) as u32, 0)
}

fn truncate_to_minute(time: NaiveTime) -> NaiveTime {
    time.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(time)
}
