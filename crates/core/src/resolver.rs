//! # Availability Resolver
//!
//! Pure computation of bookable slots for a mentor on a given day, and the
//! overlap check that guards booking creation.
//!
//! ## Slot Algorithm
//!
//! 1. A blocked date yields no slots, whatever rules apply.
//! 2. Every recurring rule for the weekday and every specific rule for the date
//!    contribute windows. Both kinds are additive.
//! 3. Each window is walked in [`SLOT_STEP_MINUTES`] steps; a start is a
//!    candidate when the whole session fits before the window closes.
//! 4. Candidates starting at or before "now" are dropped.
//! 5. Candidates overlapping a confirmed booking are marked unavailable.
//! 6. Candidates are deduplicated by start time and sorted.
//!
//! Nothing here is cached. A slot list is stale as soon as a booking is
//! written or the clock moves, so callers recompute it on every query.
//!
//! [`validate_booking`] is a point-in-time check against the snapshot the
//! caller passes in. It does not make the subsequent write exclusive; the
//! `bookings` table constraint does that.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use tracing::debug;
use uuid::Uuid;

use crate::errors::{BookingError, BookingResult};
use crate::models::availability::{AvailabilityRule, BlockedDate};
use crate::models::booking::Booking;
use crate::models::time_slot::{DaySlots, TimeSlot};
use crate::time::{minutes_since_midnight, time_from_minutes, validate_duration};

/// Distance between candidate start times, independent of session length.
pub const SLOT_STEP_MINUTES: i64 = 30;

/// Half-open interval `[start, end)` in minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub start: i64,
    pub end: i64,
}

impl Interval {
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    pub fn from_start(start_time: NaiveTime, duration_minutes: i64) -> Self {
        let start = minutes_since_midnight(start_time);
        Self::new(start, start + duration_minutes)
    }

    /// Touching endpoints do not overlap.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && self.end > other.start
    }
}

impl From<&Booking> for Interval {
    fn from(booking: &Booking) -> Self {
        Interval::from_start(booking.start_time, booking.duration_minutes)
    }
}

/// Computes the ordered slot list for one mentor on one day.
///
/// `rules` may contain every rule the mentor has; selection by date happens
/// here. Only bookings for this mentor and date in `Confirmed` status are
/// treated as occupying time, so passing an unfiltered list is safe.
///
/// # Errors
///
/// * `BookingError::InvalidInput` - non-positive duration, or a selected rule
///   whose window is empty or whose weekday is out of range
pub fn compute_slots(
    mentor_id: Uuid,
    date: NaiveDate,
    duration_minutes: i64,
    rules: &[AvailabilityRule],
    blocked_dates: &[BlockedDate],
    confirmed_bookings: &[Booking],
    now: NaiveDateTime,
) -> BookingResult<Vec<TimeSlot>> {
    validate_duration(duration_minutes)?;

    if blocked_dates
        .iter()
        .any(|blocked| blocked.mentor_id == mentor_id && blocked.date == date)
    {
        debug!("{} is blocked for mentor {}", date, mentor_id);
        return Ok(Vec::new());
    }

    let occupied: Vec<Interval> = occupying(mentor_id, date, confirmed_bookings)
        .map(Interval::from)
        .collect();

    let mut candidates: BTreeMap<i64, TimeSlot> = BTreeMap::new();

    for rule in rules
        .iter()
        .filter(|rule| rule.mentor_id == mentor_id && rule.kind.applies_to(date))
    {
        rule.validate()?;

        let window_end = minutes_since_midnight(rule.end_time);
        let mut step = minutes_since_midnight(rule.start_time);

        while step < window_end {
            let slot = Interval::new(step, step + duration_minutes);
            step += SLOT_STEP_MINUTES;

            if slot.end > window_end || candidates.contains_key(&slot.start) {
                continue;
            }
            let (Some(start_time), Some(end_time)) =
                (time_from_minutes(slot.start), time_from_minutes(slot.end))
            else {
                continue;
            };
            if date.and_time(start_time) <= now {
                continue;
            }

            let available = !occupied.iter().any(|booked| booked.overlaps(&slot));
            candidates.insert(
                slot.start,
                TimeSlot {
                    start_time,
                    end_time,
                    available,
                },
            );
        }
    }

    debug!(
        "Computed {} slots for mentor {} on {} ({} min)",
        candidates.len(),
        mentor_id,
        date,
        duration_minutes
    );

    Ok(candidates.into_values().collect())
}

/// Runs [`compute_slots`] for every day in `from..=to`.
///
/// # Errors
///
/// * `BookingError::InvalidInput` - `to` before `from`, or the range spans
///   more than `max_days` days
#[allow(clippy::too_many_arguments)]
pub fn compute_slots_for_range(
    mentor_id: Uuid,
    from: NaiveDate,
    to: NaiveDate,
    duration_minutes: i64,
    rules: &[AvailabilityRule],
    blocked_dates: &[BlockedDate],
    confirmed_bookings: &[Booking],
    now: NaiveDateTime,
    max_days: i64,
) -> BookingResult<Vec<DaySlots>> {
    validate_range(from, to, max_days)?;

    from.iter_days()
        .take_while(|date| *date <= to)
        .map(|date| {
            compute_slots(
                mentor_id,
                date,
                duration_minutes,
                rules,
                blocked_dates,
                confirmed_bookings,
                now,
            )
            .map(|slots| DaySlots { date, slots })
        })
        .collect()
}

pub fn validate_range(from: NaiveDate, to: NaiveDate, max_days: i64) -> BookingResult<()> {
    if to < from {
        return Err(BookingError::InvalidInput(format!(
            "Range end {} is before range start {}",
            to, from
        )));
    }
    let days = (to - from).num_days() + 1;
    if days > max_days {
        return Err(BookingError::InvalidInput(format!(
            "Range spans {} days, at most {} allowed",
            days, max_days
        )));
    }
    Ok(())
}

/// Checks a proposed booking against the confirmed bookings snapshot.
///
/// # Errors
///
/// * `BookingError::InvalidInput` - non-positive duration
/// * `BookingError::Conflict` - a confirmed booking for the same mentor and
///   date overlaps the proposed interval
pub fn validate_booking(
    mentor_id: Uuid,
    date: NaiveDate,
    start_time: NaiveTime,
    duration_minutes: i64,
    confirmed_bookings: &[Booking],
) -> BookingResult<()> {
    validate_duration(duration_minutes)?;

    let proposed = Interval::from_start(start_time, duration_minutes);
    match occupying(mentor_id, date, confirmed_bookings)
        .find(|booking| Interval::from(*booking).overlaps(&proposed))
    {
        Some(existing) => Err(BookingError::Conflict(format!(
            "{} {} overlaps an existing booking at {} for {} minutes",
            date,
            start_time.format("%H:%M"),
            existing.start_time.format("%H:%M"),
            existing.duration_minutes
        ))),
        None => Ok(()),
    }
}

fn occupying<'a>(
    mentor_id: Uuid,
    date: NaiveDate,
    bookings: &'a [Booking],
) -> impl Iterator<Item = &'a Booking> {
    bookings.iter().filter(move |booking| {
        booking.mentor_id == mentor_id && booking.date == date && booking.status.occupies_slot()
    })
}
