use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{BookingError, BookingResult};

/// Lifecycle of a booking.
///
/// ```text
/// Pending ──► Confirmed ──► Completed
///    │            │
///    ▼            ▼
/// Declined    Cancelled
/// ```
///
/// Only [`BookingStatus::Confirmed`] occupies a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Declined,
    Completed,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Declined => "declined",
            BookingStatus::Completed => "completed",
        }
    }

    pub fn occupies_slot(&self) -> bool {
        match self {
            BookingStatus::Confirmed => true,
            BookingStatus::Pending
            | BookingStatus::Cancelled
            | BookingStatus::Declined
            | BookingStatus::Completed => false,
        }
    }

    pub fn is_terminal(&self) -> bool {
        match self {
            BookingStatus::Cancelled | BookingStatus::Declined | BookingStatus::Completed => true,
            BookingStatus::Pending | BookingStatus::Confirmed => false,
        }
    }

    pub fn can_transition_to(&self, next: BookingStatus) -> bool {
        matches!(
            (self, next),
            (BookingStatus::Pending, BookingStatus::Confirmed)
                | (BookingStatus::Pending, BookingStatus::Declined)
                | (BookingStatus::Confirmed, BookingStatus::Cancelled)
                | (BookingStatus::Confirmed, BookingStatus::Completed)
        )
    }

    /// Returns `next` if the move is allowed by the state machine.
    pub fn transition(self, next: BookingStatus) -> BookingResult<BookingStatus> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(BookingError::InvalidTransition {
                from: self,
                to: next,
            })
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            "declined" => Ok(BookingStatus::Declined),
            "completed" => Ok(BookingStatus::Completed),
            other => Err(BookingError::InvalidInput(format!(
                "Unknown booking status: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub mentor_id: Uuid,
    pub student_id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub duration_minutes: i64,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

/// A booking that passed validation and is about to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub mentor_id: Uuid,
    pub student_id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub duration_minutes: i64,
    pub status: BookingStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookingRequest {
    pub mentor_id: Uuid,
    pub student_id: Uuid,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM` or `HH:MM:SS`
    pub start_time: String,
    pub duration_minutes: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingResponse {
    pub id: Uuid,
    pub mentor_id: Uuid,
    pub student_id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub duration_minutes: i64,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        let end_time = booking.start_time
            + chrono::Duration::minutes(booking.duration_minutes);
        Self {
            id: booking.id,
            mentor_id: booking.mentor_id,
            student_id: booking.student_id,
            date: booking.date,
            start_time: booking.start_time,
            end_time,
            duration_minutes: booking.duration_minutes,
            status: booking.status,
            created_at: booking.created_at,
        }
    }
}
