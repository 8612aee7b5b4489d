use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use eyre::{eyre, Result};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use mentorbook_core::models::{
    availability::{AvailabilityRule, BlockedDate, RuleKind},
    booking::{Booking, BookingStatus},
};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAvailabilityRule {
    pub id: Uuid,
    pub mentor_id: Uuid,
    pub day_of_week: Option<i16>,
    pub specific_date: Option<NaiveDate>,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbBlockedDate {
    pub id: Uuid,
    pub mentor_id: Uuid,
    pub blocked_date: NaiveDate,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbBooking {
    pub id: Uuid,
    pub mentor_id: Uuid,
    pub student_id: Uuid,
    pub booking_date: NaiveDate,
    pub start_time: NaiveTime,
    pub duration_minutes: i32,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<DbAvailabilityRule> for AvailabilityRule {
    type Error = eyre::Report;

    fn try_from(row: DbAvailabilityRule) -> Result<Self> {
        let kind = match (row.day_of_week, row.specific_date) {
            (Some(day), None) => RuleKind::Recurring {
                day_of_week: u8::try_from(day)
                    .map_err(|_| eyre!("Rule {} has invalid day_of_week {}", row.id, day))?,
            },
            (None, Some(date)) => RuleKind::Specific { date },
            _ => {
                return Err(eyre!(
                    "Rule {} must have exactly one of day_of_week or specific_date",
                    row.id
                ));
            }
        };

        Ok(AvailabilityRule {
            id: row.id,
            mentor_id: row.mentor_id,
            kind,
            start_time: row.start_time,
            end_time: row.end_time,
        })
    }
}

impl From<DbBlockedDate> for BlockedDate {
    fn from(row: DbBlockedDate) -> Self {
        BlockedDate {
            id: row.id,
            mentor_id: row.mentor_id,
            date: row.blocked_date,
            reason: row.reason,
        }
    }
}

impl TryFrom<DbBooking> for Booking {
    type Error = eyre::Report;

    fn try_from(row: DbBooking) -> Result<Self> {
        let status = row
            .status
            .parse::<BookingStatus>()
            .map_err(|e| eyre!("Booking {}: {}", row.id, e))?;

        Ok(Booking {
            id: row.id,
            mentor_id: row.mentor_id,
            student_id: row.student_id,
            date: row.booking_date,
            start_time: row.start_time,
            duration_minutes: i64::from(row.duration_minutes),
            status,
            created_at: row.created_at,
        })
    }
}
