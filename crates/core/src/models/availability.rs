use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{BookingError, BookingResult};

/// Which days an availability window applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuleKind {
    /// Repeats every week. `day_of_week` counts from Sunday = 0 to Saturday = 6.
    Recurring { day_of_week: u8 },
    /// Applies to one calendar date only, in addition to any recurring rules.
    Specific { date: NaiveDate },
}

impl RuleKind {
    /// Whether a rule of this kind contributes windows to `date`.
    pub fn applies_to(&self, date: NaiveDate) -> bool {
        match self {
            RuleKind::Recurring { day_of_week } => {
                u32::from(*day_of_week) == date.weekday().num_days_from_sunday()
            }
            RuleKind::Specific { date: rule_date } => *rule_date == date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityRule {
    pub id: Uuid,
    pub mentor_id: Uuid,
    pub kind: RuleKind,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl AvailabilityRule {
    pub fn validate(&self) -> BookingResult<()> {
        validate_window(&self.kind, self.start_time, self.end_time)
    }
}

pub(crate) fn validate_window(
    kind: &RuleKind,
    start_time: NaiveTime,
    end_time: NaiveTime,
) -> BookingResult<()> {
    if let RuleKind::Recurring { day_of_week } = kind {
        if *day_of_week > 6 {
            return Err(BookingError::InvalidInput(format!(
                "day_of_week must be between 0 and 6, got {}",
                day_of_week
            )));
        }
    }
    if start_time >= end_time {
        return Err(BookingError::InvalidInput(format!(
            "Availability window must start before it ends ({} >= {})",
            start_time.format("%H:%M"),
            end_time.format("%H:%M")
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockedDate {
    pub id: Uuid,
    pub mentor_id: Uuid,
    pub date: NaiveDate,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRuleRequest {
    pub kind: RuleKind,
    /// `HH:MM` or `HH:MM:SS`
    pub start_time: String,
    pub end_time: String,
}

/// A validated rule that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAvailabilityRule {
    pub mentor_id: Uuid,
    pub kind: RuleKind,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl NewAvailabilityRule {
    pub fn validate(&self) -> BookingResult<()> {
        validate_window(&self.kind, self.start_time, self.end_time)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockDateRequest {
    /// `YYYY-MM-DD`
    pub date: String,
    pub reason: Option<String>,
}
