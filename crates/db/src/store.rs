//! PostgreSQL implementation of [`BookingStore`].

use async_trait::async_trait;
use chrono::NaiveDate;
use mentorbook_core::errors::{BookingError, BookingResult};
use mentorbook_core::models::availability::{
    AvailabilityRule, BlockedDate, NewAvailabilityRule, RuleKind,
};
use mentorbook_core::models::booking::{Booking, BookingStatus, NewBooking};
use mentorbook_core::store::BookingStore;
use uuid::Uuid;

use crate::repositories::{availability, booking};
use crate::DbPool;

#[derive(Clone)]
pub struct PgBookingStore {
    pool: DbPool,
}

impl PgBookingStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

fn conflict_or_upstream(err: eyre::Report, what: &str) -> BookingError {
    if booking::is_booking_conflict(&err) {
        BookingError::Conflict(format!("{} overlaps a confirmed booking", what))
    } else {
        BookingError::Upstream(err)
    }
}

fn into_bookings(rows: Vec<crate::models::DbBooking>) -> BookingResult<Vec<Booking>> {
    rows.into_iter()
        .map(|row| Booking::try_from(row).map_err(BookingError::Upstream))
        .collect()
}

#[async_trait]
impl BookingStore for PgBookingStore {
    async fn availability_rules(&self, mentor_id: Uuid) -> BookingResult<Vec<AvailabilityRule>> {
        let rows = availability::get_rules_by_mentor_id(&self.pool, mentor_id).await?;
        rows.into_iter()
            .map(|row| AvailabilityRule::try_from(row).map_err(BookingError::Upstream))
            .collect()
    }

    async fn insert_availability_rule(
        &self,
        rule: NewAvailabilityRule,
    ) -> BookingResult<AvailabilityRule> {
        let (day_of_week, specific_date) = match rule.kind {
            RuleKind::Recurring { day_of_week } => (Some(i16::from(day_of_week)), None),
            RuleKind::Specific { date } => (None, Some(date)),
        };

        let row = availability::create_rule(
            &self.pool,
            rule.mentor_id,
            day_of_week,
            specific_date,
            rule.start_time,
            rule.end_time,
        )
        .await?;

        Ok(AvailabilityRule::try_from(row)?)
    }

    async fn delete_availability_rule(&self, mentor_id: Uuid, rule_id: Uuid) -> BookingResult<bool> {
        Ok(availability::delete_rule(&self.pool, mentor_id, rule_id).await?)
    }

    async fn blocked_dates(
        &self,
        mentor_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> BookingResult<Vec<BlockedDate>> {
        let rows = availability::get_blocked_dates_in_range(&self.pool, mentor_id, from, to).await?;
        Ok(rows.into_iter().map(BlockedDate::from).collect())
    }

    async fn insert_blocked_date(
        &self,
        mentor_id: Uuid,
        date: NaiveDate,
        reason: Option<String>,
    ) -> BookingResult<BlockedDate> {
        let row =
            availability::create_blocked_date(&self.pool, mentor_id, date, reason.as_deref()).await?;
        Ok(row.into())
    }

    async fn delete_blocked_date(&self, mentor_id: Uuid, blocked_id: Uuid) -> BookingResult<bool> {
        Ok(availability::delete_blocked_date(&self.pool, mentor_id, blocked_id).await?)
    }

    async fn confirmed_bookings(
        &self,
        mentor_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> BookingResult<Vec<Booking>> {
        let rows = booking::get_bookings_for_mentor(
            &self.pool,
            mentor_id,
            from,
            to,
            Some(BookingStatus::Confirmed.as_str()),
        )
        .await?;
        into_bookings(rows)
    }

    async fn mentor_bookings(
        &self,
        mentor_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> BookingResult<Vec<Booking>> {
        let rows = booking::get_bookings_for_mentor(&self.pool, mentor_id, from, to, None).await?;
        into_bookings(rows)
    }

    async fn student_bookings(&self, student_id: Uuid) -> BookingResult<Vec<Booking>> {
        let rows = booking::get_bookings_for_student(&self.pool, student_id).await?;
        into_bookings(rows)
    }

    async fn get_booking(&self, id: Uuid) -> BookingResult<Option<Booking>> {
        booking::get_booking_by_id(&self.pool, id)
            .await?
            .map(|row| Booking::try_from(row).map_err(BookingError::Upstream))
            .transpose()
    }

    async fn insert_booking(&self, new_booking: NewBooking) -> BookingResult<Booking> {
        let duration_minutes = i32::try_from(new_booking.duration_minutes).map_err(|_| {
            BookingError::InvalidInput(format!(
                "duration_minutes {} out of range",
                new_booking.duration_minutes
            ))
        })?;

        let row = booking::create_booking(
            &self.pool,
            new_booking.mentor_id,
            new_booking.student_id,
            new_booking.date,
            new_booking.start_time,
            duration_minutes,
            new_booking.status.as_str(),
        )
        .await
        .map_err(|e| {
            conflict_or_upstream(
                e,
                &format!("{} {}", new_booking.date, new_booking.start_time.format("%H:%M")),
            )
        })?;

        Ok(Booking::try_from(row)?)
    }

    async fn update_booking_status(
        &self,
        id: Uuid,
        from: BookingStatus,
        to: BookingStatus,
    ) -> BookingResult<Option<Booking>> {
        booking::update_booking_status(&self.pool, id, from.as_str(), to.as_str())
            .await
            .map_err(|e| conflict_or_upstream(e, &format!("Booking {}", id)))?
            .map(|row| Booking::try_from(row).map_err(BookingError::Upstream))
            .transpose()
    }
}
