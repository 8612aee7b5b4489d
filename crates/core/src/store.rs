use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::errors::BookingResult;
use crate::models::availability::{AvailabilityRule, BlockedDate, NewAvailabilityRule};
use crate::models::booking::{Booking, BookingStatus, NewBooking};

/// Persistence boundary for rules, blocked dates and bookings.
///
/// Fetch failures are reported as `BookingError::Upstream`. Writes that would
/// double-book a mentor must be rejected with `BookingError::Conflict`, so the
/// caller can re-query and offer fresh slots.
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Every rule the mentor has, recurring and specific.
    async fn availability_rules(&self, mentor_id: Uuid) -> BookingResult<Vec<AvailabilityRule>>;

    async fn insert_availability_rule(
        &self,
        rule: NewAvailabilityRule,
    ) -> BookingResult<AvailabilityRule>;

    /// Returns `false` when no such rule exists for the mentor.
    async fn delete_availability_rule(&self, mentor_id: Uuid, rule_id: Uuid) -> BookingResult<bool>;

    /// Blocked dates in `from..=to`.
    async fn blocked_dates(
        &self,
        mentor_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> BookingResult<Vec<BlockedDate>>;

    async fn insert_blocked_date(
        &self,
        mentor_id: Uuid,
        date: NaiveDate,
        reason: Option<String>,
    ) -> BookingResult<BlockedDate>;

    async fn delete_blocked_date(&self, mentor_id: Uuid, blocked_id: Uuid) -> BookingResult<bool>;

    /// Confirmed bookings with a date in `from..=to`.
    async fn confirmed_bookings(
        &self,
        mentor_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> BookingResult<Vec<Booking>>;

    /// Bookings of any status with a date in `from..=to`.
    async fn mentor_bookings(
        &self,
        mentor_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> BookingResult<Vec<Booking>>;

    async fn student_bookings(&self, student_id: Uuid) -> BookingResult<Vec<Booking>>;

    async fn get_booking(&self, id: Uuid) -> BookingResult<Option<Booking>>;

    async fn insert_booking(&self, booking: NewBooking) -> BookingResult<Booking>;

    /// Moves booking `id` from `from` to `to` in one conditional write.
    ///
    /// Returns `None` when no booking with that id is currently in `from`,
    /// either because it does not exist or because another writer changed it.
    async fn update_booking_status(
        &self,
        id: Uuid,
        from: BookingStatus,
        to: BookingStatus,
    ) -> BookingResult<Option<Booking>>;
}
