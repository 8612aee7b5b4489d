use async_trait::async_trait;
use chrono::NaiveDate;
use mockall::mock;
use mentorbook_core::errors::BookingResult;
use mentorbook_core::models::availability::{AvailabilityRule, BlockedDate, NewAvailabilityRule};
use mentorbook_core::models::booking::{Booking, BookingStatus, NewBooking};
use mentorbook_core::store::BookingStore;
use uuid::Uuid;

// Mock store for service and handler tests
mock! {
    pub Store {}

    #[async_trait]
    impl BookingStore for Store {
        async fn availability_rules(&self, mentor_id: Uuid) -> BookingResult<Vec<AvailabilityRule>>;

        async fn insert_availability_rule(
            &self,
            rule: NewAvailabilityRule,
        ) -> BookingResult<AvailabilityRule>;

        async fn delete_availability_rule(&self, mentor_id: Uuid, rule_id: Uuid) -> BookingResult<bool>;

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

        async fn confirmed_bookings(
            &self,
            mentor_id: Uuid,
            from: NaiveDate,
            to: NaiveDate,
        ) -> BookingResult<Vec<Booking>>;

        async fn mentor_bookings(
            &self,
            mentor_id: Uuid,
            from: NaiveDate,
            to: NaiveDate,
        ) -> BookingResult<Vec<Booking>>;

        async fn student_bookings(&self, student_id: Uuid) -> BookingResult<Vec<Booking>>;

        async fn get_booking(&self, id: Uuid) -> BookingResult<Option<Booking>>;

        async fn insert_booking(&self, booking: NewBooking) -> BookingResult<Booking>;

        async fn update_booking_status(
            &self,
            id: Uuid,
            from: BookingStatus,
            to: BookingStatus,
        ) -> BookingResult<Option<Booking>>;
    }
}
