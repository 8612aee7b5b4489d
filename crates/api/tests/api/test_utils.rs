use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Utc};
use mentorbook_api::ApiState;
use mentorbook_core::{
    clock::FixedClock,
    models::{
        availability::{AvailabilityRule, RuleKind},
        booking::{Booking, BookingStatus, NewBooking},
    },
    service::{BookingService, ServiceSettings},
};
use mentorbook_db::mock::repositories::MockStore;
use uuid::Uuid;

pub struct TestContext {
    pub store: MockStore,
    pub now: NaiveDateTime,
    pub settings: ServiceSettings,
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            store: MockStore::new(),
            now: NaiveDate::from_ymd_opt(2025, 1, 1)
                .unwrap()
                .and_time(time(8, 0)),
            settings: ServiceSettings::default(),
        }
    }

    // Build state around the mock store and a pinned clock
    pub fn build_state(self) -> Arc<ApiState> {
        let service = BookingService::new(
            Arc::new(self.store),
            Arc::new(FixedClock(self.now)),
            self.settings,
        );
        Arc::new(ApiState { service })
    }

    /// Mentor has `rules`, nothing blocked, and `confirmed` as its confirmed bookings.
    pub fn with_calendar(&mut self, rules: Vec<AvailabilityRule>, confirmed: Vec<Booking>) {
        self.store
            .expect_availability_rules()
            .returning(move |_| Ok(rules.clone()));
        self.store
            .expect_blocked_dates()
            .returning(|_, _, _| Ok(vec![]));
        self.store
            .expect_confirmed_bookings()
            .returning(move |_, _, _| Ok(confirmed.clone()));
    }
}

pub fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

/// 2025-01-06 is a Monday.
pub fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()
}

pub fn monday_rule(mentor_id: Uuid, start: NaiveTime, end: NaiveTime) -> AvailabilityRule {
    AvailabilityRule {
        id: Uuid::new_v4(),
        mentor_id,
        kind: RuleKind::Recurring { day_of_week: 1 },
        start_time: start,
        end_time: end,
    }
}

pub fn booking(
    mentor_id: Uuid,
    start: NaiveTime,
    duration_minutes: i64,
    status: BookingStatus,
) -> Booking {
    Booking {
        id: Uuid::new_v4(),
        mentor_id,
        student_id: Uuid::new_v4(),
        date: monday(),
        start_time: start,
        duration_minutes,
        status,
        created_at: Utc::now(),
    }
}

/// What a store hands back after persisting `new`.
pub fn stored(new: NewBooking) -> Booking {
    Booking {
        id: Uuid::new_v4(),
        mentor_id: new.mentor_id,
        student_id: new.student_id,
        date: new.date,
        start_time: new.start_time,
        duration_minutes: new.duration_minutes,
        status: new.status,
        created_at: Utc::now(),
    }
}
