//! # Booking Service
//!
//! Glue between the pure [`resolver`](crate::resolver) and a [`BookingStore`].
//! Each call fetches a fresh snapshot from the store, so slot lists and
//! conflict checks always reflect the latest written bookings.
//!
//! Booking creation re-validates against confirmed bookings right before the
//! insert. That shrinks the race window between check and write but cannot
//! close it; the store must reject an overlapping confirmed write with
//! `BookingError::Conflict`.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::clock::Clock;
use crate::errors::{BookingError, BookingResult};
use crate::models::availability::{
    AvailabilityRule, BlockDateRequest, BlockedDate, CreateRuleRequest, NewAvailabilityRule,
};
use crate::models::booking::{Booking, BookingStatus, CreateBookingRequest, NewBooking};
use crate::models::time_slot::{DaySlots, TimeSlot};
use crate::resolver;
use crate::store::BookingStore;
use crate::time::{parse_date, parse_time_of_day, validate_duration};

/// Behaviour switches for [`BookingService`].
#[derive(Debug, Clone, Copy)]
pub struct ServiceSettings {
    /// Create bookings directly as `Confirmed` instead of `Pending`.
    pub auto_confirm: bool,
    /// Longest date range a single slot query may cover.
    pub max_range_days: i64,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            auto_confirm: true,
            max_range_days: 31,
        }
    }
}

#[derive(Clone)]
pub struct BookingService {
    store: Arc<dyn BookingStore>,
    clock: Arc<dyn Clock>,
    settings: ServiceSettings,
}

impl BookingService {
    pub fn new(store: Arc<dyn BookingStore>, clock: Arc<dyn Clock>, settings: ServiceSettings) -> Self {
        Self {
            store,
            clock,
            settings,
        }
    }

    pub fn settings(&self) -> ServiceSettings {
        self.settings
    }

    pub async fn available_slots(
        &self,
        mentor_id: Uuid,
        date: NaiveDate,
        duration_minutes: i64,
    ) -> BookingResult<Vec<TimeSlot>> {
        validate_duration(duration_minutes)?;

        let rules = self.store.availability_rules(mentor_id).await?;
        let blocked = self.store.blocked_dates(mentor_id, date, date).await?;
        let bookings = self.store.confirmed_bookings(mentor_id, date, date).await?;

        resolver::compute_slots(
            mentor_id,
            date,
            duration_minutes,
            &rules,
            &blocked,
            &bookings,
            self.clock.now(),
        )
    }

    pub async fn available_slots_in_range(
        &self,
        mentor_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
        duration_minutes: i64,
    ) -> BookingResult<Vec<DaySlots>> {
        validate_duration(duration_minutes)?;
        resolver::validate_range(from, to, self.settings.max_range_days)?;

        let rules = self.store.availability_rules(mentor_id).await?;
        let blocked = self.store.blocked_dates(mentor_id, from, to).await?;
        let bookings = self.store.confirmed_bookings(mentor_id, from, to).await?;

        resolver::compute_slots_for_range(
            mentor_id,
            from,
            to,
            duration_minutes,
            &rules,
            &blocked,
            &bookings,
            self.clock.now(),
            self.settings.max_range_days,
        )
    }

    /// Books a slot that is currently offered and free.
    ///
    /// # Errors
    ///
    /// * `BookingError::InvalidInput` - malformed input, or the start time is
    ///   not one of the offered slots (blocked day, outside every rule, or past)
    /// * `BookingError::Conflict` - the slot overlaps a confirmed booking, either
    ///   at check time or when the store rejects the write
    /// * `BookingError::Upstream` - the store failed
    pub async fn create_booking(&self, request: CreateBookingRequest) -> BookingResult<Booking> {
        let date = parse_date(&request.date)?;
        let start_time = parse_time_of_day(&request.start_time)?;
        validate_duration(request.duration_minutes)?;

        let rules = self.store.availability_rules(request.mentor_id).await?;
        let blocked = self
            .store
            .blocked_dates(request.mentor_id, date, date)
            .await?;
        let confirmed = self
            .store
            .confirmed_bookings(request.mentor_id, date, date)
            .await?;

        let slots = resolver::compute_slots(
            request.mentor_id,
            date,
            request.duration_minutes,
            &rules,
            &blocked,
            &confirmed,
            self.clock.now(),
        )?;

        match slots.iter().find(|slot| slot.start_time == start_time) {
            Some(slot) if slot.available => {}
            Some(_) => {
                warn!(
                    "Rejected booking for mentor {} on {} at {}: slot taken",
                    request.mentor_id, date, start_time
                );
                return Err(BookingError::Conflict(format!(
                    "{} {} is already booked",
                    date,
                    start_time.format("%H:%M")
                )));
            }
            None => {
                return Err(BookingError::InvalidInput(format!(
                    "{} {} is not an offered slot for a {} minute session",
                    date,
                    start_time.format("%H:%M"),
                    request.duration_minutes
                )));
            }
        }

        resolver::validate_booking(
            request.mentor_id,
            date,
            start_time,
            request.duration_minutes,
            &confirmed,
        )?;

        let status = if self.settings.auto_confirm {
            BookingStatus::Confirmed
        } else {
            BookingStatus::Pending
        };

        let booking = self
            .store
            .insert_booking(NewBooking {
                mentor_id: request.mentor_id,
                student_id: request.student_id,
                date,
                start_time,
                duration_minutes: request.duration_minutes,
                status,
            })
            .await
            .inspect_err(|e| {
                if let BookingError::Conflict(_) = e {
                    warn!(
                        "Store rejected overlapping booking for mentor {} on {} at {}",
                        request.mentor_id, date, start_time
                    );
                }
            })?;

        info!(
            "Created {} booking {} for mentor {} on {} at {}",
            booking.status, booking.id, booking.mentor_id, booking.date, booking.start_time
        );
        Ok(booking)
    }

    pub async fn get_booking(&self, id: Uuid) -> BookingResult<Booking> {
        self.store
            .get_booking(id)
            .await?
            .ok_or_else(|| BookingError::NotFound(format!("Booking with ID {} not found", id)))
    }

    /// Moves a booking along the status state machine.
    ///
    /// Confirming a pending booking re-checks it against the confirmed bookings
    /// for its date first. The write only applies if the booking is still in
    /// the status that was read; otherwise the call fails with
    /// `BookingError::InvalidTransition` from the status it has now.
    pub async fn transition_booking(&self, id: Uuid, target: BookingStatus) -> BookingResult<Booking> {
        let booking = self.get_booking(id).await?;
        let next = booking.status.transition(target)?;

        if next.occupies_slot() && !booking.status.occupies_slot() {
            let confirmed = self
                .store
                .confirmed_bookings(booking.mentor_id, booking.date, booking.date)
                .await?;
            let others: Vec<Booking> = confirmed.into_iter().filter(|b| b.id != booking.id).collect();
            resolver::validate_booking(
                booking.mentor_id,
                booking.date,
                booking.start_time,
                booking.duration_minutes,
                &others,
            )?;
        }

        let Some(updated) = self
            .store
            .update_booking_status(id, booking.status, next)
            .await?
        else {
            // Another request moved the booking between our read and write
            let current = self.get_booking(id).await?;
            warn!(
                "Booking {} changed to {} before it could move from {} to {}",
                id, current.status, booking.status, next
            );
            return Err(BookingError::InvalidTransition {
                from: current.status,
                to: next,
            });
        };
        info!("Booking {} moved from {} to {}", id, booking.status, updated.status);
        Ok(updated)
    }

    pub async fn confirm_booking(&self, id: Uuid) -> BookingResult<Booking> {
        self.transition_booking(id, BookingStatus::Confirmed).await
    }

    pub async fn decline_booking(&self, id: Uuid) -> BookingResult<Booking> {
        self.transition_booking(id, BookingStatus::Declined).await
    }

    pub async fn cancel_booking(&self, id: Uuid) -> BookingResult<Booking> {
        self.transition_booking(id, BookingStatus::Cancelled).await
    }

    pub async fn complete_booking(&self, id: Uuid) -> BookingResult<Booking> {
        self.transition_booking(id, BookingStatus::Completed).await
    }

    pub async fn mentor_bookings(
        &self,
        mentor_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> BookingResult<Vec<Booking>> {
        resolver::validate_range(from, to, self.settings.max_range_days)?;
        self.store.mentor_bookings(mentor_id, from, to).await
    }

    pub async fn student_bookings(&self, student_id: Uuid) -> BookingResult<Vec<Booking>> {
        self.store.student_bookings(student_id).await
    }

    pub async fn list_rules(&self, mentor_id: Uuid) -> BookingResult<Vec<AvailabilityRule>> {
        self.store.availability_rules(mentor_id).await
    }

    pub async fn add_rule(
        &self,
        mentor_id: Uuid,
        request: CreateRuleRequest,
    ) -> BookingResult<AvailabilityRule> {
        let rule = NewAvailabilityRule {
            mentor_id,
            kind: request.kind,
            start_time: parse_time_of_day(&request.start_time)?,
            end_time: parse_time_of_day(&request.end_time)?,
        };
        rule.validate()?;

        let rule = self.store.insert_availability_rule(rule).await?;
        debug!("Added availability rule {} for mentor {}", rule.id, mentor_id);
        Ok(rule)
    }

    pub async fn delete_rule(&self, mentor_id: Uuid, rule_id: Uuid) -> BookingResult<()> {
        if self.store.delete_availability_rule(mentor_id, rule_id).await? {
            Ok(())
        } else {
            Err(BookingError::NotFound(format!(
                "Availability rule with ID {} not found",
                rule_id
            )))
        }
    }

    pub async fn list_blocked_dates(
        &self,
        mentor_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> BookingResult<Vec<BlockedDate>> {
        if to < from {
            return Err(BookingError::InvalidInput(format!(
                "Range end {} is before range start {}",
                to, from
            )));
        }
        self.store.blocked_dates(mentor_id, from, to).await
    }

    pub async fn block_date(
        &self,
        mentor_id: Uuid,
        request: BlockDateRequest,
    ) -> BookingResult<BlockedDate> {
        let date = parse_date(&request.date)?;
        let blocked = self
            .store
            .insert_blocked_date(mentor_id, date, request.reason)
            .await?;
        info!("Blocked {} for mentor {}", date, mentor_id);
        Ok(blocked)
    }

    pub async fn unblock_date(&self, mentor_id: Uuid, blocked_id: Uuid) -> BookingResult<()> {
        if self.store.delete_blocked_date(mentor_id, blocked_id).await? {
            Ok(())
        } else {
            Err(BookingError::NotFound(format!(
                "Blocked date with ID {} not found",
                blocked_id
            )))
        }
    }
}
