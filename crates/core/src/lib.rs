//! # MentorBook Core
//!
//! Domain types and the availability/booking conflict model for the MentorBook
//! scheduling service.
//!
//! The [`resolver`] module is pure: it turns availability rules, blocked dates
//! and confirmed bookings into bookable slots, and re-checks a proposed booking
//! against the same snapshot. Everything that touches storage goes through the
//! [`store::BookingStore`] trait and is orchestrated by [`service::BookingService`].

pub mod clock;
pub mod errors;
pub mod models;
pub mod resolver;
pub mod service;
pub mod store;
pub mod time;
