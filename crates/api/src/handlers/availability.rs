//! # Availability Handlers
//!
//! Slot queries for students and availability settings for mentors.
//!
//! Slot lists are computed on every request from the current rules, blocked
//! dates and confirmed bookings. Nothing is cached between requests, so a
//! cancellation frees its slot for the very next query.

use axum::{extract::State, http::StatusCode};
use serde::Deserialize;
use std::sync::Arc;
use mentorbook_core::{
    models::{
        availability::{AvailabilityRule, BlockDateRequest, BlockedDate, CreateRuleRequest},
        time_slot::{SlotRangeResponse, SlotsResponse},
    },
    time::parse_date,
};
use uuid::Uuid;

use crate::{
    extract::{Json, Path, Query},
    middleware::error_handling::AppError,
    ApiState,
};

/// Query parameters for a single-day slot lookup
#[derive(Debug, Deserialize)]
pub struct SlotsQuery {
    /// Calendar date in `YYYY-MM-DD` format
    pub date: String,

    /// Desired session length in minutes
    pub duration_minutes: i64,
}

/// Query parameters for a multi-day slot lookup
#[derive(Debug, Deserialize)]
pub struct SlotRangeQuery {
    /// First day, `YYYY-MM-DD`, inclusive
    pub from: String,

    /// Last day, `YYYY-MM-DD`, inclusive
    pub to: String,

    /// Desired session length in minutes
    pub duration_minutes: i64,
}

/// Inclusive date window for listings. Both ends are required.
#[derive(Debug, Deserialize)]
pub struct DateWindowQuery {
    pub from: String,
    pub to: String,
}

/// Returns the bookable slots for one mentor on one day
///
/// # Endpoint
///
/// ```text
/// GET /api/mentors/:mentor_id/slots?date=2025-01-06&duration_minutes=60
/// ```
///
/// # Errors
///
/// * `BookingError::InvalidInput` - malformed date or non-positive duration
/// * `BookingError::Upstream` - the store failed
#[axum::debug_handler]
pub async fn get_slots(
    State(state): State<Arc<ApiState>>,
    Path(mentor_id): Path<Uuid>,
    Query(query): Query<SlotsQuery>,
) -> Result<Json<SlotsResponse>, AppError> {
    let date = parse_date(&query.date)?;

    let slots = state
        .service
        .available_slots(mentor_id, date, query.duration_minutes)
        .await?;

    Ok(Json(SlotsResponse {
        mentor_id,
        date,
        duration_minutes: query.duration_minutes,
        slots,
    }))
}

/// Returns the bookable slots for every day of a date range
///
/// ```text
/// GET /api/mentors/:mentor_id/slots/range?from=2025-01-06&to=2025-01-12&duration_minutes=60
/// ```
#[axum::debug_handler]
pub async fn get_slot_range(
    State(state): State<Arc<ApiState>>,
    Path(mentor_id): Path<Uuid>,
    Query(query): Query<SlotRangeQuery>,
) -> Result<Json<SlotRangeResponse>, AppError> {
    let from = parse_date(&query.from)?;
    let to = parse_date(&query.to)?;

    let days = state
        .service
        .available_slots_in_range(mentor_id, from, to, query.duration_minutes)
        .await?;

    Ok(Json(SlotRangeResponse {
        mentor_id,
        duration_minutes: query.duration_minutes,
        days,
    }))
}

#[axum::debug_handler]
pub async fn list_rules(
    State(state): State<Arc<ApiState>>,
    Path(mentor_id): Path<Uuid>,
) -> Result<Json<Vec<AvailabilityRule>>, AppError> {
    let rules = state.service.list_rules(mentor_id).await?;
    Ok(Json(rules))
}

#[axum::debug_handler]
pub async fn create_rule(
    State(state): State<Arc<ApiState>>,
    Path(mentor_id): Path<Uuid>,
    Json(payload): Json<CreateRuleRequest>,
) -> Result<(StatusCode, Json<AvailabilityRule>), AppError> {
    let rule = state.service.add_rule(mentor_id, payload).await?;
    Ok((StatusCode::CREATED, Json(rule)))
}

#[axum::debug_handler]
pub async fn delete_rule(
    State(state): State<Arc<ApiState>>,
    Path((mentor_id, rule_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, AppError> {
    state.service.delete_rule(mentor_id, rule_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn list_blocked_dates(
    State(state): State<Arc<ApiState>>,
    Path(mentor_id): Path<Uuid>,
    Query(query): Query<DateWindowQuery>,
) -> Result<Json<Vec<BlockedDate>>, AppError> {
    let from = parse_date(&query.from)?;
    let to = parse_date(&query.to)?;

    let blocked = state.service.list_blocked_dates(mentor_id, from, to).await?;
    Ok(Json(blocked))
}

#[axum::debug_handler]
pub async fn block_date(
    State(state): State<Arc<ApiState>>,
    Path(mentor_id): Path<Uuid>,
    Json(payload): Json<BlockDateRequest>,
) -> Result<(StatusCode, Json<BlockedDate>), AppError> {
    let blocked = state.service.block_date(mentor_id, payload).await?;
    Ok((StatusCode::CREATED, Json(blocked)))
}

#[axum::debug_handler]
pub async fn unblock_date(
    State(state): State<Arc<ApiState>>,
    Path((mentor_id, blocked_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, AppError> {
    state.service.unblock_date(mentor_id, blocked_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
