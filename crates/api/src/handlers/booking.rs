use axum::{extract::State, http::StatusCode};
use std::sync::Arc;
use mentorbook_core::{
    models::booking::{BookingResponse, CreateBookingRequest},
    time::parse_date,
};
use uuid::Uuid;

use crate::{
    extract::{Json, Path, Query},
    handlers::availability::DateWindowQuery,
    middleware::error_handling::AppError,
    ApiState,
};

/// Books a slot
///
/// The slot must be one the mentor currently offers and no confirmed booking
/// may overlap it. A `409 Conflict` means the slot was taken since the client
/// last fetched slots; the client should re-query and offer fresh options.
#[axum::debug_handler]
pub async fn create_booking(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingResponse>), AppError> {
    let booking = state.service.create_booking(payload).await?;
    Ok((StatusCode::CREATED, Json(booking.into())))
}

#[axum::debug_handler]
pub async fn get_booking(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<BookingResponse>, AppError> {
    let booking = state.service.get_booking(id).await?;
    Ok(Json(booking.into()))
}

#[axum::debug_handler]
pub async fn confirm_booking(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<BookingResponse>, AppError> {
    let booking = state.service.confirm_booking(id).await?;
    Ok(Json(booking.into()))
}

#[axum::debug_handler]
pub async fn decline_booking(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<BookingResponse>, AppError> {
    let booking = state.service.decline_booking(id).await?;
    Ok(Json(booking.into()))
}

#[axum::debug_handler]
pub async fn cancel_booking(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<BookingResponse>, AppError> {
    let booking = state.service.cancel_booking(id).await?;
    Ok(Json(booking.into()))
}

#[axum::debug_handler]
pub async fn complete_booking(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<BookingResponse>, AppError> {
    let booking = state.service.complete_booking(id).await?;
    Ok(Json(booking.into()))
}

#[axum::debug_handler]
pub async fn list_mentor_bookings(
    State(state): State<Arc<ApiState>>,
    Path(mentor_id): Path<Uuid>,
    Query(query): Query<DateWindowQuery>,
) -> Result<Json<Vec<BookingResponse>>, AppError> {
    let from = parse_date(&query.from)?;
    let to = parse_date(&query.to)?;

    let bookings = state.service.mentor_bookings(mentor_id, from, to).await?;
    Ok(Json(bookings.into_iter().map(BookingResponse::from).collect()))
}

#[axum::debug_handler]
pub async fn list_student_bookings(
    State(state): State<Arc<ApiState>>,
    Path(student_id): Path<Uuid>,
) -> Result<Json<Vec<BookingResponse>>, AppError> {
    let bookings = state.service.student_bookings(student_id).await?;
    Ok(Json(bookings.into_iter().map(BookingResponse::from).collect()))
}
