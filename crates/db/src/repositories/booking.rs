use crate::models::DbBooking;
use chrono::{NaiveDate, NaiveTime, Utc};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

const EXCLUSION_VIOLATION: &str = "23P01";
const UNIQUE_VIOLATION: &str = "23505";

pub async fn create_booking(
    pool: &Pool<Postgres>,
    mentor_id: Uuid,
    student_id: Uuid,
    date: NaiveDate,
    start_time: NaiveTime,
    duration_minutes: i32,
    status: &str,
) -> Result<DbBooking> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating booking: id={}, mentor_id={}, date={}, start_time={}, status={}",
        id, mentor_id, date, start_time, status
    );

    let booking = sqlx::query_as::<_, DbBooking>(
        r#"
        INSERT INTO bookings (id, mentor_id, student_id, booking_date, start_time, duration_minutes, status, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
        RETURNING id, mentor_id, student_id, booking_date, start_time, duration_minutes, status, created_at
        "#,
    )
    .bind(id)
    .bind(mentor_id)
    .bind(student_id)
    .bind(date)
    .bind(start_time)
    .bind(duration_minutes)
    .bind(status)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(booking)
}

pub async fn get_booking_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbBooking>> {
    let booking = sqlx::query_as::<_, DbBooking>(
        r#"
        SELECT id, mentor_id, student_id, booking_date, start_time, duration_minutes, status, created_at
        FROM bookings
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(booking)
}

/// `status` of `None` returns bookings in every status.
pub async fn get_bookings_for_mentor(
    pool: &Pool<Postgres>,
    mentor_id: Uuid,
    from: NaiveDate,
    to: NaiveDate,
    status: Option<&str>,
) -> Result<Vec<DbBooking>> {
    let bookings = sqlx::query_as::<_, DbBooking>(
        r#"
        SELECT id, mentor_id, student_id, booking_date, start_time, duration_minutes, status, created_at
        FROM bookings
        WHERE mentor_id = $1
          AND booking_date BETWEEN $2 AND $3
          AND ($4::VARCHAR IS NULL OR status = $4)
        ORDER BY booking_date ASC, start_time ASC
        "#,
    )
    .bind(mentor_id)
    .bind(from)
    .bind(to)
    .bind(status)
    .fetch_all(pool)
    .await?;

    Ok(bookings)
}

pub async fn get_bookings_for_student(
    pool: &Pool<Postgres>,
    student_id: Uuid,
) -> Result<Vec<DbBooking>> {
    let bookings = sqlx::query_as::<_, DbBooking>(
        r#"
        SELECT id, mentor_id, student_id, booking_date, start_time, duration_minutes, status, created_at
        FROM bookings
        WHERE student_id = $1
        ORDER BY booking_date ASC, start_time ASC
        "#,
    )
    .bind(student_id)
    .fetch_all(pool)
    .await?;

    Ok(bookings)
}

/// Only updates a booking that is still in `from`. `None` means no row matched.
pub async fn update_booking_status(
    pool: &Pool<Postgres>,
    id: Uuid,
    from: &str,
    to: &str,
) -> Result<Option<DbBooking>> {
    tracing::debug!("Updating booking {}: {} -> {}", id, from, to);

    let booking = sqlx::query_as::<_, DbBooking>(
        r#"
        UPDATE bookings
        SET status = $2, updated_at = NOW()
        WHERE id = $1 AND status = $3
        RETURNING id, mentor_id, student_id, booking_date, start_time, duration_minutes, status, created_at
        "#,
    )
    .bind(id)
    .bind(to)
    .bind(from)
    .fetch_optional(pool)
    .await?;

    Ok(booking)
}

/// True when a write was rejected because it would overlap a confirmed booking.
pub fn is_booking_conflict(err: &eyre::Report) -> bool {
    err.downcast_ref::<sqlx::Error>()
        .and_then(|e| e.as_database_error())
        .and_then(|e| e.code())
        .is_some_and(|code| code == EXCLUSION_VIOLATION || code == UNIQUE_VIOLATION)
}
