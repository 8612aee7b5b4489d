use crate::models::{DbAvailabilityRule, DbBlockedDate};
use chrono::{NaiveDate, NaiveTime, Utc};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_rule(
    pool: &Pool<Postgres>,
    mentor_id: Uuid,
    day_of_week: Option<i16>,
    specific_date: Option<NaiveDate>,
    start_time: NaiveTime,
    end_time: NaiveTime,
) -> Result<DbAvailabilityRule> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating availability rule: id={}, mentor_id={}, day_of_week={:?}, specific_date={:?}",
        id, mentor_id, day_of_week, specific_date
    );

    let rule = sqlx::query_as::<_, DbAvailabilityRule>(
        r#"
        INSERT INTO availability_rules (id, mentor_id, day_of_week, specific_date, start_time, end_time, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, mentor_id, day_of_week, specific_date, start_time, end_time, created_at
        "#,
    )
    .bind(id)
    .bind(mentor_id)
    .bind(day_of_week)
    .bind(specific_date)
    .bind(start_time)
    .bind(end_time)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(rule)
}

pub async fn get_rules_by_mentor_id(
    pool: &Pool<Postgres>,
    mentor_id: Uuid,
) -> Result<Vec<DbAvailabilityRule>> {
    let rules = sqlx::query_as::<_, DbAvailabilityRule>(
        r#"
        SELECT id, mentor_id, day_of_week, specific_date, start_time, end_time, created_at
        FROM availability_rules
        WHERE mentor_id = $1
        ORDER BY day_of_week ASC NULLS LAST, specific_date ASC NULLS LAST, start_time ASC
        "#,
    )
    .bind(mentor_id)
    .fetch_all(pool)
    .await?;

    Ok(rules)
}

pub async fn delete_rule(pool: &Pool<Postgres>, mentor_id: Uuid, rule_id: Uuid) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM availability_rules
        WHERE id = $1 AND mentor_id = $2
        "#,
    )
    .bind(rule_id)
    .bind(mentor_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Blocking an already blocked date replaces its reason.
pub async fn create_blocked_date(
    pool: &Pool<Postgres>,
    mentor_id: Uuid,
    date: NaiveDate,
    reason: Option<&str>,
) -> Result<DbBlockedDate> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let blocked = sqlx::query_as::<_, DbBlockedDate>(
        r#"
        INSERT INTO blocked_dates (id, mentor_id, blocked_date, reason, created_at)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (mentor_id, blocked_date) DO UPDATE SET reason = EXCLUDED.reason
        RETURNING id, mentor_id, blocked_date, reason, created_at
        "#,
    )
    .bind(id)
    .bind(mentor_id)
    .bind(date)
    .bind(reason)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(blocked)
}

pub async fn get_blocked_dates_in_range(
    pool: &Pool<Postgres>,
    mentor_id: Uuid,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<DbBlockedDate>> {
    let blocked = sqlx::query_as::<_, DbBlockedDate>(
        r#"
        SELECT id, mentor_id, blocked_date, reason, created_at
        FROM blocked_dates
        WHERE mentor_id = $1 AND blocked_date BETWEEN $2 AND $3
        ORDER BY blocked_date ASC
        "#,
    )
    .bind(mentor_id)
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await?;

    Ok(blocked)
}

pub async fn delete_blocked_date(
    pool: &Pool<Postgres>,
    mentor_id: Uuid,
    blocked_id: Uuid,
) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM blocked_dates
        WHERE id = $1 AND mentor_id = $2
        "#,
    )
    .bind(blocked_id)
    .bind(mentor_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
