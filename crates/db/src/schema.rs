use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

/// Statements are idempotent and run in order.
const SCHEMA: &[&str] = &[
    // Needed for `mentor_id WITH =` inside a gist exclusion constraint
    "CREATE EXTENSION IF NOT EXISTS btree_gist",
    r#"
    CREATE TABLE IF NOT EXISTS availability_rules (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        mentor_id UUID NOT NULL,
        day_of_week SMALLINT NULL,
        specific_date DATE NULL,
        start_time TIME NOT NULL,
        end_time TIME NOT NULL,
        created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
        CONSTRAINT rule_kind CHECK ((day_of_week IS NULL) <> (specific_date IS NULL)),
        CONSTRAINT valid_day_of_week CHECK (day_of_week BETWEEN 0 AND 6),
        CONSTRAINT valid_window CHECK (end_time > start_time)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS blocked_dates (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        mentor_id UUID NOT NULL,
        blocked_date DATE NOT NULL,
        reason TEXT NULL,
        created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
        CONSTRAINT one_block_per_day UNIQUE (mentor_id, blocked_date)
    )
    "#,
    // Confirmed bookings of one mentor never overlap. Of two concurrent
    // confirmed writes for the same time, the second fails with 23P01.
    r#"
    CREATE TABLE IF NOT EXISTS bookings (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        mentor_id UUID NOT NULL,
        student_id UUID NOT NULL,
        booking_date DATE NOT NULL,
        start_time TIME NOT NULL,
        duration_minutes INTEGER NOT NULL,
        status VARCHAR(16) NOT NULL,
        created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
        CONSTRAINT positive_duration CHECK (duration_minutes > 0),
        CONSTRAINT valid_status CHECK (
            status IN ('pending', 'confirmed', 'cancelled', 'declined', 'completed')
        ),
        CONSTRAINT no_overlapping_confirmed EXCLUDE USING gist (
            mentor_id WITH =,
            tsrange(
                booking_date + start_time,
                booking_date + start_time + duration_minutes * INTERVAL '1 minute',
                '[)'
            ) WITH &&
        ) WHERE (status = 'confirmed')
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_availability_rules_mentor_id ON availability_rules(mentor_id)",
    "CREATE INDEX IF NOT EXISTS idx_blocked_dates_mentor_date ON blocked_dates(mentor_id, blocked_date)",
    "CREATE INDEX IF NOT EXISTS idx_bookings_mentor_date ON bookings(mentor_id, booking_date)",
    "CREATE INDEX IF NOT EXISTS idx_bookings_student_id ON bookings(student_id)",
];

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
