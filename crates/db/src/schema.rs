use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // `service_date` is kept alongside `start_time` so a day's bookings can be
    // fetched with an exact match on the date.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS appointments (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            vehicle_id VARCHAR(255) NOT NULL,
            service_type VARCHAR(64) NOT NULL,
            start_time TIMESTAMP NOT NULL,
            service_date DATE NOT NULL,
            duration INTEGER NOT NULL,
            status VARCHAR(32) NOT NULL DEFAULT 'scheduled',
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT positive_duration CHECK (duration > 0),
            CONSTRAINT service_date_matches_start CHECK (service_date = start_time::date),
            CONSTRAINT valid_status CHECK (status IN ('scheduled', 'in-progress', 'completed'))
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_appointments_service_date ON appointments(service_date);
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}
