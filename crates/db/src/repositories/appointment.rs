use crate::models::DbAppointment;
use chrono::{NaiveDate, Utc};
use eyre::Result;
use shopdesk_core::models::appointment::{AppointmentStatus, NewAppointment};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_appointment(
    pool: &Pool<Postgres>,
    appointment: &NewAppointment,
    duration: i32,
) -> Result<DbAppointment> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let row = sqlx::query_as::<_, DbAppointment>(
        r#"
        INSERT INTO appointments (id, vehicle_id, service_type, start_time, service_date, duration, status, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING id, vehicle_id, service_type, start_time, service_date, duration, status, created_at
        "#,
    )
    .bind(id)
    .bind(&appointment.vehicle_id)
    .bind(appointment.service_type.id())
    .bind(appointment.start_time)
    .bind(appointment.start_time.date())
    .bind(duration)
    .bind(appointment.status.as_str())
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

pub async fn get_appointments_by_date(
    pool: &Pool<Postgres>,
    date: NaiveDate,
) -> Result<Vec<DbAppointment>> {
    let rows = sqlx::query_as::<_, DbAppointment>(
        r#"
        SELECT id, vehicle_id, service_type, start_time, service_date, duration, status, created_at
        FROM appointments
        WHERE service_date = $1
        ORDER BY start_time ASC
        "#,
    )
    .bind(date)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn get_appointment_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbAppointment>> {
    let row = sqlx::query_as::<_, DbAppointment>(
        r#"
        SELECT id, vehicle_id, service_type, start_time, service_date, duration, status, created_at
        FROM appointments
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn update_appointment_status(
    pool: &Pool<Postgres>,
    id: Uuid,
    status: AppointmentStatus,
) -> Result<Option<DbAppointment>> {
    let row = sqlx::query_as::<_, DbAppointment>(
        r#"
        UPDATE appointments
        SET status = $2
        WHERE id = $1
        RETURNING id, vehicle_id, service_type, start_time, service_date, duration, status, created_at
        "#,
    )
    .bind(id)
    .bind(status.as_str())
    .fetch_optional(pool)
    .await?;

    Ok(row)
}
