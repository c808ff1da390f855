use async_trait::async_trait;
use chrono::NaiveDate;
use eyre::Report;
use shopdesk_core::{
    errors::StoreError,
    models::appointment::{Appointment, AppointmentStatus, NewAppointment},
    store::AppointmentStore,
};
use sqlx::error::ErrorKind;
use tracing::error;
use uuid::Uuid;

use crate::{DbPool, repositories::appointment as repo};

/// [`AppointmentStore`] backed by PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgAppointmentStore {
    pool: DbPool,
}

impl PgAppointmentStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

/// Constraint failures are reported as such; anything else means the
/// database could not be reached or could not answer.
pub fn classify(report: Report) -> StoreError {
    if let Some(sqlx::Error::Database(db_error)) = report.downcast_ref::<sqlx::Error>() {
        match db_error.kind() {
            ErrorKind::UniqueViolation
            | ErrorKind::ForeignKeyViolation
            | ErrorKind::NotNullViolation
            | ErrorKind::CheckViolation => {
                return StoreError::ConstraintViolation(db_error.message().to_string());
            }
            _ => {}
        }
    }

    error!("Appointment store error: {:?}", report);
    StoreError::Unavailable(report)
}

fn into_appointments(rows: Vec<crate::models::DbAppointment>) -> Result<Vec<Appointment>, StoreError> {
    rows.into_iter()
        .map(|row| Appointment::try_from(row).map_err(StoreError::Unavailable))
        .collect()
}

#[async_trait]
impl AppointmentStore for PgAppointmentStore {
    async fn query_by_date(&self, date: NaiveDate) -> Result<Vec<Appointment>, StoreError> {
        let rows = repo::get_appointments_by_date(&self.pool, date)
            .await
            .map_err(classify)?;
        into_appointments(rows)
    }

    async fn insert(&self, appointment: NewAppointment) -> Result<Appointment, StoreError> {
        let duration = i32::try_from(appointment.duration).map_err(|_| {
            StoreError::ConstraintViolation(format!(
                "duration of {} minutes is out of range",
                appointment.duration
            ))
        })?;

        let row = repo::create_appointment(&self.pool, &appointment, duration)
            .await
            .map_err(classify)?;
        Appointment::try_from(row).map_err(StoreError::Unavailable)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Appointment>, StoreError> {
        repo::get_appointment_by_id(&self.pool, id)
            .await
            .map_err(classify)?
            .map(|row| Appointment::try_from(row).map_err(StoreError::Unavailable))
            .transpose()
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: AppointmentStatus,
    ) -> Result<Option<Appointment>, StoreError> {
        repo::update_appointment_status(&self.pool, id, status)
            .await
            .map_err(classify)?
            .map(|row| Appointment::try_from(row).map_err(StoreError::Unavailable))
            .transpose()
    }
}
