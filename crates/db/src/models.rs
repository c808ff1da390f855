use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use eyre::{Report, WrapErr, eyre};
use serde::{Deserialize, Serialize};
use shopdesk_core::models::{
    appointment::{Appointment, AppointmentStatus},
    service_type::ServiceType,
};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAppointment {
    pub id: Uuid,
    pub vehicle_id: String,
    pub service_type: String,
    pub start_time: NaiveDateTime,
    pub service_date: NaiveDate,
    pub duration: i32,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<DbAppointment> for Appointment {
    type Error = Report;

    fn try_from(row: DbAppointment) -> Result<Self, Self::Error> {
        let status: AppointmentStatus = row
            .status
            .parse()
            .wrap_err_with(|| format!("Appointment {} has an invalid status", row.id))?;
        let duration = u32::try_from(row.duration)
            .map_err(|_| eyre!("Appointment {} has a negative duration", row.id))?;

        Ok(Appointment {
            id: row.id,
            vehicle_id: row.vehicle_id,
            service_type: ServiceType::from_id(&row.service_type),
            start_time: row.start_time,
            duration,
            status,
            created_at: row.created_at,
        })
    }
}
