use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use shopdesk_core::{
    errors::StoreError,
    models::appointment::{Appointment, AppointmentStatus, NewAppointment},
    store::AppointmentStore,
};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

/// [`AppointmentStore`] kept in process memory.
///
/// Applies the same row constraints as the database schema. Used by tests
/// and by the server when no database is configured.
#[derive(Debug, Default)]
pub struct InMemoryAppointmentStore {
    appointments: RwLock<Vec<Appointment>>,
}

impl InMemoryAppointmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_appointments(appointments: Vec<Appointment>) -> Self {
        Self {
            appointments: RwLock::new(appointments),
        }
    }

    pub async fn len(&self) -> usize {
        self.appointments.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.appointments.read().await.is_empty()
    }
}

#[async_trait]
impl AppointmentStore for InMemoryAppointmentStore {
    async fn query_by_date(&self, date: NaiveDate) -> Result<Vec<Appointment>, StoreError> {
        let mut found: Vec<Appointment> = self
            .appointments
            .read()
            .await
            .iter()
            .filter(|appointment| appointment.date() == date)
            .cloned()
            .collect();
        found.sort_by_key(|appointment| appointment.start_time);
        Ok(found)
    }

    async fn insert(&self, appointment: NewAppointment) -> Result<Appointment, StoreError> {
        if appointment.duration == 0 {
            return Err(StoreError::ConstraintViolation(
                "duration must be positive".to_string(),
            ));
        }
        if appointment.vehicle_id.is_empty() {
            return Err(StoreError::ConstraintViolation(
                "vehicle_id must not be empty".to_string(),
            ));
        }

        let stored = Appointment {
            id: Uuid::new_v4(),
            vehicle_id: appointment.vehicle_id,
            service_type: appointment.service_type,
            start_time: appointment.start_time,
            duration: appointment.duration,
            status: appointment.status,
            created_at: Utc::now(),
        };
        self.appointments.write().await.push(stored.clone());
        debug!(id = %stored.id, "Stored appointment in memory");

        Ok(stored)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Appointment>, StoreError> {
        Ok(self
            .appointments
            .read()
            .await
            .iter()
            .find(|appointment| appointment.id == id)
            .cloned())
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: AppointmentStatus,
    ) -> Result<Option<Appointment>, StoreError> {
        let mut appointments = self.appointments.write().await;
        Ok(appointments
            .iter_mut()
            .find(|appointment| appointment.id == id)
            .map(|appointment| {
                appointment.status = status;
                appointment.clone()
            }))
    }
}
