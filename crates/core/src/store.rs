use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    errors::StoreError,
    models::appointment::{Appointment, AppointmentStatus, NewAppointment},
};

/// Record store holding the shop's appointments.
///
/// Implementations serialize their own writes. No transaction spans a
/// query and a later insert.
#[async_trait]
pub trait AppointmentStore: Send + Sync {
    /// Appointments starting on `date`, ordered by start time.
    async fn query_by_date(&self, date: NaiveDate) -> Result<Vec<Appointment>, StoreError>;

    /// Persists a booking and returns it with its assigned id.
    async fn insert(&self, appointment: NewAppointment) -> Result<Appointment, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Appointment>, StoreError>;

    /// Returns `None` when no appointment has the given id.
    async fn update_status(
        &self,
        id: Uuid,
        status: AppointmentStatus,
    ) -> Result<Option<Appointment>, StoreError>;
}
