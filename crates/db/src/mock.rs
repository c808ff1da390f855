use async_trait::async_trait;
use chrono::NaiveDate;
use mockall::mock;
use shopdesk_core::{
    errors::StoreError,
    models::appointment::{Appointment, AppointmentStatus, NewAppointment},
    store::AppointmentStore as Store,
};
use uuid::Uuid;

// Mock store for interaction tests
mock! {
    pub AppointmentStore {}

    #[async_trait]
    impl Store for AppointmentStore {
        async fn query_by_date(&self, date: NaiveDate) -> Result<Vec<Appointment>, StoreError>;

        async fn insert(&self, appointment: NewAppointment) -> Result<Appointment, StoreError>;

        async fn find_by_id(&self, id: Uuid) -> Result<Option<Appointment>, StoreError>;

        async fn update_status(
            &self,
            id: Uuid,
            status: AppointmentStatus,
        ) -> Result<Option<Appointment>, StoreError>;
    }
}
