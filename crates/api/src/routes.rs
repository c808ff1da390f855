pub mod appointments;
pub mod health;
pub mod service_types;
