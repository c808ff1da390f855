pub mod appointments;
pub mod service_types;
