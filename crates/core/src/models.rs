pub mod appointment;
pub mod service_type;
pub mod time_slot;
