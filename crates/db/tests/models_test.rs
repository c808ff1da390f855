use chrono::{NaiveDate, NaiveTime, Utc};
use pretty_assertions::assert_eq;
use shopdesk_core::{
    errors::StoreError,
    models::{
        appointment::{Appointment, AppointmentStatus},
        service_type::ServiceType,
    },
};
use shopdesk_db::{models::DbAppointment, store::classify};
use uuid::Uuid;

fn row(service_type: &str, duration: i32, status: &str) -> DbAppointment {
    let date = NaiveDate::from_ymd_opt(2031, 3, 4).unwrap();
    DbAppointment {
        id: Uuid::new_v4(),
        vehicle_id: "veh-9".to_string(),
        service_type: service_type.to_string(),
        start_time: date.and_time(NaiveTime::from_hms_opt(10, 30, 0).unwrap()),
        service_date: date,
        duration,
        status: status.to_string(),
        created_at: Utc::now(),
    }
}

#[test]
fn test_row_converts_to_appointment() {
    let db_row = row("diagnostic", 90, "in-progress");
    let id = db_row.id;

    let appointment = Appointment::try_from(db_row).expect("row should convert");

    assert_eq!(appointment.id, id);
    assert_eq!(appointment.service_type, ServiceType::Diagnostic);
    assert_eq!(appointment.duration, 90);
    assert_eq!(appointment.status, AppointmentStatus::InProgress);
}

#[test]
fn test_stored_duration_is_not_recomputed() {
    // The catalog says 120 minutes; the row keeps what was booked.
    let appointment = Appointment::try_from(row("maintenance", 150, "scheduled")).unwrap();

    assert_eq!(appointment.service_type, ServiceType::RegularMaintenance);
    assert_eq!(appointment.duration, 150);
}

#[test]
fn test_unknown_service_type_reads_as_other() {
    let appointment = Appointment::try_from(row("detailing", 60, "completed")).unwrap();
    assert_eq!(appointment.service_type, ServiceType::Other);
}

#[test]
fn test_invalid_rows_fail_to_convert() {
    assert!(Appointment::try_from(row("repair", 180, "waiting")).is_err());
    assert!(Appointment::try_from(row("repair", -5, "scheduled")).is_err());
}

#[test]
fn test_non_database_errors_classify_as_unavailable() {
    let error = classify(eyre::eyre!("pool timed out while waiting for an open connection"));

    assert!(matches!(error, StoreError::Unavailable(_)));
}
