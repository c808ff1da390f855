use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime, Utc};
use mockall::predicate;
use pretty_assertions::assert_eq;
use shopdesk_core::{
    availability::validate_booking,
    booking::{BookingService, DatePolicy},
    errors::{BookingField, Rejection, ShopError, StoreError},
    models::{
        appointment::{Appointment, AppointmentStatus, BookingCandidate, NewAppointment},
        service_type::ServiceType,
    },
    store::AppointmentStore,
};
use shopdesk_db::{InMemoryAppointmentStore, mock::MockAppointmentStore};
use uuid::Uuid;

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2031, 3, 3).unwrap()
}

fn tuesday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2031, 3, 4).unwrap()
}

fn at(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

fn existing(hour: u32, minute: u32, duration: u32) -> Appointment {
    Appointment {
        id: Uuid::new_v4(),
        vehicle_id: "veh-existing".to_string(),
        service_type: ServiceType::Other,
        start_time: tuesday().and_time(at(hour, minute)),
        duration,
        status: AppointmentStatus::Scheduled,
        created_at: Utc::now(),
    }
}

fn stored(booking: NewAppointment) -> Appointment {
    Appointment {
        id: Uuid::new_v4(),
        vehicle_id: booking.vehicle_id,
        service_type: booking.service_type,
        start_time: booking.start_time,
        duration: booking.duration,
        status: booking.status,
        created_at: Utc::now(),
    }
}

fn service_with(store: impl AppointmentStore + 'static) -> BookingService {
    BookingService::new(Arc::new(store), DatePolicy::default()).with_today(monday)
}

#[test_log::test(tokio::test)]
async fn test_available_slots_reads_the_day_once() {
    let mut store = MockAppointmentStore::new();
    store
        .expect_query_by_date()
        .with(predicate::eq(tuesday()))
        .times(1)
        .returning(|_| Ok(vec![existing(9, 0, 120)]));

    let slots = service_with(store).available_slots(tuesday()).await.unwrap();

    assert_eq!(slots.len(), 18);
    assert_eq!(slots.iter().filter(|slot| !slot.available).count(), 5);
}

#[tokio::test]
async fn test_closed_dates_never_reach_the_store() {
    // The mock has no expectations, so any store call would panic.
    let service = service_with(MockAppointmentStore::new());

    let saturday = NaiveDate::from_ymd_opt(2031, 3, 8).unwrap();
    let last_week = NaiveDate::from_ymd_opt(2031, 2, 25).unwrap();

    for date in [saturday, last_week] {
        let error = service.available_slots(date).await.unwrap_err();
        assert!(matches!(error, ShopError::Rejected(Rejection::DateClosed(d)) if d == date));
    }
}

#[tokio::test]
async fn test_open_policy_accepts_weekends_and_past_dates() {
    let mut store = MockAppointmentStore::new();
    store.expect_query_by_date().times(2).returning(|_| Ok(vec![]));
    let policy = DatePolicy {
        open_weekends: true,
        allow_past_dates: true,
    };
    let service = BookingService::new(Arc::new(store), policy).with_today(monday);

    assert!(service.available_slots(NaiveDate::from_ymd_opt(2031, 3, 9).unwrap()).await.is_ok());
    assert!(service.available_slots(NaiveDate::from_ymd_opt(2030, 1, 7).unwrap()).await.is_ok());
}

#[tokio::test]
async fn test_book_rejects_incomplete_candidate_without_store_calls() {
    let service = service_with(MockAppointmentStore::new());
    let candidate = BookingCandidate {
        date: Some(tuesday()),
        time: Some(at(10, 0)),
        ..BookingCandidate::default()
    };

    let error = service.book(&candidate).await.unwrap_err();

    assert!(matches!(
        error,
        ShopError::Rejected(Rejection::MissingFields(ref fields))
            if fields == &vec![BookingField::ServiceType, BookingField::Vehicle]
    ));
}

#[tokio::test]
async fn test_book_rejects_outside_hours_without_store_calls() {
    let service = service_with(MockAppointmentStore::new());
    let candidate = BookingCandidate::new("veh-1", tuesday(), at(17, 0), ServiceType::Inspection);

    let error = service.book(&candidate).await.unwrap_err();

    assert!(matches!(
        error,
        ShopError::Rejected(Rejection::OutsideBusinessHours(_))
    ));
}

#[test_log::test(tokio::test)]
async fn test_book_conflict_is_terminal_and_skips_insert() {
    let blocking = existing(9, 30, 90);
    let blocking_id = blocking.id;

    let mut store = MockAppointmentStore::new();
    store
        .expect_query_by_date()
        .times(1)
        .returning(move |_| Ok(vec![blocking.clone()]));
    store.expect_insert().never();

    let candidate = BookingCandidate::new("veh-1", tuesday(), at(10, 0), ServiceType::Inspection);
    let error = service_with(store).book(&candidate).await.unwrap_err();

    assert!(matches!(
        error,
        ShopError::Rejected(Rejection::SlotConflict { conflicting_id }) if conflicting_id == blocking_id
    ));
}

#[test_log::test(tokio::test)]
async fn test_book_inserts_accepted_candidate() {
    let mut store = MockAppointmentStore::new();
    store
        .expect_query_by_date()
        .times(1)
        .returning(|_| Ok(vec![existing(8, 0, 60)]));
    store
        .expect_insert()
        .withf(|booking| booking.duration == 90 && booking.vehicle_id == "veh-1")
        .times(1)
        .returning(|booking| Ok(stored(booking)));

    let candidate = BookingCandidate::new("veh-1", tuesday(), at(13, 0), ServiceType::Diagnostic);
    let appointment = service_with(store).book(&candidate).await.unwrap();

    assert_eq!(appointment.start_time, tuesday().and_time(at(13, 0)));
    assert_eq!(appointment.status, AppointmentStatus::Scheduled);
}

#[tokio::test]
async fn test_store_unavailable_is_not_retried() {
    let mut store = MockAppointmentStore::new();
    store
        .expect_query_by_date()
        .times(1)
        .returning(|_| Err(StoreError::Unavailable(eyre::eyre!("connection refused"))));
    store.expect_insert().never();

    let candidate = BookingCandidate::new("veh-1", tuesday(), at(10, 0), ServiceType::Repair);
    let error = service_with(store).book(&candidate).await.unwrap_err();

    assert!(matches!(error, ShopError::Store(StoreError::Unavailable(_))));
}

#[tokio::test]
async fn test_insert_constraint_violation_propagates() {
    let mut store = MockAppointmentStore::new();
    store.expect_query_by_date().returning(|_| Ok(vec![]));
    store
        .expect_insert()
        .times(1)
        .returning(|_| Err(StoreError::ConstraintViolation("valid_status".to_string())));

    let candidate = BookingCandidate::new("veh-1", tuesday(), at(10, 0), ServiceType::Repair);
    let error = service_with(store).book(&candidate).await.unwrap_err();

    assert!(matches!(
        error,
        ShopError::Store(StoreError::ConstraintViolation(_))
    ));
}

#[tokio::test]
async fn test_booking_landing_after_slot_listing_is_caught_at_submit() {
    let store = Arc::new(InMemoryAppointmentStore::new());
    let service = BookingService::new(store.clone(), DatePolicy::default()).with_today(monday);

    let slots = service.available_slots(tuesday()).await.unwrap();
    assert!(slots.iter().find(|slot| slot.time == at(10, 0)).unwrap().available);

    // Someone else books 10:00 after our slot list was produced.
    let other = BookingCandidate::new("veh-other", tuesday(), at(10, 0), ServiceType::Inspection);
    service.book(&other).await.unwrap();

    let ours = BookingCandidate::new("veh-ours", tuesday(), at(10, 0), ServiceType::Inspection);
    let error = service.book(&ours).await.unwrap_err();

    assert!(matches!(error, ShopError::Rejected(Rejection::SlotConflict { .. })));
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_validations_against_a_stale_snapshot_can_both_pass() {
    // The read-then-insert gap is inherent: two decisions made on the same
    // read do not see each other. Only a later read catches the overlap.
    let store = InMemoryAppointmentStore::new();
    let snapshot = store.query_by_date(tuesday()).await.unwrap();

    let first = BookingCandidate::new("veh-a", tuesday(), at(11, 0), ServiceType::Repair);
    let second = BookingCandidate::new("veh-b", tuesday(), at(12, 0), ServiceType::Inspection);

    let first = validate_booking(&first, &snapshot).unwrap();
    let second = validate_booking(&second, &snapshot).unwrap();
    store.insert(first).await.unwrap();
    store.insert(second).await.unwrap();

    let day = store.query_by_date(tuesday()).await.unwrap();
    assert_eq!(day.len(), 2);
    assert!(day[0].occupied().overlaps(&day[1].occupied()));
}

#[tokio::test]
async fn test_advance_status_moves_forward_only() {
    let store = Arc::new(InMemoryAppointmentStore::new());
    let service = BookingService::new(store, DatePolicy::default()).with_today(monday);
    let candidate = BookingCandidate::new("veh-1", tuesday(), at(9, 0), ServiceType::Inspection);
    let booked = service.book(&candidate).await.unwrap();

    let started = service
        .advance_status(booked.id, AppointmentStatus::InProgress)
        .await
        .unwrap();
    assert_eq!(started.status, AppointmentStatus::InProgress);

    let error = service
        .advance_status(booked.id, AppointmentStatus::Scheduled)
        .await
        .unwrap_err();
    assert!(matches!(
        error,
        ShopError::Rejected(Rejection::InvalidTransition {
            from: AppointmentStatus::InProgress,
            to: AppointmentStatus::Scheduled,
        })
    ));

    let missing = service
        .advance_status(Uuid::new_v4(), AppointmentStatus::Completed)
        .await
        .unwrap_err();
    assert!(matches!(missing, ShopError::NotFound(_)));
}

#[tokio::test]
async fn test_appointments_on_lists_the_day() {
    let store = InMemoryAppointmentStore::with_appointments(vec![existing(14, 0, 60), existing(8, 0, 60)]);
    let service = service_with(store);

    let day = service.appointments_on(tuesday()).await.unwrap();
    assert_eq!(day.len(), 2);
    assert!(day[0].start_time < day[1].start_time);

    let fetched = service.appointment(day[0].id).await.unwrap();
    assert_eq!(fetched, day[0]);
}
