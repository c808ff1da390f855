//! # Booking Service
//!
//! Request/response front for the availability rules. Each call reads the
//! store afresh; nothing is cached between listing slots and booking one.
//! A booking that lands in the store after `available_slots` was answered
//! is caught by the conflict check in `book`, but two bookings checked
//! against the same read can both pass. The store is trusted to serialize
//! writes and this service does not lock around it.

use std::sync::Arc;

use chrono::{Datelike, Local, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    availability,
    errors::{Rejection, ShopError, ShopResult},
    models::{
        appointment::{Appointment, AppointmentStatus, BookingCandidate},
        time_slot::TimeSlot,
    },
    store::AppointmentStore,
};

/// Which calendar days accept bookings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatePolicy {
    pub open_weekends: bool,
    pub allow_past_dates: bool,
}

impl DatePolicy {
    pub fn check(&self, date: NaiveDate, today: NaiveDate) -> Result<(), Rejection> {
        if !self.allow_past_dates && date < today {
            return Err(Rejection::DateClosed(date));
        }
        if !self.open_weekends && matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            return Err(Rejection::DateClosed(date));
        }
        Ok(())
    }
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

#[derive(Clone)]
pub struct BookingService {
    store: Arc<dyn AppointmentStore>,
    policy: DatePolicy,
    today: fn() -> NaiveDate,
}

impl BookingService {
    pub fn new(store: Arc<dyn AppointmentStore>, policy: DatePolicy) -> Self {
        Self {
            store,
            policy,
            today: local_today,
        }
    }

    /// Replaces the clock used for the past-date check.
    pub fn with_today(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn policy(&self) -> DatePolicy {
        self.policy
    }

    pub async fn available_slots(&self, date: NaiveDate) -> ShopResult<Vec<TimeSlot>> {
        self.policy.check(date, (self.today)())?;

        let existing = self.store.query_by_date(date).await?;
        let slots = availability::generate_slots(date, &existing);
        debug!(
            %date,
            booked = existing.len(),
            free = slots.iter().filter(|slot| slot.available).count(),
            "Generated time slots"
        );

        Ok(slots)
    }

    /// Validates `candidate` against a fresh read of its day and inserts it.
    ///
    /// Rejections are terminal for this attempt. Store failures are passed
    /// through without retrying.
    pub async fn book(&self, candidate: &BookingCandidate) -> ShopResult<Appointment> {
        let booking = candidate.resolve()?;
        availability::check_business_hours(booking.start_time)?;

        let date = booking.start_time.date();
        self.policy.check(date, (self.today)())?;

        let existing = self.store.query_by_date(date).await?;
        if let Some(conflict) = availability::find_conflict(&booking, &existing) {
            warn!(
                start_time = %booking.start_time,
                conflicting_id = %conflict.id,
                "Booking conflicts with an existing appointment"
            );
            return Err(Rejection::SlotConflict {
                conflicting_id: conflict.id,
            }
            .into());
        }

        let appointment = self.store.insert(booking).await?;
        info!(
            id = %appointment.id,
            vehicle_id = %appointment.vehicle_id,
            service = appointment.service_type.id(),
            start_time = %appointment.start_time,
            "Appointment scheduled"
        );

        Ok(appointment)
    }

    pub async fn appointments_on(&self, date: NaiveDate) -> ShopResult<Vec<Appointment>> {
        Ok(self.store.query_by_date(date).await?)
    }

    pub async fn appointment(&self, id: Uuid) -> ShopResult<Appointment> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    pub async fn advance_status(&self, id: Uuid, next: AppointmentStatus) -> ShopResult<Appointment> {
        let current = self.appointment(id).await?;
        if !current.status.can_advance_to(next) {
            return Err(Rejection::InvalidTransition {
                from: current.status,
                to: next,
            }
            .into());
        }

        let updated = self
            .store
            .update_status(id, next)
            .await?
            .ok_or_else(|| not_found(id))?;
        info!(%id, from = %current.status, to = %next, "Appointment status advanced");

        Ok(updated)
    }
}

fn not_found(id: Uuid) -> ShopError {
    ShopError::NotFound(format!("Appointment with ID {} not found", id))
}
