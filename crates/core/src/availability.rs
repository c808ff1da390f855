//! # Appointment Availability
//!
//! Slot generation and booking validation for a single shop day.
//!
//! ## Rules
//!
//! - The bookable window runs from 08:00 inclusive to 17:00 exclusive.
//! - Slots sit on every half-hour boundary of that window, 18 in total.
//! - A slot is probed as a one-hour window `[slot, slot + 60min)` no matter
//!   which service ends up in it.
//! - An appointment occupies `[start_time, start_time + duration)`.
//! - Two half-open intervals `[a0, a1)` and `[b0, b1)` overlap iff
//!   `a0 < b1 && b0 < a1`.
//!
//! Everything here is a pure function of its inputs. Fetching the day's
//! appointments and inserting the result belong to the caller.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::{
    errors::Rejection,
    models::{
        appointment::{Appointment, BookingCandidate, NewAppointment},
        time_slot::TimeSlot,
    },
};

pub const OPENING_HOUR: u32 = 8;
pub const CLOSING_HOUR: u32 = 17;
pub const SLOT_MINUTES: u32 = 30;
/// Occupancy assumed for a slot when checking it against existing bookings.
pub const SLOT_PROBE_MINUTES: i64 = 60;

/// A half-open time range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Interval {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    pub fn starting_at(start: NaiveDateTime, minutes: i64) -> Self {
        Self::new(start, start + Duration::minutes(minutes))
    }

    pub fn overlaps(&self, other: &Interval) -> bool {
        overlaps(self, other)
    }
}

pub fn overlaps(a: &Interval, b: &Interval) -> bool {
    a.start < b.end && b.start < a.end
}

/// Slot boundaries from opening up to, not including, closing.
pub fn slot_times() -> impl Iterator<Item = NaiveTime> {
    (OPENING_HOUR * 60..CLOSING_HOUR * 60)
        .step_by(SLOT_MINUTES as usize)
        .filter_map(|minute| NaiveTime::from_hms_opt(minute / 60, minute % 60, 0))
}

/// Builds the day's slot list from the appointments already booked.
pub fn generate_slots(date: NaiveDate, existing: &[Appointment]) -> Vec<TimeSlot> {
    let booked: Vec<Interval> = existing.iter().map(Appointment::occupied).collect();

    slot_times()
        .map(|time| {
            let probe = Interval::starting_at(date.and_time(time), SLOT_PROBE_MINUTES);
            TimeSlot {
                time,
                available: !booked.iter().any(|interval| probe.overlaps(interval)),
            }
        })
        .collect()
}

/// Only the start hour is checked; a late booking may run past closing.
pub fn check_business_hours(start_time: NaiveDateTime) -> Result<(), Rejection> {
    let hour = start_time.hour();
    if hour < OPENING_HOUR || hour >= CLOSING_HOUR {
        return Err(Rejection::OutsideBusinessHours(start_time.time()));
    }
    Ok(())
}

pub fn find_conflict<'a>(
    booking: &NewAppointment,
    existing: &'a [Appointment],
) -> Option<&'a Appointment> {
    let wanted = booking.occupied();
    existing
        .iter()
        .find(|appointment| wanted.overlaps(&appointment.occupied()))
}

pub fn check_conflicts(booking: &NewAppointment, existing: &[Appointment]) -> Result<(), Rejection> {
    match find_conflict(booking, existing) {
        Some(conflict) => Err(Rejection::SlotConflict {
            conflicting_id: conflict.id,
        }),
        None => Ok(()),
    }
}

/// Decides whether `candidate` may be booked against `existing`.
///
/// Checks run in order: required fields, business hours, conflicts. On
/// success the returned booking is ready for insert; nothing is persisted here.
pub fn validate_booking(
    candidate: &BookingCandidate,
    existing: &[Appointment],
) -> Result<NewAppointment, Rejection> {
    let booking = candidate.resolve()?;
    check_business_hours(booking.start_time)?;
    check_conflicts(&booking, existing)?;
    Ok(booking)
}
