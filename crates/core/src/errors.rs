use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::models::appointment::AppointmentStatus;

/// Fields a booking cannot be made without.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingField {
    Date,
    Time,
    ServiceType,
    Vehicle,
}

impl fmt::Display for BookingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BookingField::Date => "date",
            BookingField::Time => "time",
            BookingField::ServiceType => "service type",
            BookingField::Vehicle => "vehicle",
        };
        f.write_str(name)
    }
}

fn join_fields(fields: &[BookingField]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Deterministic reasons a booking attempt is turned down.
///
/// None of these are retried. The caller is expected to re-prompt the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("Missing required fields: {}", join_fields(.0))]
    MissingFields(Vec<BookingField>),

    #[error("Selected time {} is outside business hours", .0.format("%H:%M"))]
    OutsideBusinessHours(NaiveTime),

    #[error("Selected time slot is no longer available")]
    SlotConflict { conflicting_id: Uuid },

    #[error("Date {0} is not open for booking")]
    DateClosed(NaiveDate),

    #[error("Cannot move appointment from {from} to {to}")]
    InvalidTransition {
        from: AppointmentStatus,
        to: AppointmentStatus,
    },
}

impl Rejection {
    /// Stable machine-readable code for the rejection.
    pub fn code(&self) -> &'static str {
        match self {
            Rejection::MissingFields(_) => "missing_fields",
            Rejection::OutsideBusinessHours(_) => "outside_business_hours",
            Rejection::SlotConflict { .. } => "slot_conflict",
            Rejection::DateClosed(_) => "date_closed",
            Rejection::InvalidTransition { .. } => "invalid_transition",
        }
    }
}

/// Failures reported by an [`AppointmentStore`](crate::store::AppointmentStore).
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Appointment store unavailable: {0}")]
    Unavailable(#[from] eyre::Report),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
}

#[derive(Error, Debug)]
pub enum ShopError {
    #[error(transparent)]
    Rejected(#[from] Rejection),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Resource not found: {0}")]
    NotFound(String),
}

pub type ShopResult<T> = Result<T, ShopError>;
