use std::{fmt, str::FromStr};

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::{
    availability::Interval,
    errors::{BookingField, Rejection},
    models::service_type::ServiceType,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppointmentStatus {
    Scheduled,
    InProgress,
    Completed,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::InProgress => "in-progress",
            AppointmentStatus::Completed => "completed",
        }
    }

    fn rank(&self) -> u8 {
        match self {
            AppointmentStatus::Scheduled => 0,
            AppointmentStatus::InProgress => 1,
            AppointmentStatus::Completed => 2,
        }
    }

    /// Status only ever moves forward. Skipping `in-progress` is allowed.
    pub fn can_advance_to(&self, next: AppointmentStatus) -> bool {
        next.rank() > self.rank()
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown appointment status: {0}")]
pub struct ParseStatusError(pub String);

impl FromStr for AppointmentStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(AppointmentStatus::Scheduled),
            "in-progress" => Ok(AppointmentStatus::InProgress),
            "completed" => Ok(AppointmentStatus::Completed),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

/// A booked service appointment as held by the record store.
///
/// `start_time` is shop-local wall-clock time. `duration` is in minutes and
/// was copied from the service catalog when the booking was made.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub vehicle_id: String,
    pub service_type: ServiceType,
    pub start_time: NaiveDateTime,
    pub duration: u32,
    pub status: AppointmentStatus,
    pub created_at: DateTime<Utc>,
}

impl Appointment {
    pub fn date(&self) -> NaiveDate {
        self.start_time.date()
    }

    pub fn end_time(&self) -> NaiveDateTime {
        self.start_time + Duration::minutes(i64::from(self.duration))
    }

    /// The half-open range `[start_time, start_time + duration)`.
    pub fn occupied(&self) -> Interval {
        Interval::new(self.start_time, self.end_time())
    }
}

/// An accepted booking, ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAppointment {
    pub vehicle_id: String,
    pub service_type: ServiceType,
    pub start_time: NaiveDateTime,
    pub duration: u32,
    pub status: AppointmentStatus,
}

impl NewAppointment {
    pub fn new(vehicle_id: impl Into<String>, service_type: ServiceType, start_time: NaiveDateTime) -> Self {
        Self {
            vehicle_id: vehicle_id.into(),
            service_type,
            start_time,
            duration: service_type.duration_minutes(),
            status: AppointmentStatus::Scheduled,
        }
    }

    pub fn occupied(&self) -> Interval {
        Interval::new(
            self.start_time,
            self.start_time + Duration::minutes(i64::from(self.duration)),
        )
    }
}

/// Booking input as it arrives from a form. Nothing is guaranteed present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingCandidate {
    #[serde(default)]
    pub vehicle_id: Option<String>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub time: Option<NaiveTime>,
    #[serde(default)]
    pub service_type: Option<ServiceType>,
}

impl BookingCandidate {
    pub fn new(
        vehicle_id: impl Into<String>,
        date: NaiveDate,
        time: NaiveTime,
        service_type: ServiceType,
    ) -> Self {
        Self {
            vehicle_id: Some(vehicle_id.into()),
            date: Some(date),
            time: Some(time),
            service_type: Some(service_type),
        }
    }

    /// Fields that are absent. A blank vehicle id counts as absent.
    pub fn missing_fields(&self) -> Vec<BookingField> {
        let mut missing = Vec::new();
        if self.date.is_none() {
            missing.push(BookingField::Date);
        }
        if self.time.is_none() {
            missing.push(BookingField::Time);
        }
        if self.service_type.is_none() {
            missing.push(BookingField::ServiceType);
        }
        if self.vehicle_id.as_deref().is_none_or(|id| id.trim().is_empty()) {
            missing.push(BookingField::Vehicle);
        }
        missing
    }

    /// Turns the candidate into an insertable booking, with the duration
    /// taken from the service catalog.
    pub fn resolve(&self) -> Result<NewAppointment, Rejection> {
        match (&self.vehicle_id, self.date, self.time, self.service_type) {
            (Some(vehicle_id), Some(date), Some(time), Some(service_type))
                if !vehicle_id.trim().is_empty() =>
            {
                Ok(NewAppointment::new(
                    vehicle_id.trim(),
                    service_type,
                    date.and_time(time),
                ))
            }
            _ => Err(Rejection::MissingFields(self.missing_fields())),
        }
    }
}
