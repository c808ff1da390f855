//! # Appointment Handlers
//!
//! Slot listing, booking, and status tracking. Each request reads the store
//! afresh; the slot list a client was shown is never trusted at booking time.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shopdesk_core::models::{
    appointment::{Appointment, AppointmentStatus, BookingCandidate},
    time_slot::TimeSlot,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{middleware::error_handling::AppError, ApiState};

/// `?date=YYYY-MM-DD`
#[derive(Debug, Deserialize)]
pub struct DateQuery {
    pub date: NaiveDate,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SlotsResponse {
    pub date: NaiveDate,
    pub slots: Vec<TimeSlot>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: AppointmentStatus,
}

/// Half-hour slots for a day, each marked available or not.
///
/// # Endpoint
///
/// ```text
/// GET /api/appointments/slots?date=2031-03-04
/// ```
#[axum::debug_handler]
pub async fn list_slots(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<DateQuery>,
) -> Result<Json<SlotsResponse>, AppError> {
    let slots = state.booking.available_slots(query.date).await?;

    Ok(Json(SlotsResponse {
        date: query.date,
        slots,
    }))
}

#[axum::debug_handler]
pub async fn list_appointments(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<DateQuery>,
) -> Result<Json<Vec<Appointment>>, AppError> {
    let appointments = state.booking.appointments_on(query.date).await?;
    Ok(Json(appointments))
}

/// Books an appointment.
///
/// Every field of the body is optional so that an incomplete form comes back
/// as a `missing_fields` rejection rather than a deserialization error.
///
/// # Errors
///
/// * `400` - missing fields, time outside business hours, or a closed date
/// * `409` - the slot was taken since it was listed
/// * `503` - the appointment store could not be reached
#[axum::debug_handler]
pub async fn create_appointment(
    State(state): State<Arc<ApiState>>,
    Json(candidate): Json<BookingCandidate>,
) -> Result<(StatusCode, Json<Appointment>), AppError> {
    let appointment = state.booking.book(&candidate).await?;
    Ok((StatusCode::CREATED, Json(appointment)))
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Appointment>, AppError> {
    let appointment = state.booking.appointment(id).await?;
    Ok(Json(appointment))
}

#[axum::debug_handler]
pub async fn update_status(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<Json<Appointment>, AppError> {
    let appointment = state.booking.advance_status(id, payload.status).await?;
    Ok(Json(appointment))
}
