//! # Error Handling Middleware
//!
//! Maps `ShopError` onto HTTP status codes and JSON error bodies so every
//! endpoint reports failures the same way:
//!
//! ```json
//! { "error": "Selected time slot is no longer available", "code": "slot_conflict" }
//! ```

use axum::{
    BoxError, Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use shopdesk_core::errors::{Rejection, ShopError, StoreError};
use tracing::error;

/// Application error wrapper that provides HTTP status code mapping
#[derive(Debug)]
pub struct AppError(pub ShopError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            ShopError::Rejected(rejection) => match rejection {
                Rejection::MissingFields(_)
                | Rejection::OutsideBusinessHours(_)
                | Rejection::DateClosed(_) => StatusCode::BAD_REQUEST,
                Rejection::SlotConflict { .. } | Rejection::InvalidTransition { .. } => {
                    StatusCode::CONFLICT
                }
            },
            ShopError::Store(StoreError::ConstraintViolation(_)) => StatusCode::CONFLICT,
            ShopError::Store(StoreError::Unavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
            ShopError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    fn code(&self) -> &'static str {
        match &self.0 {
            ShopError::Rejected(rejection) => rejection.code(),
            ShopError::Store(StoreError::ConstraintViolation(_)) => "constraint_violation",
            ShopError::Store(StoreError::Unavailable(_)) => "store_unavailable",
            ShopError::NotFound(_) => "not_found",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Store details stay in the log; the client gets a generic message.
        let message = match &self.0 {
            ShopError::Store(StoreError::Unavailable(report)) => {
                error!("Request failed, appointment store unavailable: {:?}", report);
                "Appointment store is unavailable, please try again".to_string()
            }
            other => other.to_string(),
        };
        let body = Json(json!({ "error": message, "code": self.code() }));

        (status, body).into_response()
    }
}

impl From<ShopError> for AppError {
    fn from(err: ShopError) -> Self {
        AppError(err)
    }
}

impl From<Rejection> for AppError {
    fn from(err: Rejection) -> Self {
        AppError(ShopError::Rejected(err))
    }
}

/// Maps a ShopError to an HTTP response
pub fn map_error(err: ShopError) -> Response {
    AppError(err).into_response()
}

/// Turns a failure from the timeout layer into a response.
pub async fn handle_timeout(err: BoxError) -> (StatusCode, Json<serde_json::Value>) {
    if err.is::<tower::timeout::error::Elapsed>() {
        (
            StatusCode::REQUEST_TIMEOUT,
            Json(json!({ "error": "Request timed out", "code": "timeout" })),
        )
    } else {
        error!("Unhandled middleware error: {}", err);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Internal server error", "code": "internal" })),
        )
    }
}
