//! # Error Handling Middleware
//!
//! Maps domain errors to HTTP status codes and JSON error bodies so every
//! endpoint fails the same way. Conflict-type outcomes (schedule overlap,
//! lost booking race) get 409 so clients can distinguish them from plain
//! validation failures.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use slotbook_core::errors::SlotError;

/// Application error wrapper that provides HTTP status code mapping.
///
/// `AppError` wraps domain [`SlotError`] instances and implements
/// `IntoResponse` to convert them into HTTP responses with appropriate
/// status codes and JSON payloads.
#[derive(Debug)]
pub struct AppError(pub SlotError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Map error types to HTTP status codes
        let status = match &self.0 {
            SlotError::NotFound(_) => StatusCode::NOT_FOUND,
            SlotError::Validation(_) => StatusCode::BAD_REQUEST,
            SlotError::Conflict(_) => StatusCode::CONFLICT,
            SlotError::AlreadyBooked(_) => StatusCode::CONFLICT,
            SlotError::LookupFailed(_) => StatusCode::BAD_GATEWAY,
            SlotError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            SlotError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = self.0.to_string();
        let body = Json(json!({ "error": message }));

        (status, body).into_response()
    }
}

/// Allows `?` on functions returning `Result<T, SlotError>` inside handlers.
impl From<SlotError> for AppError {
    fn from(err: SlotError) -> Self {
        AppError(err)
    }
}

/// Allows `?` on functions returning `Result<T, eyre::Report>` inside
/// handlers, wrapping the report in `SlotError::Database`.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(SlotError::Database(err))
    }
}
