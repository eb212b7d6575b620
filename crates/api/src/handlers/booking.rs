//! # Booking Handlers
//!
//! Booking creation is the race-prone path of the whole service: any number
//! of clients may believe a slot is free. The handler validates the request
//! shape, then delegates the claim to the repository's atomic
//! compare-and-set; a lost race comes back as a 409 with a message the client
//! shows verbatim.

use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;
use uuid::Uuid;

use slotbook_core::{
    errors::SlotError,
    models::{Booking, BookingDraft, UserType},
};

use crate::{ApiState, middleware::error_handling::AppError};

/// Server-side request validation. The client validates more thoroughly
/// (inline field errors, identity lookup); this is the backstop for clients
/// that skipped it.
fn validate_draft(draft: &BookingDraft) -> Result<(), SlotError> {
    if draft.student_name.trim().is_empty() {
        return Err(SlotError::Validation("Full name is required".to_string()));
    }
    if draft.student_email.trim().is_empty() {
        return Err(SlotError::Validation("Email is required".to_string()));
    }
    if draft.notes.trim().is_empty() {
        return Err(SlotError::Validation("Notes are required".to_string()));
    }
    if draft.captcha_token.trim().is_empty() {
        return Err(SlotError::Validation(
            "Verification challenge is required".to_string(),
        ));
    }
    if draft.user_type == UserType::Student
        && draft
            .student_number
            .as_deref()
            .is_none_or(|number| number.trim().is_empty())
    {
        return Err(SlotError::Validation(
            "Student number is required".to_string(),
        ));
    }
    Ok(())
}

#[axum::debug_handler]
pub async fn create_booking(
    State(state): State<Arc<ApiState>>,
    Json(draft): Json<BookingDraft>,
) -> Result<Json<Booking>, AppError> {
    validate_draft(&draft)?;

    // Verify the slot exists and belongs to the addressed teacher before
    // attempting the claim, so bad references 404 instead of reading as a
    // lost race.
    slotbook_db::repositories::slot::get_slot_by_id(&state.db_pool, draft.slot_id)
        .await
        .map_err(SlotError::Database)?
        .filter(|row| row.owner_id == draft.teacher_id)
        .ok_or_else(|| {
            SlotError::NotFound(format!("Slot with ID {} not found", draft.slot_id))
        })?;

    // Atomic claim: first write wins, later writers get AlreadyBooked.
    let row = slotbook_db::repositories::booking::create_booking(&state.db_pool, &draft).await?;

    Ok(Json(Booking::try_from(row)?))
}

#[axum::debug_handler]
pub async fn list_bookings(
    State(state): State<Arc<ApiState>>,
    Path(teacher_id): Path<Uuid>,
) -> Result<Json<Vec<Booking>>, AppError> {
    let rows =
        slotbook_db::repositories::booking::get_bookings_by_teacher_id(&state.db_pool, teacher_id)
            .await
            .map_err(SlotError::Database)?;

    let mut bookings = Vec::with_capacity(rows.len());
    for row in rows {
        bookings.push(Booking::try_from(row)?);
    }
    Ok(Json(bookings))
}
