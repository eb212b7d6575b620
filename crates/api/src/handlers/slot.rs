//! # Slot Handlers
//!
//! Instructor-facing slot CRUD. The server re-runs the conflict checker
//! against its own view of the schedule on every write, so a stale client
//! cannot introduce overlapping slots, and SQL guards (`AND NOT is_booked`)
//! keep booked slots immutable even under concurrent edits.

use axum::{
    Json,
    extract::{Path, State},
};
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

use slotbook_core::{
    conflict::{conflict_message, find_conflicts},
    errors::SlotError,
    models::{SlotDraft, TimeSlot, Weekday},
};

use crate::{ApiState, middleware::error_handling::AppError};

/// Loads the owner's slots and converts them to domain models.
async fn load_schedule(state: &ApiState, owner_id: Uuid) -> Result<Vec<TimeSlot>, AppError> {
    let rows = slotbook_db::repositories::slot::get_slots_by_owner_id(&state.db_pool, owner_id)
        .await
        .map_err(SlotError::Database)?;

    let mut slots = Vec::with_capacity(rows.len());
    for row in rows {
        slots.push(TimeSlot::try_from(row)?);
    }
    Ok(slots)
}

/// Canonical lowercase day name for a validated draft.
fn canonical_day(draft: &SlotDraft) -> Result<Weekday, AppError> {
    Ok(Weekday::from_str(&draft.day_of_week)?)
}

#[axum::debug_handler]
pub async fn list_slots(
    State(state): State<Arc<ApiState>>,
    Path(teacher_id): Path<Uuid>,
) -> Result<Json<Vec<TimeSlot>>, AppError> {
    let slots = load_schedule(&state, teacher_id).await?;
    Ok(Json(slots))
}

#[axum::debug_handler]
pub async fn create_slot(
    State(state): State<Arc<ApiState>>,
    Path(teacher_id): Path<Uuid>,
    Json(draft): Json<SlotDraft>,
) -> Result<Json<TimeSlot>, AppError> {
    draft.validate_capacity()?;

    // Independent server-side overlap detection against the persisted set.
    let existing = load_schedule(&state, teacher_id).await?;
    let conflicts = find_conflicts(&draft, &existing, None)?;
    if !conflicts.is_empty() {
        let day = canonical_day(&draft)?;
        return Err(AppError(SlotError::Conflict(conflict_message(
            conflicts.len(),
            day.as_str(),
        ))));
    }

    let day = canonical_day(&draft)?;
    let row = slotbook_db::repositories::slot::create_slot(
        &state.db_pool,
        teacher_id,
        day.as_str(),
        draft.start_time.trim(),
        draft.end_time.trim(),
        draft.capacity,
    )
    .await
    .map_err(SlotError::Database)?;

    Ok(Json(TimeSlot::try_from(row)?))
}

#[axum::debug_handler]
pub async fn update_slot(
    State(state): State<Arc<ApiState>>,
    Path((teacher_id, slot_id)): Path<(Uuid, Uuid)>,
    Json(draft): Json<SlotDraft>,
) -> Result<Json<TimeSlot>, AppError> {
    draft.validate_capacity()?;

    let current = slotbook_db::repositories::slot::get_slot_by_id(&state.db_pool, slot_id)
        .await
        .map_err(SlotError::Database)?
        .filter(|row| row.owner_id == teacher_id)
        .ok_or_else(|| SlotError::NotFound(format!("Slot with ID {slot_id} not found")))?;

    if current.is_booked {
        return Err(AppError(SlotError::Validation(
            "Booked slots cannot be edited".to_string(),
        )));
    }

    // The slot being edited is excluded so it does not conflict with itself.
    let existing = load_schedule(&state, teacher_id).await?;
    let conflicts = find_conflicts(&draft, &existing, Some(slot_id))?;
    if !conflicts.is_empty() {
        let day = canonical_day(&draft)?;
        return Err(AppError(SlotError::Conflict(conflict_message(
            conflicts.len(),
            day.as_str(),
        ))));
    }

    let day = canonical_day(&draft)?;
    let row = slotbook_db::repositories::slot::update_slot(
        &state.db_pool,
        teacher_id,
        slot_id,
        day.as_str(),
        draft.start_time.trim(),
        draft.end_time.trim(),
        draft.capacity,
    )
    .await
    .map_err(SlotError::Database)?
    // Zero rows means the slot was claimed between the check and the write.
    .ok_or_else(|| {
        SlotError::AlreadyBooked("Slot was booked while editing; refresh the schedule".to_string())
    })?;

    Ok(Json(TimeSlot::try_from(row)?))
}

#[axum::debug_handler]
pub async fn delete_slot(
    State(state): State<Arc<ApiState>>,
    Path((teacher_id, slot_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<serde_json::Value>, AppError> {
    let removed =
        slotbook_db::repositories::slot::delete_slot(&state.db_pool, teacher_id, slot_id)
            .await
            .map_err(SlotError::Database)?;

    if removed == 0 {
        // Distinguish "booked, therefore undeletable" from "does not exist".
        let current = slotbook_db::repositories::slot::get_slot_by_id(&state.db_pool, slot_id)
            .await
            .map_err(SlotError::Database)?
            .filter(|row| row.owner_id == teacher_id);

        return match current {
            Some(_) => Err(AppError(SlotError::Validation(
                "Booked slots cannot be deleted".to_string(),
            ))),
            None => Err(AppError(SlotError::NotFound(format!(
                "Slot with ID {slot_id} not found"
            )))),
        };
    }

    Ok(Json(serde_json::json!({ "deleted": true })))
}
