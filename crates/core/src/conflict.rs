//! Slot conflict detection.
//!
//! Run before every schedule write, both client-side in the availability
//! editor and server-side in the slot handlers. Pure and side-effect free so
//! both can share it.

use std::str::FromStr;
use uuid::Uuid;

use crate::errors::{SlotError, SlotResult};
use crate::models::{SlotDraft, TimeSlot, Weekday};
use crate::time::{intervals_overlap, parse_to_minutes};

/// Finds every existing slot that would overlap the candidate.
///
/// Validation happens first, in order, first match wins:
/// 1. unparsable start or end time
/// 2. missing (or unrecognized) day of week
/// 3. end not strictly after start
///
/// If the candidate is valid, `existing` is filtered to the candidate's
/// weekday (compared case-insensitively on the raw input), the slot with id
/// `ignore` is skipped so an edit never conflicts with itself, and every
/// remaining slot with parsable times is overlap-tested. The full conflict
/// list is returned so callers can report a count, not just the first hit.
pub fn find_conflicts(
    candidate: &SlotDraft,
    existing: &[TimeSlot],
    ignore: Option<Uuid>,
) -> SlotResult<Vec<TimeSlot>> {
    let (Some(start), Some(end)) = (
        parse_to_minutes(&candidate.start_time),
        parse_to_minutes(&candidate.end_time),
    ) else {
        return Err(SlotError::Validation(
            "Start and end times must be valid HH:mm values".to_string(),
        ));
    };

    if candidate.day_of_week.trim().is_empty() {
        return Err(SlotError::Validation(
            "Select a day of the week".to_string(),
        ));
    }
    let day = Weekday::from_str(&candidate.day_of_week)?;

    if end <= start {
        return Err(SlotError::Validation(
            "End time must be after start time".to_string(),
        ));
    }

    let conflicts = existing
        .iter()
        .filter(|slot| slot.day_of_week == day)
        .filter(|slot| ignore != Some(slot.id))
        .filter(|slot| {
            match (
                parse_to_minutes(&slot.start_time),
                parse_to_minutes(&slot.end_time),
            ) {
                (Some(other_start), Some(other_end)) => {
                    intervals_overlap(start, end, other_start, other_end)
                }
                // Unparsable stored times cannot be compared; skip them.
                _ => false,
            }
        })
        .cloned()
        .collect();

    Ok(conflicts)
}

/// User-facing message for a non-empty conflict list.
pub fn conflict_message(count: usize, day: &str) -> String {
    let plural = if count == 1 { "slot" } else { "slots" };
    format!("Conflicts with {count} existing {plural} on {day}")
}
