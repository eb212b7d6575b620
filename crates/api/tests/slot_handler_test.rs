//! Handler-logic tests against mocked repositories. These replicate the
//! handler's orchestration (load schedule, conflict-check, write) with the
//! database swapped for mocks, so the server-side conflict gate is exercised
//! without a live Postgres.

use chrono::Utc;
use pretty_assertions::assert_eq;
use uuid::Uuid;

use slotbook_core::conflict::{conflict_message, find_conflicts};
use slotbook_core::errors::{SlotError, SlotResult};
use slotbook_core::models::{BookingDraft, BookingStatus, SlotDraft, TimeSlot, UserType};
use slotbook_db::mock::repositories::{MockBookingRepo, MockSlotRepo};
use slotbook_db::models::{DbBooking, DbTimeSlot};

fn db_slot(owner_id: Uuid, day: &str, start: &str, end: &str) -> DbTimeSlot {
    DbTimeSlot {
        id: Uuid::new_v4(),
        owner_id,
        day_of_week: day.to_string(),
        start_time: start.to_string(),
        end_time: end.to_string(),
        capacity: 1,
        is_booked: false,
        created_at: Utc::now(),
    }
}

fn draft(day: &str, start: &str, end: &str) -> SlotDraft {
    SlotDraft {
        day_of_week: day.to_string(),
        start_time: start.to_string(),
        end_time: end.to_string(),
        capacity: 1,
    }
}

// Mirrors the create_slot handler flow with mocked persistence.
async fn create_slot_wrapper(
    slot_repo: &MockSlotRepo,
    owner_id: Uuid,
    candidate: SlotDraft,
) -> SlotResult<TimeSlot> {
    candidate.validate_capacity()?;

    let rows = slot_repo
        .get_slots_by_owner_id(owner_id)
        .await
        .map_err(SlotError::Database)?;
    let mut existing = Vec::with_capacity(rows.len());
    for row in rows {
        existing.push(TimeSlot::try_from(row)?);
    }

    let conflicts = find_conflicts(&candidate, &existing, None)?;
    if !conflicts.is_empty() {
        let day = candidate.day_of_week.trim().to_lowercase();
        return Err(SlotError::Conflict(conflict_message(conflicts.len(), &day)));
    }

    let row = slot_repo
        .create_slot(
            owner_id,
            candidate.day_of_week.clone(),
            candidate.start_time.clone(),
            candidate.end_time.clone(),
            candidate.capacity,
        )
        .await
        .map_err(SlotError::Database)?;
    TimeSlot::try_from(row)
}

#[tokio::test]
async fn test_create_slot_rejected_on_server_side_conflict() {
    let owner_id = Uuid::new_v4();
    let mut slot_repo = MockSlotRepo::new();

    let existing = db_slot(owner_id, "monday", "09:00", "10:00");
    slot_repo
        .expect_get_slots_by_owner_id()
        .times(1)
        .returning(move |_| Ok(vec![existing.clone()]));
    // No create expectation: the write must never happen.

    let result = create_slot_wrapper(&slot_repo, owner_id, draft("monday", "09:30", "10:30")).await;

    match result {
        Err(SlotError::Conflict(message)) => {
            assert_eq!(message, "Conflicts with 1 existing slot on monday");
        }
        other => panic!("expected conflict, got {other:?}"),
    }
}

#[tokio::test]
async fn test_create_slot_touching_existing_is_accepted() {
    let owner_id = Uuid::new_v4();
    let mut slot_repo = MockSlotRepo::new();

    let existing = db_slot(owner_id, "monday", "09:00", "10:00");
    slot_repo
        .expect_get_slots_by_owner_id()
        .times(1)
        .returning(move |_| Ok(vec![existing.clone()]));
    slot_repo
        .expect_create_slot()
        .times(1)
        .returning(|owner_id, day, start, end, capacity| {
            Ok(DbTimeSlot {
                id: Uuid::new_v4(),
                owner_id,
                day_of_week: day,
                start_time: start,
                end_time: end,
                capacity,
                is_booked: false,
                created_at: Utc::now(),
            })
        });

    let created = create_slot_wrapper(&slot_repo, owner_id, draft("monday", "10:00", "11:00"))
        .await
        .expect("touching slot is accepted");

    assert_eq!(created.start_time, "10:00");
    assert!(!created.is_booked);
}

#[tokio::test]
async fn test_create_slot_invalid_draft_never_touches_repo() {
    let owner_id = Uuid::new_v4();
    let slot_repo = MockSlotRepo::new();

    let result = create_slot_wrapper(&slot_repo, owner_id, draft("monday", "10:00", "09:00")).await;
    assert!(matches!(result, Err(SlotError::Validation(_))));
}

fn booking_draft(teacher_id: Uuid, slot_id: Uuid) -> BookingDraft {
    BookingDraft {
        teacher_id,
        slot_id,
        user_type: UserType::Visitor,
        student_number: None,
        student_name: "Ada Lovelace".to_string(),
        student_email: "ada@example.org".to_string(),
        student_phone: None,
        education_level: None,
        student_major: None,
        notes: "First meeting".to_string(),
        start_time: "09:00".to_string(),
        end_time: "10:00".to_string(),
        status: BookingStatus::Pending,
        captcha_token: "token".to_string(),
    }
}

#[tokio::test]
async fn test_lost_booking_race_surfaces_distinguishable_conflict() {
    let mut booking_repo = MockBookingRepo::new();
    booking_repo
        .expect_create_booking()
        .times(1)
        .returning(|_| {
            Err(SlotError::AlreadyBooked(
                "This slot has already been booked".to_string(),
            ))
        });

    let result = booking_repo
        .create_booking(booking_draft(Uuid::new_v4(), Uuid::new_v4()))
        .await;

    match result {
        Err(SlotError::AlreadyBooked(message)) => {
            assert_eq!(message, "This slot has already been booked");
        }
        other => panic!("expected already-booked conflict, got {other:?}"),
    }
}

#[tokio::test]
async fn test_created_booking_row_converts_to_pending_model() {
    let teacher_id = Uuid::new_v4();
    let slot_id = Uuid::new_v4();
    let mut booking_repo = MockBookingRepo::new();
    booking_repo
        .expect_create_booking()
        .times(1)
        .returning(|draft| {
            Ok(DbBooking {
                id: Uuid::new_v4(),
                teacher_id: draft.teacher_id,
                slot_id: draft.slot_id,
                user_type: draft.user_type.as_str().to_string(),
                student_number: draft.student_number,
                student_name: draft.student_name,
                student_email: draft.student_email,
                student_phone: draft.student_phone,
                education_level: draft.education_level,
                student_major: draft.student_major,
                notes: draft.notes,
                start_time: draft.start_time,
                end_time: draft.end_time,
                status: draft.status.as_str().to_string(),
                created_at: Utc::now(),
            })
        });

    let row = booking_repo
        .create_booking(booking_draft(teacher_id, slot_id))
        .await
        .expect("claim succeeds");
    let booking = slotbook_core::models::Booking::try_from(row).expect("row converts");

    assert_eq!(booking.teacher_id, teacher_id);
    assert_eq!(booking.slot_id, slot_id);
    assert_eq!(booking.status, BookingStatus::Pending);
    assert_eq!(booking.start_time, "09:00");
}
