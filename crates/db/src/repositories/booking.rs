use chrono::Utc;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::models::DbBooking;
use slotbook_core::errors::{SlotError, SlotResult};
use slotbook_core::models::BookingDraft;

/// Creates a booking by atomically claiming its slot.
///
/// The claim and the insert run in one transaction. The `UPDATE ... WHERE NOT
/// is_booked` is the compare-and-set that arbitrates the booking race: the
/// first writer flips the flag, every later writer matches zero rows and gets
/// [`SlotError::AlreadyBooked`] without touching the table.
pub async fn create_booking(pool: &Pool<Postgres>, draft: &BookingDraft) -> SlotResult<DbBooking> {
    let mut tx = pool
        .begin()
        .await
        .map_err(|err| SlotError::Database(err.into()))?;

    let claimed = sqlx::query(
        r#"
        UPDATE time_slots
        SET is_booked = TRUE
        WHERE id = $1 AND NOT is_booked
        "#,
    )
    .bind(draft.slot_id)
    .execute(&mut *tx)
    .await
    .map_err(|err| SlotError::Database(err.into()))?;

    if claimed.rows_affected() == 0 {
        // Either the slot does not exist or another booking won the race;
        // both read as "no longer free" to the requester.
        return Err(SlotError::AlreadyBooked(
            "This slot has already been booked".to_string(),
        ));
    }

    let id = Uuid::new_v4();
    let now = Utc::now();

    let booking = sqlx::query_as::<_, DbBooking>(
        r#"
        INSERT INTO bookings (
            id, teacher_id, slot_id, user_type, student_number, student_name,
            student_email, student_phone, education_level, student_major,
            notes, start_time, end_time, status, created_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
        RETURNING id, teacher_id, slot_id, user_type, student_number, student_name,
                  student_email, student_phone, education_level, student_major,
                  notes, start_time, end_time, status, created_at
        "#,
    )
    .bind(id)
    .bind(draft.teacher_id)
    .bind(draft.slot_id)
    .bind(draft.user_type.as_str())
    .bind(&draft.student_number)
    .bind(&draft.student_name)
    .bind(&draft.student_email)
    .bind(&draft.student_phone)
    .bind(&draft.education_level)
    .bind(&draft.student_major)
    .bind(&draft.notes)
    .bind(&draft.start_time)
    .bind(&draft.end_time)
    .bind(draft.status.as_str())
    .bind(now)
    .fetch_one(&mut *tx)
    .await
    .map_err(|err| SlotError::Database(err.into()))?;

    tx.commit()
        .await
        .map_err(|err| SlotError::Database(err.into()))?;

    Ok(booking)
}

pub async fn get_bookings_by_teacher_id(
    pool: &Pool<Postgres>,
    teacher_id: Uuid,
) -> eyre::Result<Vec<DbBooking>> {
    let bookings = sqlx::query_as::<_, DbBooking>(
        r#"
        SELECT id, teacher_id, slot_id, user_type, student_number, student_name,
               student_email, student_phone, education_level, student_major,
               notes, start_time, end_time, status, created_at
        FROM bookings
        WHERE teacher_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(teacher_id)
    .fetch_all(pool)
    .await?;

    Ok(bookings)
}
