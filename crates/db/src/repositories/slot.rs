use crate::models::DbTimeSlot;
use chrono::Utc;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_slot(
    pool: &Pool<Postgres>,
    owner_id: Uuid,
    day_of_week: &str,
    start_time: &str,
    end_time: &str,
    capacity: i32,
) -> Result<DbTimeSlot> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let slot = sqlx::query_as::<_, DbTimeSlot>(
        r#"
        INSERT INTO time_slots (id, owner_id, day_of_week, start_time, end_time, capacity, is_booked, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, FALSE, $7)
        RETURNING id, owner_id, day_of_week, start_time, end_time, capacity, is_booked, created_at
        "#,
    )
    .bind(id)
    .bind(owner_id)
    .bind(day_of_week)
    .bind(start_time)
    .bind(end_time)
    .bind(capacity)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(slot)
}

pub async fn get_slots_by_owner_id(
    pool: &Pool<Postgres>,
    owner_id: Uuid,
) -> Result<Vec<DbTimeSlot>> {
    let slots = sqlx::query_as::<_, DbTimeSlot>(
        r#"
        SELECT id, owner_id, day_of_week, start_time, end_time, capacity, is_booked, created_at
        FROM time_slots
        WHERE owner_id = $1
        ORDER BY day_of_week ASC, start_time ASC
        "#,
    )
    .bind(owner_id)
    .fetch_all(pool)
    .await?;

    Ok(slots)
}

pub async fn get_slot_by_id(pool: &Pool<Postgres>, slot_id: Uuid) -> Result<Option<DbTimeSlot>> {
    let slot = sqlx::query_as::<_, DbTimeSlot>(
        r#"
        SELECT id, owner_id, day_of_week, start_time, end_time, capacity, is_booked, created_at
        FROM time_slots
        WHERE id = $1
        "#,
    )
    .bind(slot_id)
    .fetch_optional(pool)
    .await?;

    Ok(slot)
}

/// Applies an edit to a slot that is still free. Returns `None` when the slot
/// does not exist or was booked in the meantime.
pub async fn update_slot(
    pool: &Pool<Postgres>,
    owner_id: Uuid,
    slot_id: Uuid,
    day_of_week: &str,
    start_time: &str,
    end_time: &str,
    capacity: i32,
) -> Result<Option<DbTimeSlot>> {
    let slot = sqlx::query_as::<_, DbTimeSlot>(
        r#"
        UPDATE time_slots
        SET day_of_week = $3, start_time = $4, end_time = $5, capacity = $6
        WHERE id = $1 AND owner_id = $2 AND NOT is_booked
        RETURNING id, owner_id, day_of_week, start_time, end_time, capacity, is_booked, created_at
        "#,
    )
    .bind(slot_id)
    .bind(owner_id)
    .bind(day_of_week)
    .bind(start_time)
    .bind(end_time)
    .bind(capacity)
    .fetch_optional(pool)
    .await?;

    Ok(slot)
}

/// Deletes a slot only while it is free and owned by the caller. Returns the
/// number of rows removed (0 or 1).
pub async fn delete_slot(pool: &Pool<Postgres>, owner_id: Uuid, slot_id: Uuid) -> Result<u64> {
    let result = sqlx::query(
        r#"
        DELETE FROM time_slots
        WHERE id = $1 AND owner_id = $2 AND NOT is_booked
        "#,
    )
    .bind(slot_id)
    .bind(owner_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}
