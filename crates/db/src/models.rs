use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use slotbook_core::errors::SlotError;
use slotbook_core::models::{Booking, TimeSlot};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbTimeSlot {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub day_of_week: String,
    pub start_time: String,
    pub end_time: String,
    pub capacity: i32,
    pub is_booked: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbBooking {
    pub id: Uuid,
    pub teacher_id: Uuid,
    pub slot_id: Uuid,
    pub user_type: String,
    pub student_number: Option<String>,
    pub student_name: String,
    pub student_email: String,
    pub student_phone: Option<String>,
    pub education_level: Option<String>,
    pub student_major: Option<String>,
    pub notes: String,
    pub start_time: String,
    pub end_time: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbStudent {
    pub student_number: String,
    pub full_name: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<DbTimeSlot> for TimeSlot {
    type Error = SlotError;

    fn try_from(row: DbTimeSlot) -> Result<Self, Self::Error> {
        Ok(TimeSlot {
            id: row.id,
            owner_id: row.owner_id,
            day_of_week: row.day_of_week.parse()?,
            start_time: row.start_time.trim().to_string(),
            end_time: row.end_time.trim().to_string(),
            capacity: row.capacity,
            is_booked: row.is_booked,
        })
    }
}

impl TryFrom<DbBooking> for Booking {
    type Error = SlotError;

    fn try_from(row: DbBooking) -> Result<Self, Self::Error> {
        Ok(Booking {
            id: row.id,
            teacher_id: row.teacher_id,
            slot_id: row.slot_id,
            user_type: row.user_type.parse()?,
            student_number: row.student_number,
            student_name: row.student_name,
            student_email: row.student_email,
            student_phone: row.student_phone,
            education_level: row.education_level,
            student_major: row.student_major,
            notes: row.notes,
            start_time: row.start_time.trim().to_string(),
            end_time: row.end_time.trim().to_string(),
            status: row.status.parse()?,
        })
    }
}
