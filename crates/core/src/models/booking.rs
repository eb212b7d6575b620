use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::SlotError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Visitor,
    Student,
}

impl UserType {
    pub fn as_str(self) -> &'static str {
        match self {
            UserType::Visitor => "visitor",
            UserType::Student => "student",
        }
    }
}

impl std::str::FromStr for UserType {
    type Err = SlotError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "visitor" => Ok(UserType::Visitor),
            "student" => Ok(UserType::Student),
            other => Err(SlotError::Validation(format!("Unknown user type: {other:?}"))),
        }
    }
}

/// Review status of a booking. The intake workflow only ever produces
/// `Pending`; acceptance/rejection is an instructor-side concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Accepted,
    Rejected,
}

impl BookingStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Accepted => "accepted",
            BookingStatus::Rejected => "rejected",
        }
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = SlotError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(BookingStatus::Pending),
            "accepted" => Ok(BookingStatus::Accepted),
            "rejected" => Ok(BookingStatus::Rejected),
            other => Err(SlotError::Validation(format!(
                "Unknown booking status: {other:?}"
            ))),
        }
    }
}

/// A reservation request attached to one slot.
///
/// `start_time`/`end_time` are denormalized snapshots of the slot's times at
/// submission, so later schedule edits do not rewrite booking history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub teacher_id: Uuid,
    pub slot_id: Uuid,
    pub user_type: UserType,
    pub student_number: Option<String>,
    pub student_name: String,
    pub student_email: String,
    pub student_phone: Option<String>,
    pub education_level: Option<String>,
    pub student_major: Option<String>,
    pub notes: String,
    pub start_time: String,
    pub end_time: String,
    pub status: BookingStatus,
}

/// Everything the server needs to attempt a claim. The captcha token is
/// opaque here; the server verifies it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDraft {
    pub teacher_id: Uuid,
    pub slot_id: Uuid,
    pub user_type: UserType,
    pub student_number: Option<String>,
    pub student_name: String,
    pub student_email: String,
    pub student_phone: Option<String>,
    pub education_level: Option<String>,
    pub student_major: Option<String>,
    pub notes: String,
    pub start_time: String,
    pub end_time: String,
    /// Always `Pending` from the intake workflow.
    pub status: BookingStatus,
    pub captcha_token: String,
}
