use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{SlotError, SlotResult};
use crate::models::weekday::Weekday;

pub const MIN_CAPACITY: i32 = 1;
pub const MAX_CAPACITY: i32 = 100;

/// A recurring weekly availability template owned by one instructor.
///
/// There is no date component: a slot repeats every week on `day_of_week`
/// between `start_time` and `end_time` (wall-clock `HH:mm` strings, end
/// strictly after start). `is_booked` is owned by the server; the only thing
/// that ever sets it is a successful booking claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub day_of_week: Weekday,
    pub start_time: String,
    pub end_time: String,
    /// How many bookings the slot can ultimately accept (1..=100). The
    /// booking path currently treats slots as binary free/booked, so this is
    /// captured and validated but not decremented.
    #[serde(rename = "studentsNumber")]
    pub capacity: i32,
    pub is_booked: bool,
}

/// Raw user input for a new or edited slot, before validation.
///
/// The day is kept as the entered string so the conflict checker can report
/// "select a day" for empty input rather than failing at deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotDraft {
    pub day_of_week: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(rename = "studentsNumber")]
    pub capacity: i32,
}

impl SlotDraft {
    /// Capacity bounds check, separate from the time/day validation the
    /// conflict checker performs.
    pub fn validate_capacity(&self) -> SlotResult<()> {
        if !(MIN_CAPACITY..=MAX_CAPACITY).contains(&self.capacity) {
            return Err(SlotError::Validation(format!(
                "Capacity must be between {MIN_CAPACITY} and {MAX_CAPACITY}"
            )));
        }
        Ok(())
    }
}
