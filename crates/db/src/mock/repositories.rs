use mockall::mock;
use uuid::Uuid;

use crate::models::{DbBooking, DbStudent, DbTimeSlot};
use slotbook_core::errors::SlotResult;
use slotbook_core::models::BookingDraft;

// Mock repositories for testing
mock! {
    pub SlotRepo {
        pub async fn create_slot(
            &self,
            owner_id: Uuid,
            day_of_week: String,
            start_time: String,
            end_time: String,
            capacity: i32,
        ) -> eyre::Result<DbTimeSlot>;

        pub async fn get_slots_by_owner_id(
            &self,
            owner_id: Uuid,
        ) -> eyre::Result<Vec<DbTimeSlot>>;

        pub async fn get_slot_by_id(
            &self,
            slot_id: Uuid,
        ) -> eyre::Result<Option<DbTimeSlot>>;

        pub async fn update_slot(
            &self,
            owner_id: Uuid,
            slot_id: Uuid,
            day_of_week: String,
            start_time: String,
            end_time: String,
            capacity: i32,
        ) -> eyre::Result<Option<DbTimeSlot>>;

        pub async fn delete_slot(
            &self,
            owner_id: Uuid,
            slot_id: Uuid,
        ) -> eyre::Result<u64>;
    }
}

mock! {
    pub BookingRepo {
        pub async fn create_booking(
            &self,
            draft: BookingDraft,
        ) -> SlotResult<DbBooking>;

        pub async fn get_bookings_by_teacher_id(
            &self,
            teacher_id: Uuid,
        ) -> eyre::Result<Vec<DbBooking>>;
    }
}

mock! {
    pub StudentRepo {
        pub async fn get_student_by_number(
            &self,
            student_number: String,
        ) -> eyre::Result<Option<DbStudent>>;
    }
}
