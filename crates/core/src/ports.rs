//! Collaborator contracts consumed by the client-side workflows.
//!
//! The transport behind these traits (HTTP client, direct database access,
//! in-memory fake) is out of scope for the core. The one hard requirement is
//! on [`BookingGateway::create_booking`]: the claim must be atomic on the
//! server — first write wins, the loser gets [`SlotError::AlreadyBooked`] —
//! because two visitors can both pass the client-side "slot is free" check.
//!
//! [`SlotError::AlreadyBooked`]: crate::errors::SlotError::AlreadyBooked

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::SlotResult;
use crate::models::{Booking, BookingDraft, SlotDraft, TimeSlot};

/// Persistence for an instructor's weekly slot set.
#[async_trait]
pub trait SlotStore: Send + Sync {
    async fn list_slots(&self, owner_id: Uuid) -> SlotResult<Vec<TimeSlot>>;

    /// Server assigns the id; may independently reject with a conflict error
    /// if it detects overlap against its own view of the schedule.
    async fn create_slot(&self, owner_id: Uuid, draft: &SlotDraft) -> SlotResult<TimeSlot>;

    async fn update_slot(
        &self,
        owner_id: Uuid,
        slot_id: Uuid,
        draft: &SlotDraft,
    ) -> SlotResult<TimeSlot>;

    async fn delete_slot(&self, owner_id: Uuid, slot_id: Uuid) -> SlotResult<()>;
}

/// Submission endpoint for booking claims.
#[async_trait]
pub trait BookingGateway: Send + Sync {
    /// Atomically claims the target slot. Fails with `AlreadyBooked` when the
    /// slot was taken in the race window between page load and submit.
    async fn create_booking(&self, draft: &BookingDraft) -> SlotResult<Booking>;
}

/// Name on file for a student number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentRecord {
    pub student_number: String,
    pub full_name: String,
}

/// Identity lookup backing the booking form's student-number check.
#[async_trait]
pub trait StudentDirectory: Send + Sync {
    /// `Ok(None)` means the number is not on file (a normal outcome, shown as
    /// a correction hint). `Err` means the lookup itself failed and must not
    /// imply the number is invalid.
    async fn lookup_by_number(&self, student_number: &str) -> SlotResult<Option<StudentRecord>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyKind {
    Success,
    Error,
    Warning,
}

/// Fire-and-forget sink for user-facing outcome messages.
///
/// Injected into every workflow instead of any ambient broadcast mechanism,
/// so tests can substitute a recording fake.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, kind: NotifyKind, message: &str);
}

/// Interactive yes/no guard for irreversible actions (slot deletion).
#[async_trait]
pub trait ConfirmPrompt: Send + Sync {
    async fn confirm(&self, message: &str) -> bool;
}
