//! The instructor-facing schedule manager.
//!
//! Owns the in-memory copy of one instructor's weekly slot set and runs the
//! conflict checker before every write. Persistence failures are reported to
//! the notification sink and never partially applied; the in-memory set only
//! changes after the store has confirmed the write.

use std::cmp::Reverse;
use uuid::Uuid;

use slotbook_core::conflict::{conflict_message, find_conflicts};
use slotbook_core::errors::{SlotError, SlotResult};
use slotbook_core::models::{SlotDraft, TimeSlot, Weekday};
use slotbook_core::ports::{ConfirmPrompt, NotificationSink, NotifyKind, SlotStore};
use slotbook_core::time::parse_to_minutes;

use crate::debounce::{DebouncedInput, SEARCH_DEBOUNCE};

/// Client-side orchestration of an instructor's weekly availability.
pub struct AvailabilityEditor<S, N, C> {
    store: S,
    notifier: N,
    confirm: C,
    owner_id: Uuid,
    slots: Vec<TimeSlot>,
    show_booked: bool,
    day_filter: Option<Weekday>,
    sort_descending: bool,
    search: DebouncedInput<String>,
}

impl<S, N, C> AvailabilityEditor<S, N, C>
where
    S: SlotStore,
    N: NotificationSink,
    C: ConfirmPrompt,
{
    pub fn new(store: S, notifier: N, confirm: C, owner_id: Uuid) -> Self {
        Self {
            store,
            notifier,
            confirm,
            owner_id,
            slots: Vec::new(),
            show_booked: true,
            day_filter: None,
            sort_descending: false,
            search: DebouncedInput::new(String::new(), SEARCH_DEBOUNCE),
        }
    }

    /// Fetches the full slot set for the owner. On failure the prior
    /// in-memory set is left untouched.
    pub async fn load(&mut self) -> SlotResult<()> {
        match self.store.list_slots(self.owner_id).await {
            Ok(slots) => {
                self.slots = slots;
                Ok(())
            }
            Err(err) => {
                self.notifier
                    .notify(NotifyKind::Error, &format!("Failed to load schedule: {err}"));
                Err(err)
            }
        }
    }

    /// Validates and persists a new slot. Conflict checking runs against the
    /// full current set; nothing is sent to the store unless it passes.
    pub async fn create(&mut self, draft: &SlotDraft) -> SlotResult<TimeSlot> {
        self.check_candidate(draft, None)?;

        match self.store.create_slot(self.owner_id, draft).await {
            Ok(slot) => {
                self.slots.push(slot.clone());
                self.notifier.notify(NotifyKind::Success, "Slot added");
                Ok(slot)
            }
            Err(err) => {
                self.notifier
                    .notify(NotifyKind::Error, &format!("Failed to add slot: {err}"));
                Err(err)
            }
        }
    }

    /// Validates and persists an edit to an existing slot. The slot's own id
    /// is excluded from conflict checking so a no-op edit passes.
    pub async fn update(&mut self, slot_id: Uuid, draft: &SlotDraft) -> SlotResult<TimeSlot> {
        let current = self.require_slot(slot_id)?;
        if current.is_booked {
            return self.refuse("Booked slots cannot be edited");
        }

        self.check_candidate(draft, Some(slot_id))?;

        match self.store.update_slot(self.owner_id, slot_id, draft).await {
            Ok(updated) => {
                if let Some(existing) = self.slots.iter_mut().find(|s| s.id == slot_id) {
                    *existing = updated.clone();
                }
                self.notifier.notify(NotifyKind::Success, "Slot updated");
                Ok(updated)
            }
            Err(err) => {
                self.notifier
                    .notify(NotifyKind::Error, &format!("Failed to update slot: {err}"));
                Err(err)
            }
        }
    }

    /// Deletes a free slot after interactive confirmation. Returns
    /// `Ok(false)` when the user declines.
    pub async fn delete(&mut self, slot_id: Uuid) -> SlotResult<bool> {
        let current = self.require_slot(slot_id)?;
        if current.is_booked {
            return self.refuse("Booked slots cannot be deleted");
        }

        if !self
            .confirm
            .confirm("Delete this slot? This cannot be undone.")
            .await
        {
            return Ok(false);
        }

        match self.store.delete_slot(self.owner_id, slot_id).await {
            Ok(()) => {
                self.slots.retain(|s| s.id != slot_id);
                self.notifier.notify(NotifyKind::Success, "Slot deleted");
                Ok(true)
            }
            Err(err) => {
                self.notifier
                    .notify(NotifyKind::Error, &format!("Failed to delete slot: {err}"));
                Err(err)
            }
        }
    }

    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    pub fn set_show_booked(&mut self, show: bool) {
        self.show_booked = show;
    }

    pub fn set_day_filter(&mut self, day: Option<Weekday>) {
        self.day_filter = day;
    }

    pub fn set_sort_descending(&mut self, descending: bool) {
        self.sort_descending = descending;
    }

    /// Records a search keystroke. The filter only applies once the input has
    /// been quiet for the debounce period.
    pub fn set_search_input(&mut self, text: &str) {
        self.search.submit(text.to_string());
    }

    /// The displayed slot collection: booked-visibility toggle, settled
    /// search text, optional day filter, then `(weekday, start time)` sort.
    /// Pure over the in-memory set.
    pub fn visible_slots(&self) -> Vec<&TimeSlot> {
        let query = self.search.settled().trim().to_lowercase();

        let mut visible: Vec<&TimeSlot> = self
            .slots
            .iter()
            .filter(|slot| self.show_booked || !slot.is_booked)
            .filter(|slot| self.day_filter.is_none_or(|day| slot.day_of_week == day))
            .filter(|slot| {
                query.is_empty()
                    || slot.day_of_week.as_str().contains(&query)
                    || slot.start_time.to_lowercase().contains(&query)
                    || slot.end_time.to_lowercase().contains(&query)
            })
            .collect();

        if self.sort_descending {
            visible.sort_by_key(|slot| Reverse(sort_key(slot)));
        } else {
            visible.sort_by_key(|slot| sort_key(slot));
        }
        visible
    }

    /// Shared validation for create/update: capacity bounds, then the
    /// conflict checker. Reports and aborts before persistence on any hit.
    fn check_candidate(&self, draft: &SlotDraft, ignore: Option<Uuid>) -> SlotResult<()> {
        if let Err(err) = draft.validate_capacity() {
            self.notifier.notify(NotifyKind::Error, &err.to_string());
            return Err(err);
        }

        match find_conflicts(draft, &self.slots, ignore) {
            Err(err) => {
                self.notifier.notify(NotifyKind::Error, &err.to_string());
                Err(err)
            }
            Ok(conflicts) if !conflicts.is_empty() => {
                let day = draft.day_of_week.trim().to_lowercase();
                let message = conflict_message(conflicts.len(), &day);
                self.notifier.notify(NotifyKind::Error, &message);
                Err(SlotError::Conflict(message))
            }
            Ok(_) => Ok(()),
        }
    }

    fn require_slot(&self, slot_id: Uuid) -> SlotResult<&TimeSlot> {
        self.slots
            .iter()
            .find(|s| s.id == slot_id)
            .ok_or_else(|| SlotError::NotFound(format!("Slot {slot_id} is not in this schedule")))
    }

    fn refuse<T>(&self, message: &str) -> SlotResult<T> {
        self.notifier.notify(NotifyKind::Error, message);
        Err(SlotError::Validation(message.to_string()))
    }
}

/// Canonical ordering: Monday-first weekday index, then start minutes.
/// Unparsable start times sort last.
fn sort_key(slot: &TimeSlot) -> (usize, u32) {
    (
        slot.day_of_week.index(),
        parse_to_minutes(&slot.start_time).unwrap_or(u32::MAX),
    )
}
