//! The visitor/student booking form.
//!
//! Turns a `(teacher, slot)` pair plus user-entered identity data into a
//! booking claim. All field validation happens client-side before any
//! request is sent; the actual claim is arbitrated by the server, which is
//! the only party allowed to flip a slot's booked flag. A losing racer gets
//! the server's own "already booked" message, and the local slot snapshot is
//! never optimistically marked booked.

use regex::Regex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, LazyLock, Mutex};
use uuid::Uuid;

use slotbook_core::errors::{SlotError, SlotResult};
use slotbook_core::models::{Booking, BookingDraft, BookingStatus, TimeSlot, UserType};
use slotbook_core::ports::{BookingGateway, NotificationSink, NotifyKind, StudentDirectory};

use crate::debounce::{LOOKUP_DEBOUNCE, RestartableTimer};

/// Minimal `local@domain.tld` shape; real deliverability is not our problem.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// What the identity lookup currently knows about the entered number.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LookupState {
    #[default]
    Idle,
    Checking,
    /// Name on file, kept in full for the mismatch check. Display code must
    /// go through [`LookupDisplay`], which masks it.
    Found { full_name: String },
    NotFound,
    Failed,
}

/// The UI-facing projection of [`LookupState`]. The matched name only leaves
/// this module in masked form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupDisplay {
    Idle,
    Checking,
    Found { masked_name: String },
    NotFound,
    Failed,
}

/// User-entered form fields, raw and unvalidated.
#[derive(Debug, Clone, Default)]
pub struct BookingForm {
    pub user_type: Option<UserType>,
    pub student_number: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub education_level: String,
    /// Major options offered for the chosen education level; empty means the
    /// level has no major selection.
    pub available_majors: Vec<String>,
    pub major: String,
    pub notes: String,
    pub captcha_token: String,
}

/// A validation failure attached to one form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: &str) -> Self {
        Self {
            field,
            message: message.to_string(),
        }
    }
}

/// Booking intake workflow for one target slot.
pub struct BookingIntake<G, D, N> {
    gateway: G,
    directory: Arc<D>,
    notifier: N,
    teacher_id: Uuid,
    slot: TimeSlot,
    pub form: BookingForm,
    lookup: Arc<Mutex<LookupState>>,
    /// Monotonic guard: a lookup result is only applied if no newer input
    /// has been entered since it started.
    lookup_seq: Arc<AtomicU64>,
    lookup_timer: RestartableTimer,
    submitting: bool,
}

impl<G, D, N> BookingIntake<G, D, N>
where
    G: BookingGateway,
    D: StudentDirectory + 'static,
    N: NotificationSink,
{
    pub fn new(gateway: G, directory: Arc<D>, notifier: N, teacher_id: Uuid, slot: TimeSlot) -> Self {
        Self {
            gateway,
            directory,
            notifier,
            teacher_id,
            slot,
            form: BookingForm::default(),
            lookup: Arc::new(Mutex::new(LookupState::Idle)),
            lookup_seq: Arc::new(AtomicU64::new(0)),
            lookup_timer: RestartableTimer::new(LOOKUP_DEBOUNCE),
            submitting: false,
        }
    }

    pub fn slot(&self) -> &TimeSlot {
        &self.slot
    }

    /// Replaces the local slot snapshot after a re-fetch. This is the only
    /// way the intake ever learns that the slot became booked.
    pub fn refresh_slot(&mut self, slot: TimeSlot) {
        self.slot = slot;
    }

    pub fn lookup_display(&self) -> LookupDisplay {
        match &*self.lookup.lock().expect("lookup state lock") {
            LookupState::Idle => LookupDisplay::Idle,
            LookupState::Checking => LookupDisplay::Checking,
            LookupState::Found { full_name } => LookupDisplay::Found {
                masked_name: mask_name(full_name),
            },
            LookupState::NotFound => LookupDisplay::NotFound,
            LookupState::Failed => LookupDisplay::Failed,
        }
    }

    /// Records a student-number keystroke and (for student users with a
    /// non-empty number) schedules the debounced identity lookup. Each
    /// keystroke supersedes any pending or in-flight lookup.
    pub fn set_student_number(&mut self, value: &str) {
        self.form.student_number = value.to_string();
        let seq = self.lookup_seq.fetch_add(1, Ordering::SeqCst) + 1;

        if self.form.user_type != Some(UserType::Student) || value.trim().is_empty() {
            self.lookup_timer.cancel();
            *self.lookup.lock().expect("lookup state lock") = LookupState::Idle;
            return;
        }

        let directory = Arc::clone(&self.directory);
        let lookup = Arc::clone(&self.lookup);
        let guard = Arc::clone(&self.lookup_seq);
        let number = value.trim().to_string();

        self.lookup_timer.restart(async move {
            if guard.load(Ordering::SeqCst) != seq {
                return;
            }
            *lookup.lock().expect("lookup state lock") = LookupState::Checking;

            let outcome = directory.lookup_by_number(&number).await;

            // Discard stale responses for a since-changed input.
            if guard.load(Ordering::SeqCst) != seq {
                return;
            }
            *lookup.lock().expect("lookup state lock") = match outcome {
                Ok(Some(record)) => LookupState::Found {
                    full_name: record.full_name,
                },
                Ok(None) => LookupState::NotFound,
                Err(err) => {
                    tracing::warn!("student lookup failed: {err}");
                    LookupState::Failed
                }
            };
        });
    }

    /// All client-side validation, returned per-field so the form can render
    /// errors inline. Empty means the form may be submitted.
    pub fn field_errors(&self) -> Vec<FieldError> {
        let form = &self.form;
        let mut errors = Vec::new();

        if form.full_name.trim().is_empty() {
            errors.push(FieldError::new("fullName", "Full name is required"));
        }

        if form.user_type == Some(UserType::Student) {
            if form.student_number.trim().is_empty() {
                errors.push(FieldError::new("studentNumber", "Student number is required"));
            }
            if form.education_level.trim().is_empty() {
                errors.push(FieldError::new(
                    "educationLevel",
                    "Education level is required",
                ));
            }
        }

        if !EMAIL_RE.is_match(form.email.trim()) {
            errors.push(FieldError::new("email", "A valid email address is required"));
        }

        if !form.available_majors.is_empty() && form.major.trim().is_empty() {
            errors.push(FieldError::new("major", "Select a major"));
        }

        if form.notes.trim().is_empty() {
            errors.push(FieldError::new("notes", "Notes are required"));
        }

        if form.captcha_token.trim().is_empty() {
            errors.push(FieldError::new(
                "captcha",
                "Complete the verification challenge",
            ));
        }

        if let LookupState::Found { full_name } = &*self.lookup.lock().expect("lookup state lock") {
            let entered = form.full_name.trim();
            if !entered.is_empty() && !entered.eq_ignore_ascii_case(full_name.trim()) {
                errors.push(FieldError::new(
                    "fullName",
                    "Student number and name do not match",
                ));
            }
        }

        errors
    }

    /// Submits the claim. Blocked locally when the slot is already booked or
    /// any field error remains; otherwise the server decides. The busy flag
    /// is cleared on every path.
    pub async fn submit(&mut self) -> SlotResult<Booking> {
        if self.submitting {
            return Err(SlotError::Validation(
                "A submission is already in progress".to_string(),
            ));
        }

        if self.slot.is_booked {
            let message = "This slot is no longer available";
            self.notifier.notify(NotifyKind::Error, message);
            return Err(SlotError::AlreadyBooked(message.to_string()));
        }

        let errors = self.field_errors();
        if let Some(first) = errors.first() {
            self.notifier.notify(NotifyKind::Error, &first.message);
            return Err(SlotError::Validation(first.message.clone()));
        }

        let draft = self.build_draft();

        self.submitting = true;
        let result = self.gateway.create_booking(&draft).await;
        self.submitting = false;

        match result {
            Ok(booking) => {
                self.notifier
                    .notify(NotifyKind::Success, "Booking request sent");
                Ok(booking)
            }
            Err(SlotError::AlreadyBooked(message)) => {
                // Surface the server's own message; re-fetching the slot is
                // the only authoritative way to observe the new state.
                self.notifier.notify(NotifyKind::Error, &message);
                Err(SlotError::AlreadyBooked(message))
            }
            Err(err) => {
                tracing::error!("booking submission failed: {err}");
                self.notifier
                    .notify(NotifyKind::Error, "Something went wrong. Please try again.");
                Err(err)
            }
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Snapshot of the slot's times is taken here, at submission.
    fn build_draft(&self) -> BookingDraft {
        let form = &self.form;
        let student = form.user_type == Some(UserType::Student);
        BookingDraft {
            teacher_id: self.teacher_id,
            slot_id: self.slot.id,
            user_type: form.user_type.unwrap_or(UserType::Visitor),
            student_number: student.then(|| form.student_number.trim().to_string()),
            student_name: form.full_name.trim().to_string(),
            student_email: form.email.trim().to_string(),
            student_phone: non_empty(&form.phone),
            education_level: non_empty(&form.education_level),
            student_major: non_empty(&form.major),
            notes: form.notes.trim().to_string(),
            start_time: self.slot.start_time.clone(),
            end_time: self.slot.end_time.clone(),
            status: BookingStatus::Pending,
            captcha_token: form.captcha_token.clone(),
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Partially masks a matched name: the first two characters of each
/// whitespace-separated token are kept, the remainder is replaced with a
/// fixed `**`. `"Ahmet Yilmaz"` becomes `"Ah** Yi**"`.
pub fn mask_name(full_name: &str) -> String {
    full_name
        .split_whitespace()
        .map(|token| {
            let kept: String = token.chars().take(2).collect();
            if token.chars().count() > 2 {
                format!("{kept}**")
            } else {
                kept
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
