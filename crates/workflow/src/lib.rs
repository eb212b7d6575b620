//! # Slotbook Workflow
//!
//! Client-side orchestration for the two interactive flows of the service:
//! the instructor's availability editor and the visitor/student booking
//! intake. Both sit on top of the pure core (time arithmetic, conflict
//! checking) and talk to the outside world exclusively through the port
//! traits in `slotbook-core::ports`, so every flow is testable against
//! in-memory fakes.
//!
//! Everything here is single-writer: workflow methods take `&mut self`, so a
//! conflict check always reads a consistent snapshot of the slot set. The
//! only background work is debounce timers, which never touch workflow state
//! directly; they publish through watch channels or guarded shared cells.

pub mod debounce;
pub mod editor;
pub mod intake;

use slotbook_core::ports::{NotificationSink, NotifyKind};

/// Default sink: routes user-facing outcomes to the tracing log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl NotificationSink for TracingNotifier {
    fn notify(&self, kind: NotifyKind, message: &str) {
        match kind {
            NotifyKind::Success => tracing::info!(target: "slotbook::notify", "{message}"),
            NotifyKind::Warning => tracing::warn!(target: "slotbook::notify", "{message}"),
            NotifyKind::Error => tracing::error!(target: "slotbook::notify", "{message}"),
        }
    }
}
