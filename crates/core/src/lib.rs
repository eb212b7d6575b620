//! # Slotbook Core
//!
//! Domain layer for the Slotbook availability and booking service. This crate
//! is pure: it defines the slot/booking data model, wall-clock time
//! arithmetic, the overlap/conflict checker used whenever an instructor edits
//! their weekly schedule, and the derivation logic that turns a flat slot
//! list into a per-weekday view.
//!
//! It also defines the collaborator ports (persistence, student directory,
//! notification sink) that the workflow crate consumes. The core performs no
//! I/O itself; everything here is unit-testable in isolation.

pub mod conflict;
pub mod errors;
pub mod models;
pub mod ports;
pub mod schedule_view;
pub mod time;
