//! Domain model for the treatment tracker.
//!
//! # Responsibility
//! - Define the canonical calendar-event record shared by the engine,
//!   the persistence layer and the session workflow.
//! - Define the completed-session log record and its derived totals.
//!
//! # Invariants
//! - Every calendar event is identified by its unique calendar date.
//! - A `rest` event carries no zones; every session event carries at least one.

pub mod event;
pub mod session;
