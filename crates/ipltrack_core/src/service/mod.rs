//! Use-case services composing the engine with persistence.
//!
//! # Responsibility
//! - Own the in-memory-engine vs durable-store reconciliation the engine
//!   itself deliberately does not perform.
//! - Keep service APIs storage-agnostic behind repository traits.

pub mod schedule_service;
pub mod session_service;
