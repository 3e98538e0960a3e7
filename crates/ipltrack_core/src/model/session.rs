//! Completed-session log model.
//!
//! # Responsibility
//! - Define the append-only record written when a session is finished.
//! - Provide the shot-count estimate used when the device counter is
//!   not captured.
//!
//! # Invariants
//! - Session records are never deleted or rewritten once logged.
//! - `shots` is an estimate derived from the treated zones.

use crate::model::event::{EventKind, Zone};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One completed session as written to the append-only log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    /// Log row id; `None` until persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Wall-clock moment the session was completed.
    pub performed_at: NaiveDateTime,
    /// Kind of the calendar event the session fulfilled.
    pub kind: EventKind,
    /// Zones actually treated, which may be a subset of the plan.
    pub zones: Vec<Zone>,
    pub duration_secs: u32,
    /// Estimated device shots fired across the treated zones.
    pub shots: u32,
    pub notes: String,
}

impl SessionRecord {
    /// Builds an unpersisted record with the shot estimate filled in.
    pub fn new(
        performed_at: NaiveDateTime,
        kind: EventKind,
        zones: Vec<Zone>,
        duration_secs: u32,
        notes: impl Into<String>,
    ) -> Self {
        let shots = estimate_shots(&zones);
        Self {
            id: None,
            performed_at,
            kind,
            zones,
            duration_secs,
            shots,
            notes: notes.into(),
        }
    }
}

/// Aggregate totals over the whole session log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionStats {
    pub total_sessions: u32,
    /// Whole hours of accumulated session time (floored).
    pub total_hours: u32,
    pub total_shots: u64,
}

/// Rough per-zone shot counts for the estimate shown in stats.
pub fn estimate_shots(zones: &[Zone]) -> u32 {
    zones
        .iter()
        .map(|zone| match zone {
            Zone::Legs => 150,
            Zone::Glutes => 40,
            Zone::Chest => 50,
            Zone::Abdomen => 60,
            Zone::Shoulders | Zone::ShouldersGraded => 30,
        })
        .sum()
}
