//! Treatment event domain model.
//!
//! # Responsibility
//! - Define the canonical record for one dated calendar entry.
//! - Derive the human title deterministically from the event kind.
//!
//! # Invariants
//! - `date` is the unique key of an event within a generated sequence.
//! - `zones` is non-empty exactly when `kind != Rest`.
//! - `completed` starts `false` and is flipped only by the session workflow.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Kind of a scheduled calendar entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Rest day, no zones are treated.
    Rest,
    /// Lower-body session (Saturday slot).
    Legs,
    /// Upper-body session without shoulders (Sunday slot).
    Torso,
    /// Upper-body session including shoulders (Sunday slot, periodic).
    TorsoShoulders,
}

impl EventKind {
    /// Derives the display title, with the maintenance-variant suffix.
    pub fn title(self, maintenance: bool) -> String {
        let base = match self {
            Self::Rest => "Rest",
            Self::Legs => "Lower Body",
            Self::Torso => "Torso",
            Self::TorsoShoulders => "Torso + Shoulders",
        };
        if maintenance && self != Self::Rest {
            format!("{base} (Maintenance)")
        } else {
            base.to_string()
        }
    }
}

/// Treatment phase that produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// 12 weekly session weeks.
    Attack,
    /// 8 effective session weeks at fortnightly cadence.
    Transition,
    /// Open-ended monthly upkeep; only 4 months are generated.
    Maintenance,
}

impl Phase {
    /// Stable display name used by dashboards and logs.
    pub fn name(self) -> &'static str {
        match self {
            Self::Attack => "Attack",
            Self::Transition => "Transition",
            Self::Maintenance => "Maintenance",
        }
    }
}

/// Body region targeted by a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    Legs,
    Glutes,
    Chest,
    Abdomen,
    Shoulders,
    /// Shoulders treated in the device's graded/fade mode (attack phase).
    ShouldersGraded,
}

impl Zone {
    /// Human label shown in checklists and event details.
    pub fn label(self) -> &'static str {
        match self {
            Self::Legs => "Legs",
            Self::Glutes => "Glutes",
            Self::Chest => "Chest",
            Self::Abdomen => "Abdomen",
            Self::Shoulders => "Shoulders",
            Self::ShouldersGraded => "Shoulders (graded)",
        }
    }
}

/// Validation failures for a treatment event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventValidationError {
    /// A session event must target at least one zone.
    MissingZones(EventKind),
    /// A rest event must not carry zones.
    RestWithZones,
}

impl Display for EventValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingZones(kind) => {
                write!(f, "session event of kind {kind:?} has no zones")
            }
            Self::RestWithZones => write!(f, "rest event must not carry zones"),
        }
    }
}

impl Error for EventValidationError {}

/// One scheduled calendar entry.
///
/// The wire shape uses camelCase field names and the ISO `YYYY-MM-DD`
/// date string, matching the exported-data format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreatmentEvent {
    /// Unique key of the event within a generated sequence.
    pub date: NaiveDate,
    pub kind: EventKind,
    /// Derived from `kind`; stored so persisted rows stay self-describing.
    pub title: String,
    /// Ordered treated zones; empty for rest days.
    pub zones: Vec<Zone>,
    pub phase: Phase,
    /// 1-based week counter within the owning phase. `0` for
    /// phase-transition rest markers and for maintenance events.
    pub week_in_phase: u32,
    pub completed: bool,
    /// Free-form guidance, may be empty.
    pub notes: String,
}

impl TreatmentEvent {
    /// Creates a session event with the title derived from its kind.
    pub fn session(
        date: NaiveDate,
        kind: EventKind,
        zones: Vec<Zone>,
        phase: Phase,
        week_in_phase: u32,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            date,
            kind,
            title: kind.title(phase == Phase::Maintenance),
            zones,
            phase,
            week_in_phase,
            completed: false,
            notes: notes.into(),
        }
    }

    /// Creates a rest-day event.
    pub fn rest(
        date: NaiveDate,
        phase: Phase,
        week_in_phase: u32,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            date,
            kind: EventKind::Rest,
            title: EventKind::Rest.title(false),
            zones: Vec::new(),
            phase,
            week_in_phase,
            completed: false,
            notes: notes.into(),
        }
    }

    /// Checks the zones/kind invariant.
    pub fn validate(&self) -> Result<(), EventValidationError> {
        match self.kind {
            EventKind::Rest if !self.zones.is_empty() => Err(EventValidationError::RestWithZones),
            EventKind::Rest => Ok(()),
            kind if self.zones.is_empty() => Err(EventValidationError::MissingZones(kind)),
            _ => Ok(()),
        }
    }
}
