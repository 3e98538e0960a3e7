//! Deterministic treatment-calendar generation and phase queries.
//!
//! # Responsibility
//! - Map a start date and availability preference into the multi-phase
//!   event sequence (attack, transition, maintenance).
//! - Answer phase/next-event questions over the generated sequence.
//!
//! # Invariants
//! - Generation is deterministic: same inputs, same sequence.
//! - Events are produced in strictly increasing date order with unique dates.
//! - Lower-body sessions land on the nearest Saturday on/after the cursor;
//!   the upper-body session is the following day.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod dates;
pub mod engine;
pub mod phases;

/// Weeks of the attack phase (weekly cadence).
pub const ATTACK_WEEKS: u32 = 12;
/// Effective session weeks of the transition phase (fortnightly cadence).
pub const TRANSITION_WEEKS: u32 = 8;
/// Generated months of the maintenance phase.
pub const MAINTENANCE_MONTHS: u32 = 4;

/// Errors raised by calendar generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    /// The start date was missing or unparseable; no events are produced.
    InvalidStartDate(String),
}

impl Display for CalendarError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidStartDate(input) => {
                write!(f, "invalid start date `{input}`; expected YYYY-MM-DD")
            }
        }
    }
}

impl Error for CalendarError {}

/// Session availability preference.
///
/// `Weekend` is the only implemented cadence. Unknown configuration
/// values are accepted and fall back to weekend behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Availability {
    #[default]
    Weekend,
}

impl Availability {
    /// Parses a configuration value, falling back to `Weekend`.
    pub fn from_config_value(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "weekend" => Self::Weekend,
            _ => Self::Weekend,
        }
    }

    /// Stable configuration spelling of this preference.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Weekend => "weekend",
        }
    }
}
