//! Persistence repositories over the SQLite schema.
//!
//! # Responsibility
//! - Provide stable storage APIs for calendar events, user configuration
//!   and the completed-session log.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Write paths validate domain records before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::DbError;
use crate::model::event::{EventKind, EventValidationError, Phase, Zone};
use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod config_repo;
pub mod event_repo;
pub mod session_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(EventValidationError),
    Db(DbError),
    /// No calendar event exists on the given date.
    EventNotFound(NaiveDate),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::EventNotFound(date) => write!(f, "no calendar event on {date}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::EventNotFound(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<EventValidationError> for RepoError {
    fn from(value: EventValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

pub(crate) fn kind_to_db(kind: EventKind) -> &'static str {
    match kind {
        EventKind::Rest => "rest",
        EventKind::Legs => "legs",
        EventKind::Torso => "torso",
        EventKind::TorsoShoulders => "torso_shoulders",
    }
}

pub(crate) fn parse_kind(value: &str) -> Option<EventKind> {
    match value {
        "rest" => Some(EventKind::Rest),
        "legs" => Some(EventKind::Legs),
        "torso" => Some(EventKind::Torso),
        "torso_shoulders" => Some(EventKind::TorsoShoulders),
        _ => None,
    }
}

pub(crate) fn phase_to_db(phase: Phase) -> &'static str {
    match phase {
        Phase::Attack => "attack",
        Phase::Transition => "transition",
        Phase::Maintenance => "maintenance",
    }
}

pub(crate) fn parse_phase(value: &str) -> Option<Phase> {
    match value {
        "attack" => Some(Phase::Attack),
        "transition" => Some(Phase::Transition),
        "maintenance" => Some(Phase::Maintenance),
        _ => None,
    }
}

pub(crate) fn zone_to_db(zone: Zone) -> &'static str {
    match zone {
        Zone::Legs => "legs",
        Zone::Glutes => "glutes",
        Zone::Chest => "chest",
        Zone::Abdomen => "abdomen",
        Zone::Shoulders => "shoulders",
        Zone::ShouldersGraded => "shoulders_graded",
    }
}

pub(crate) fn parse_zone(value: &str) -> Option<Zone> {
    match value {
        "legs" => Some(Zone::Legs),
        "glutes" => Some(Zone::Glutes),
        "chest" => Some(Zone::Chest),
        "abdomen" => Some(Zone::Abdomen),
        "shoulders" => Some(Zone::Shoulders),
        "shoulders_graded" => Some(Zone::ShouldersGraded),
        _ => None,
    }
}

/// Encodes an ordered zone list as a comma-joined column value.
pub(crate) fn zones_to_db(zones: &[Zone]) -> String {
    zones
        .iter()
        .map(|zone| zone_to_db(*zone))
        .collect::<Vec<_>>()
        .join(",")
}

pub(crate) fn parse_zones(value: &str) -> RepoResult<Vec<Zone>> {
    if value.is_empty() {
        return Ok(Vec::new());
    }
    value
        .split(',')
        .map(|code| {
            parse_zone(code).ok_or_else(|| {
                RepoError::InvalidData(format!("invalid zone code `{code}` in zones column"))
            })
        })
        .collect()
}

pub(crate) fn parse_db_date(value: &str, column: &str) -> RepoResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| RepoError::InvalidData(format!("invalid date `{value}` in {column}")))
}

pub(crate) fn parse_db_bool(value: i64, column: &str) -> RepoResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RepoError::InvalidData(format!(
            "invalid boolean value `{other}` in {column}"
        ))),
    }
}

pub(crate) fn bool_to_int(value: bool) -> i64 {
    i64::from(value)
}
