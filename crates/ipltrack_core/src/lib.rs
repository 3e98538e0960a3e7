//! Core domain logic for the IPL treatment tracker.
//! This crate is the single source of truth for schedule invariants.

pub mod calendar;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod uv;

pub use calendar::engine::{CalendarEngine, PhaseStatus};
pub use calendar::{Availability, CalendarError};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::event::{EventKind, EventValidationError, Phase, TreatmentEvent, Zone};
pub use model::session::{estimate_shots, SessionRecord, SessionStats};
pub use repo::config_repo::{ConfigRepository, SqliteConfigRepository};
pub use repo::event_repo::{EventRepository, SqliteEventRepository};
pub use repo::session_repo::{SessionRepository, SqliteSessionRepository};
pub use repo::{RepoError, RepoResult};
pub use service::schedule_service::{ScheduleError, ScheduleService};
pub use service::session_service::{CompleteSessionRequest, SessionError, SessionService};
pub use uv::{CachedUvIndex, UvError, UvForecastDay, UvLevel, UvProvider, UvReading};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
