//! Schedule lifecycle service: onboarding, regeneration and load.
//!
//! # Responsibility
//! - Persist onboarding configuration and the generated sequence.
//! - Rebuild the engine on load and reconcile persisted completion flags
//!   into the in-memory copy.
//!
//! # Invariants
//! - Regeneration discards the previous persisted sequence wholesale;
//!   there is no incremental merge of old and new schedules.
//! - An invalid start date fails before any configuration or events are
//!   written.

use crate::calendar::dates::format_iso_date;
use crate::calendar::engine::CalendarEngine;
use crate::calendar::CalendarError;
use crate::repo::config_repo::{
    ConfigRepository, CONFIG_AVAILABILITY, CONFIG_FIRST_TIME, CONFIG_START_DATE,
};
use crate::repo::event_repo::EventRepository;
use crate::repo::RepoError;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from schedule lifecycle operations.
#[derive(Debug)]
pub enum ScheduleError {
    Calendar(CalendarError),
    Repo(RepoError),
}

impl Display for ScheduleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Calendar(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ScheduleError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Calendar(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<CalendarError> for ScheduleError {
    fn from(value: CalendarError) -> Self {
        Self::Calendar(value)
    }
}

impl From<RepoError> for ScheduleError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Use-case service for creating and loading the treatment plan.
pub struct ScheduleService<E: EventRepository, C: ConfigRepository> {
    events: E,
    config: C,
}

impl<E: EventRepository, C: ConfigRepository> ScheduleService<E, C> {
    pub fn new(events: E, config: C) -> Self {
        Self { events, config }
    }

    /// Starts (or restarts) a treatment plan from raw onboarding input.
    ///
    /// Generates the full sequence, persists the configuration and
    /// replaces any previously stored events wholesale. Returns the live
    /// engine for immediate querying.
    pub fn start_plan(
        &self,
        start_date: &str,
        availability: &str,
    ) -> Result<CalendarEngine, ScheduleError> {
        let engine = CalendarEngine::from_config(start_date, availability)?;

        self.config
            .set(CONFIG_START_DATE, &format_iso_date(engine.start_date()))?;
        self.config
            .set(CONFIG_AVAILABILITY, engine.availability().as_str())?;
        self.config.set(CONFIG_FIRST_TIME, "false")?;

        self.events.clear_events()?;
        let written = self.events.upsert_events(engine.events())?;

        info!(
            "event=plan_started module=service status=ok start_date={} events={written}",
            engine.start_date()
        );
        Ok(engine)
    }

    /// Loads the plan from stored configuration.
    ///
    /// Returns `Ok(None)` when onboarding has not happened yet. The
    /// returned engine has persisted `completed` flags reconciled into
    /// its in-memory sequence.
    pub fn load_plan(&self) -> Result<Option<CalendarEngine>, ScheduleError> {
        let Some(start_date) = self.config.get(CONFIG_START_DATE)? else {
            return Ok(None);
        };
        let availability = self
            .config
            .get(CONFIG_AVAILABILITY)?
            .unwrap_or_else(|| "weekend".to_string());

        let mut engine = CalendarEngine::from_config(&start_date, &availability)?;
        let completed = self.events.completed_dates()?;
        let reconciled = completed.len();
        engine.apply_completed(completed);

        info!(
            "event=plan_loaded module=service status=ok start_date={} completed={reconciled}",
            engine.start_date()
        );
        Ok(Some(engine))
    }
}
