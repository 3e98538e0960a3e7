//! Session completion workflow.
//!
//! # Responsibility
//! - Turn a finished checklist into a session log entry and flip the
//!   event's completed flag in both the store and the live engine.
//!
//! # Invariants
//! - The durable flip and the in-memory flip happen together on the
//!   success path; the engine is never flipped for an unknown date.
//! - Rest days cannot be completed as sessions.

use crate::calendar::engine::CalendarEngine;
use crate::model::event::{EventKind, Zone};
use crate::model::session::{SessionRecord, SessionStats};
use crate::repo::event_repo::EventRepository;
use crate::repo::session_repo::SessionRepository;
use crate::repo::RepoError;
use chrono::{NaiveDate, NaiveDateTime};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Input from the finished session checklist.
#[derive(Debug, Clone, PartialEq)]
pub struct CompleteSessionRequest {
    /// Calendar date of the event being completed.
    pub date: NaiveDate,
    /// Wall-clock completion moment recorded in the log.
    pub performed_at: NaiveDateTime,
    /// Zones actually treated; may be a subset of the planned zones.
    pub treated_zones: Vec<Zone>,
    pub duration_secs: u32,
    pub notes: String,
}

/// Errors from the session completion workflow.
#[derive(Debug)]
pub enum SessionError {
    Repo(RepoError),
    /// No calendar event exists on the requested date.
    NoEventOnDate(NaiveDate),
    /// The event on the requested date is a rest day.
    RestDay(NaiveDate),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::NoEventOnDate(date) => write!(f, "no calendar event on {date}"),
            Self::RestDay(date) => write!(f, "cannot complete a rest day ({date})"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::NoEventOnDate(_) | Self::RestDay(_) => None,
        }
    }
}

impl From<RepoError> for SessionError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Use-case service for recording completed sessions.
pub struct SessionService<E: EventRepository, S: SessionRepository> {
    events: E,
    sessions: S,
}

impl<E: EventRepository, S: SessionRepository> SessionService<E, S> {
    pub fn new(events: E, sessions: S) -> Self {
        Self { events, sessions }
    }

    /// Completes the session scheduled on `request.date`.
    ///
    /// Appends a log record with the shot estimate, marks the persisted
    /// event completed and mirrors the flip into the live engine.
    /// Returns the new session log id.
    pub fn complete_session(
        &self,
        engine: &mut CalendarEngine,
        request: &CompleteSessionRequest,
    ) -> Result<i64, SessionError> {
        let kind = match engine.event_on_date(request.date) {
            None => return Err(SessionError::NoEventOnDate(request.date)),
            Some(event) if event.kind == EventKind::Rest => {
                return Err(SessionError::RestDay(request.date))
            }
            Some(event) => event.kind,
        };

        let record = SessionRecord::new(
            request.performed_at,
            kind,
            request.treated_zones.clone(),
            request.duration_secs,
            request.notes.clone(),
        );
        let session_id = self.sessions.add_session(&record)?;

        self.events.set_completed(request.date, true)?;
        engine.mark_completed(request.date);

        info!(
            "event=session_completed module=service status=ok date={} kind={:?} shots={} session_id={session_id}",
            request.date, kind, record.shots
        );
        Ok(session_id)
    }

    /// Aggregate totals over the whole session log.
    pub fn stats(&self) -> Result<SessionStats, SessionError> {
        Ok(self.sessions.stats()?)
    }
}
