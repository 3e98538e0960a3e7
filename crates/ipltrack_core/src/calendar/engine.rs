//! Calendar engine: merged event sequence and phase queries.
//!
//! # Responsibility
//! - Orchestrate the three phase generators into one ordered sequence.
//! - Answer by-date, next-pending, month and current-phase queries.
//!
//! # Invariants
//! - The sequence is sorted ascending by date with no duplicate dates.
//! - The engine is the single owner of its in-memory sequence; persisted
//!   completion state is reconciled in by the caller, not by the engine.
//! - `current_phase` is a pure elapsed-time projection and may disagree
//!   with actual completion progress. That gap is accepted behavior.

use super::dates::parse_iso_date;
use super::{phases, Availability, CalendarError, ATTACK_WEEKS, TRANSITION_WEEKS};
use crate::model::event::{Phase, TreatmentEvent};
use chrono::{Datelike, NaiveDate};
use std::collections::HashMap;

/// Elapsed-time phase projection returned by [`CalendarEngine::current_phase`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseStatus {
    pub phase: Phase,
    /// 1-based week within the phase. Signed because a reference date
    /// before the start date projects to weeks below 1; maintenance
    /// always reports 0.
    pub week_in_phase: i64,
    /// Total weeks of the phase; 0 means open-ended (maintenance).
    pub total_weeks: u32,
}

/// Owns the generated sequence for the lifetime of the loaded schedule.
#[derive(Debug, Clone)]
pub struct CalendarEngine {
    start_date: NaiveDate,
    availability: Availability,
    events: Vec<TreatmentEvent>,
    by_date: HashMap<NaiveDate, usize>,
}

impl CalendarEngine {
    /// Generates the full multi-phase sequence from a start date.
    pub fn new(start_date: NaiveDate, availability: Availability) -> Self {
        let mut events = phases::attack_events(start_date);
        events.extend(phases::transition_events(start_date));
        events.extend(phases::maintenance_events(start_date));

        debug_assert!(
            events.windows(2).all(|pair| pair[0].date < pair[1].date),
            "generated sequence must be strictly increasing by date"
        );

        let by_date = events
            .iter()
            .enumerate()
            .map(|(index, event)| (event.date, index))
            .collect();

        Self {
            start_date,
            availability,
            events,
            by_date,
        }
    }

    /// Parses raw configuration values and generates the sequence.
    ///
    /// Fails fast with [`CalendarError::InvalidStartDate`] before any
    /// events are produced. Unknown availability values fall back to
    /// weekend cadence.
    pub fn from_config(start_date: &str, availability: &str) -> Result<Self, CalendarError> {
        let start = parse_iso_date(start_date)?;
        Ok(Self::new(start, Availability::from_config_value(availability)))
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn availability(&self) -> Availability {
        self.availability
    }

    /// The full generated sequence in date order.
    pub fn events(&self) -> &[TreatmentEvent] {
        &self.events
    }

    /// Exact-date lookup; no fuzzy or nearest matching.
    pub fn event_on_date(&self, date: NaiveDate) -> Option<&TreatmentEvent> {
        self.by_date.get(&date).map(|&index| &self.events[index])
    }

    /// First not-completed event on or after `reference`.
    ///
    /// `None` means the horizon is exhausted or everything left is done;
    /// callers render that as "no upcoming session", not as an error.
    pub fn next_pending_event(&self, reference: NaiveDate) -> Option<&TreatmentEvent> {
        self.events
            .iter()
            .find(|event| event.date >= reference && !event.completed)
    }

    /// Events whose date falls in the given calendar year and month (1-12).
    pub fn events_in_month(&self, year: i32, month: u32) -> Vec<&TreatmentEvent> {
        self.events
            .iter()
            .filter(|event| event.date.year() == year && event.date.month() == month)
            .collect()
    }

    /// Projects the current phase from whole weeks elapsed since the
    /// start date, independent of the event list and of completion state.
    pub fn current_phase(&self, today: NaiveDate) -> PhaseStatus {
        let elapsed_days = (today - self.start_date).num_days();
        let weeks = elapsed_days.div_euclid(7);

        if weeks < i64::from(ATTACK_WEEKS) {
            PhaseStatus {
                phase: Phase::Attack,
                week_in_phase: weeks + 1,
                total_weeks: ATTACK_WEEKS,
            }
        } else if weeks < i64::from(ATTACK_WEEKS + TRANSITION_WEEKS) {
            PhaseStatus {
                phase: Phase::Transition,
                week_in_phase: weeks - i64::from(ATTACK_WEEKS) + 1,
                total_weeks: TRANSITION_WEEKS,
            }
        } else {
            PhaseStatus {
                phase: Phase::Maintenance,
                week_in_phase: 0,
                total_weeks: 0,
            }
        }
    }

    /// Flips the in-memory completed flag for the event on `date`.
    ///
    /// Returns `false` when no event exists on that date. Durable state
    /// is the event store's concern.
    pub fn mark_completed(&mut self, date: NaiveDate) -> bool {
        match self.by_date.get(&date) {
            Some(&index) => {
                self.events[index].completed = true;
                true
            }
            None => false,
        }
    }

    /// Reconciles persisted completion flags into the in-memory copy.
    ///
    /// Dates without a matching event are ignored; the store may hold
    /// rows from an older, regenerated schedule.
    pub fn apply_completed<I>(&mut self, dates: I)
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        for date in dates {
            self.mark_completed(date);
        }
    }
}
