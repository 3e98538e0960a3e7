//! Calendar event store: upsert-by-date persistence for generated events.
//!
//! # Responsibility
//! - Persist the generated sequence and record per-event completion.
//! - Support wholesale replacement when a schedule is regenerated.
//!
//! # Invariants
//! - `date` is the primary key; upserting an existing date replaces the row.
//! - Completion flips require an existing row (`EventNotFound` otherwise).

use super::{
    bool_to_int, kind_to_db, parse_db_bool, parse_db_date, parse_kind, parse_phase, parse_zones,
    phase_to_db, zones_to_db, RepoError, RepoResult,
};
use crate::calendar::dates::format_iso_date;
use crate::model::event::TreatmentEvent;
use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};

const EVENT_SELECT_SQL: &str = "SELECT
    date,
    kind,
    title,
    zones,
    phase,
    week_in_phase,
    completed,
    notes
FROM calendar_events";

/// Storage interface for the generated calendar.
pub trait EventRepository {
    /// Upserts the given events, returning the number written.
    fn upsert_events(&self, events: &[TreatmentEvent]) -> RepoResult<usize>;
    fn get_event(&self, date: NaiveDate) -> RepoResult<Option<TreatmentEvent>>;
    /// All persisted events in ascending date order.
    fn list_events(&self) -> RepoResult<Vec<TreatmentEvent>>;
    fn set_completed(&self, date: NaiveDate, completed: bool) -> RepoResult<()>;
    /// Dates of all events marked completed, for load-time reconciliation.
    fn completed_dates(&self) -> RepoResult<Vec<NaiveDate>>;
    /// Removes every persisted event (wholesale schedule regeneration).
    fn clear_events(&self) -> RepoResult<()>;
}

/// SQLite-backed event repository.
pub struct SqliteEventRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEventRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl EventRepository for SqliteEventRepository<'_> {
    fn upsert_events(&self, events: &[TreatmentEvent]) -> RepoResult<usize> {
        let mut stmt = self.conn.prepare(
            "INSERT INTO calendar_events (
                date, kind, title, zones, phase, week_in_phase, completed, notes
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ON CONFLICT(date) DO UPDATE SET
                kind = excluded.kind,
                title = excluded.title,
                zones = excluded.zones,
                phase = excluded.phase,
                week_in_phase = excluded.week_in_phase,
                completed = excluded.completed,
                notes = excluded.notes;",
        )?;

        for event in events {
            event.validate()?;
            stmt.execute(params![
                format_iso_date(event.date),
                kind_to_db(event.kind),
                event.title.as_str(),
                zones_to_db(&event.zones),
                phase_to_db(event.phase),
                event.week_in_phase,
                bool_to_int(event.completed),
                event.notes.as_str(),
            ])?;
        }

        Ok(events.len())
    }

    fn get_event(&self, date: NaiveDate) -> RepoResult<Option<TreatmentEvent>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EVENT_SELECT_SQL} WHERE date = ?1;"))?;

        let mut rows = stmt.query([format_iso_date(date)])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_event_row(row)?));
        }
        Ok(None)
    }

    fn list_events(&self) -> RepoResult<Vec<TreatmentEvent>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EVENT_SELECT_SQL} ORDER BY date ASC;"))?;

        let mut rows = stmt.query([])?;
        let mut events = Vec::new();
        while let Some(row) = rows.next()? {
            events.push(parse_event_row(row)?);
        }
        Ok(events)
    }

    fn set_completed(&self, date: NaiveDate, completed: bool) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE calendar_events SET completed = ?1 WHERE date = ?2;",
            params![bool_to_int(completed), format_iso_date(date)],
        )?;

        if changed == 0 {
            return Err(RepoError::EventNotFound(date));
        }
        Ok(())
    }

    fn completed_dates(&self) -> RepoResult<Vec<NaiveDate>> {
        let mut stmt = self.conn.prepare(
            "SELECT date FROM calendar_events WHERE completed = 1 ORDER BY date ASC;",
        )?;

        let mut rows = stmt.query([])?;
        let mut dates = Vec::new();
        while let Some(row) = rows.next()? {
            let text: String = row.get(0)?;
            dates.push(parse_db_date(&text, "calendar_events.date")?);
        }
        Ok(dates)
    }

    fn clear_events(&self) -> RepoResult<()> {
        self.conn.execute("DELETE FROM calendar_events;", [])?;
        Ok(())
    }
}

fn parse_event_row(row: &Row<'_>) -> RepoResult<TreatmentEvent> {
    let date_text: String = row.get("date")?;
    let date = parse_db_date(&date_text, "calendar_events.date")?;

    let kind_text: String = row.get("kind")?;
    let kind = parse_kind(&kind_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid kind `{kind_text}` in calendar_events.kind"))
    })?;

    let phase_text: String = row.get("phase")?;
    let phase = parse_phase(&phase_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid phase `{phase_text}` in calendar_events.phase"
        ))
    })?;

    let zones_text: String = row.get("zones")?;
    let completed = parse_db_bool(row.get("completed")?, "calendar_events.completed")?;

    let event = TreatmentEvent {
        date,
        kind,
        title: row.get("title")?,
        zones: parse_zones(&zones_text)?,
        phase,
        week_in_phase: row.get("week_in_phase")?,
        completed,
        notes: row.get("notes")?,
    };
    event.validate()?;
    Ok(event)
}
