//! Append-only completed-session log.
//!
//! # Responsibility
//! - Record finished sessions and answer range/total queries over them.
//!
//! # Invariants
//! - Sessions are only ever appended; there is no update or delete path.
//! - `performed_at` is stored as sortable ISO-8601 text, so date-range
//!   queries are plain string comparisons.

use super::{kind_to_db, parse_kind, parse_zones, zones_to_db, RepoError, RepoResult};
use crate::model::session::{SessionRecord, SessionStats};
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{params, Connection, Row};

const SESSION_SELECT_SQL: &str = "SELECT
    id,
    performed_at,
    kind,
    zones,
    duration_secs,
    shots,
    notes
FROM sessions";

const PERFORMED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Storage interface for the session log.
pub trait SessionRepository {
    /// Appends a record, returning its log row id.
    fn add_session(&self, record: &SessionRecord) -> RepoResult<i64>;
    /// All sessions in chronological order.
    fn list_sessions(&self) -> RepoResult<Vec<SessionRecord>>;
    /// Sessions performed within `[from, to]` (whole calendar days).
    fn sessions_in_range(&self, from: NaiveDate, to: NaiveDate) -> RepoResult<Vec<SessionRecord>>;
    /// Aggregate totals over the whole log.
    fn stats(&self) -> RepoResult<SessionStats>;
}

/// SQLite-backed session repository.
pub struct SqliteSessionRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSessionRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl SessionRepository for SqliteSessionRepository<'_> {
    fn add_session(&self, record: &SessionRecord) -> RepoResult<i64> {
        self.conn.execute(
            "INSERT INTO sessions (
                performed_at, kind, zones, duration_secs, shots, notes
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                record.performed_at.format(PERFORMED_AT_FORMAT).to_string(),
                kind_to_db(record.kind),
                zones_to_db(&record.zones),
                record.duration_secs,
                record.shots,
                record.notes.as_str(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn list_sessions(&self) -> RepoResult<Vec<SessionRecord>> {
        self.query_sessions(
            &format!("{SESSION_SELECT_SQL} ORDER BY performed_at ASC, id ASC;"),
            params![],
        )
    }

    fn sessions_in_range(&self, from: NaiveDate, to: NaiveDate) -> RepoResult<Vec<SessionRecord>> {
        // ISO text sorts chronologically, so day bounds are string bounds.
        let lower = format!("{from}T00:00:00");
        let upper = format!("{to}T23:59:59");
        self.query_sessions(
            &format!(
                "{SESSION_SELECT_SQL}
                 WHERE performed_at >= ?1 AND performed_at <= ?2
                 ORDER BY performed_at ASC, id ASC;"
            ),
            params![lower, upper],
        )
    }

    fn stats(&self) -> RepoResult<SessionStats> {
        let (count, total_secs, total_shots) = self.conn.query_row(
            "SELECT COUNT(*), COALESCE(SUM(duration_secs), 0), COALESCE(SUM(shots), 0)
             FROM sessions;",
            [],
            |row| {
                Ok((
                    row.get::<_, u32>(0)?,
                    row.get::<_, u64>(1)?,
                    row.get::<_, u64>(2)?,
                ))
            },
        )?;

        Ok(SessionStats {
            total_sessions: count,
            total_hours: (total_secs / 3600) as u32,
            total_shots,
        })
    }
}

impl SqliteSessionRepository<'_> {
    fn query_sessions<P: rusqlite::Params>(
        &self,
        sql: &str,
        params: P,
    ) -> RepoResult<Vec<SessionRecord>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut sessions = Vec::new();
        while let Some(row) = rows.next()? {
            sessions.push(parse_session_row(row)?);
        }
        Ok(sessions)
    }
}

fn parse_session_row(row: &Row<'_>) -> RepoResult<SessionRecord> {
    let performed_text: String = row.get("performed_at")?;
    let performed_at = NaiveDateTime::parse_from_str(&performed_text, PERFORMED_AT_FORMAT)
        .map_err(|_| {
            RepoError::InvalidData(format!(
                "invalid timestamp `{performed_text}` in sessions.performed_at"
            ))
        })?;

    let kind_text: String = row.get("kind")?;
    let kind = parse_kind(&kind_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid kind `{kind_text}` in sessions.kind"))
    })?;

    let zones_text: String = row.get("zones")?;

    Ok(SessionRecord {
        id: Some(row.get("id")?),
        performed_at,
        kind,
        zones: parse_zones(&zones_text)?,
        duration_secs: row.get("duration_secs")?,
        shots: row.get("shots")?,
        notes: row.get("notes")?,
    })
}
