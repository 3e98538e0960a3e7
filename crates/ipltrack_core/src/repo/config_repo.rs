//! Key-value configuration store.
//!
//! # Responsibility
//! - Persist onboarding choices (start date, availability) and app flags.
//!
//! # Invariants
//! - `set` overwrites silently; configuration keys are last-writer-wins.

use super::RepoResult;
use rusqlite::{params, Connection, OptionalExtension};

/// Start date of the treatment plan, ISO `YYYY-MM-DD`.
pub const CONFIG_START_DATE: &str = "start_date";
/// Session availability preference (`weekend`).
pub const CONFIG_AVAILABILITY: &str = "availability";
/// Whether onboarding has never completed (`true`/`false`).
pub const CONFIG_FIRST_TIME: &str = "first_time";

/// Storage interface for user configuration.
pub trait ConfigRepository {
    fn get(&self, key: &str) -> RepoResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> RepoResult<()>;
    /// All key-value pairs, sorted by key.
    fn get_all(&self) -> RepoResult<Vec<(String, String)>>;
}

/// SQLite-backed configuration repository.
pub struct SqliteConfigRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteConfigRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ConfigRepository for SqliteConfigRepository<'_> {
    fn get(&self, key: &str) -> RepoResult<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM config WHERE key = ?1;", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO config (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value;",
            params![key, value],
        )?;
        Ok(())
    }

    fn get_all(&self) -> RepoResult<Vec<(String, String)>> {
        let mut stmt = self
            .conn
            .prepare("SELECT key, value FROM config ORDER BY key ASC;")?;

        let mut rows = stmt.query([])?;
        let mut pairs = Vec::new();
        while let Some(row) = rows.next()? {
            pairs.push((row.get(0)?, row.get(1)?));
        }
        Ok(pairs)
    }
}
