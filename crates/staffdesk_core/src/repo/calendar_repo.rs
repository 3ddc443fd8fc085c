//! Working-calendar override repository.
//!
//! # Responsibility
//! - Persist the per-date override list of the production calendar.
//!
//! # Invariants
//! - Dates without an override entry are working days (default-open).

use crate::repo::{ensure_schema_ready, RepoResult};
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};

/// Repository interface for working-calendar overrides.
pub trait CalendarRepository {
    /// Returns the override flag for one date, if any.
    ///
    /// `Some(true)` marks an explicit working day, `Some(false)` a
    /// non-working day, `None` means no override (treated as working).
    fn find_override(&self, date: NaiveDate) -> RepoResult<Option<bool>>;
    /// Inserts or replaces the override for one date.
    fn set_override(&self, date: NaiveDate, is_working_day: bool) -> RepoResult<()>;
}

/// SQLite-backed calendar repository.
pub struct SqliteCalendarRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCalendarRepository<'conn> {
    /// Creates a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_ready(conn)?;
        Ok(Self { conn })
    }
}

impl CalendarRepository for SqliteCalendarRepository<'_> {
    fn find_override(&self, date: NaiveDate) -> RepoResult<Option<bool>> {
        let value: Option<i64> = self
            .conn
            .query_row(
                "SELECT is_working_day
                 FROM working_calendar
                 WHERE exception_date = ?1;",
                params![date],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value.map(|flag| flag != 0))
    }

    fn set_override(&self, date: NaiveDate, is_working_day: bool) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO working_calendar (exception_date, is_working_day)
             VALUES (?1, ?2)
             ON CONFLICT(exception_date) DO UPDATE SET is_working_day = excluded.is_working_day;",
            params![date, i64::from(is_working_day)],
        )?;
        Ok(())
    }
}
