//! Employee event repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist absence/training events and answer the range/guard queries
//!   used by the admission and termination services.
//! - Provide the per-store write-serialization scope for read-decide-write
//!   sequences.
//!
//! # Invariants
//! - Overlap queries use the inclusive predicate
//!   `date_end >= ?start AND date_start <= ?end`.
//! - `delete_future_leave_and_day_off` never touches training events.

use crate::model::employee::EmployeeId;
use crate::model::event::{EmployeeEvent, EventId, EventKind};
use crate::repo::{ensure_schema_ready, parse_uuid, RepoError, RepoResult};
use chrono::NaiveDate;
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};

const EVENT_SELECT_SQL: &str = "SELECT
    event_uuid,
    employee_uuid,
    category_id,
    date_start,
    date_end,
    reason
FROM employee_events";

/// Repository interface for employee events.
pub trait EventRepository {
    /// Persists one event.
    fn insert(&self, event: &EmployeeEvent) -> RepoResult<EventId>;
    /// Lists all events of one employee ordered by start date.
    fn list_for_employee(&self, employee_uuid: EmployeeId) -> RepoResult<Vec<EmployeeEvent>>;
    /// Lists events of one employee overlapping the inclusive range.
    fn find_overlapping(
        &self,
        employee_uuid: EmployeeId,
        date_start: NaiveDate,
        date_end: NaiveDate,
    ) -> RepoResult<Vec<EmployeeEvent>>;
    /// Returns whether a training event starts strictly after `as_of`.
    fn has_future_training(&self, employee_uuid: EmployeeId, as_of: NaiveDate) -> RepoResult<bool>;
    /// Deletes leave/day-off events starting strictly after `as_of`.
    /// Returns the number of removed events.
    fn delete_future_leave_and_day_off(
        &self,
        employee_uuid: EmployeeId,
        as_of: NaiveDate,
    ) -> RepoResult<usize>;

    /// Runs `f` as one atomic read-decide-write unit.
    ///
    /// The default implementation provides no isolation; persistent
    /// implementations override it with a write transaction so that racing
    /// admissions/terminations on the same store serialize.
    fn exclusive<T, E>(&self, f: impl FnOnce(&Self) -> Result<T, E>) -> Result<T, E>
    where
        Self: Sized,
        E: From<RepoError>,
    {
        f(self)
    }
}

/// SQLite-backed event repository.
pub struct SqliteEventRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEventRepository<'conn> {
    /// Creates a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_ready(conn)?;
        Ok(Self { conn })
    }
}

impl EventRepository for SqliteEventRepository<'_> {
    fn insert(&self, event: &EmployeeEvent) -> RepoResult<EventId> {
        self.conn.execute(
            "INSERT INTO employee_events (
                event_uuid,
                employee_uuid,
                category_id,
                date_start,
                date_end,
                reason
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                event.event_uuid.to_string(),
                event.employee_uuid.to_string(),
                event.kind.category_id(),
                event.date_start,
                event.date_end,
                event.reason.as_deref(),
            ],
        )?;
        Ok(event.event_uuid)
    }

    fn list_for_employee(&self, employee_uuid: EmployeeId) -> RepoResult<Vec<EmployeeEvent>> {
        let mut stmt = self.conn.prepare(&format!(
            "{EVENT_SELECT_SQL}
             WHERE employee_uuid = ?1
             ORDER BY date_start ASC, event_uuid ASC;"
        ))?;
        let mut rows = stmt.query([employee_uuid.to_string()])?;
        collect_event_rows(&mut rows)
    }

    fn find_overlapping(
        &self,
        employee_uuid: EmployeeId,
        date_start: NaiveDate,
        date_end: NaiveDate,
    ) -> RepoResult<Vec<EmployeeEvent>> {
        let mut stmt = self.conn.prepare(&format!(
            "{EVENT_SELECT_SQL}
             WHERE employee_uuid = ?1
               AND date_end >= ?2
               AND date_start <= ?3
             ORDER BY date_start ASC, event_uuid ASC;"
        ))?;
        let mut rows = stmt.query(params![employee_uuid.to_string(), date_start, date_end])?;
        collect_event_rows(&mut rows)
    }

    fn has_future_training(&self, employee_uuid: EmployeeId, as_of: NaiveDate) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM employee_events
                WHERE employee_uuid = ?1
                  AND category_id = ?2
                  AND date_start > ?3
            );",
            params![
                employee_uuid.to_string(),
                EventKind::Training.category_id(),
                as_of
            ],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn delete_future_leave_and_day_off(
        &self,
        employee_uuid: EmployeeId,
        as_of: NaiveDate,
    ) -> RepoResult<usize> {
        let removed = self.conn.execute(
            "DELETE FROM employee_events
             WHERE employee_uuid = ?1
               AND date_start > ?2
               AND category_id IN (?3, ?4);",
            params![
                employee_uuid.to_string(),
                as_of,
                EventKind::Leave.category_id(),
                EventKind::DayOff.category_id(),
            ],
        )?;
        Ok(removed)
    }

    fn exclusive<T, E>(&self, f: impl FnOnce(&Self) -> Result<T, E>) -> Result<T, E>
    where
        E: From<RepoError>,
    {
        // Immediate mode takes the write lock up front, so the whole
        // read-decide-write unit serializes against other writers.
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)
            .map_err(|err| E::from(RepoError::from(err)))?;
        let value = f(self)?;
        tx.commit().map_err(|err| E::from(RepoError::from(err)))?;
        Ok(value)
    }
}

fn collect_event_rows(rows: &mut rusqlite::Rows<'_>) -> RepoResult<Vec<EmployeeEvent>> {
    let mut events = Vec::new();
    while let Some(row) = rows.next()? {
        events.push(parse_event_row(row)?);
    }
    Ok(events)
}

fn parse_event_row(row: &Row<'_>) -> RepoResult<EmployeeEvent> {
    let event_text: String = row.get("event_uuid")?;
    let employee_text: String = row.get("employee_uuid")?;

    let category_id: i64 = row.get("category_id")?;
    let kind = EventKind::from_category_id(category_id).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid category id `{category_id}` in employee_events.category_id"
        ))
    })?;

    Ok(EmployeeEvent {
        event_uuid: parse_uuid(&event_text, "employee_events.event_uuid")?,
        employee_uuid: parse_uuid(&employee_text, "employee_events.employee_uuid")?,
        kind,
        date_start: row.get("date_start")?,
        date_end: row.get("date_end")?,
        reason: row.get("reason")?,
    })
}
