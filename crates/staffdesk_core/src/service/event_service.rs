//! Event admission pipeline.
//!
//! # Responsibility
//! - Decide whether a proposed absence/training event may be recorded.
//! - Run the category conflict check and the working-calendar check, then
//!   persist accepted events.
//!
//! # Invariants
//! - `date_start <= date_end` is enforced here, once, before any lookup.
//! - Read-decide-write runs inside one `exclusive` scope; two racing
//!   admissions for the same employee cannot both pass the conflict check.
//! - The calendar walk scans start-to-end, so the earliest violating date
//!   is the one reported.

use crate::model::employee::EmployeeId;
use crate::model::event::{EmployeeEvent, EventKind};
use crate::repo::calendar_repo::CalendarRepository;
use crate::repo::employee_repo::EmployeeRepository;
use crate::repo::event_repo::EventRepository;
use crate::repo::RepoError;
use chrono::NaiveDate;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from the event admission pipeline.
#[derive(Debug)]
pub enum EventServiceError {
    /// Proposed range ends before it starts.
    InvalidDateRange {
        date_start: NaiveDate,
        date_end: NaiveDate,
    },
    /// Owning employee does not exist.
    EmployeeNotFound(EmployeeId),
    /// Proposed category may not overlap an existing event's category.
    Overlap {
        proposed: EventKind,
        existing: EventKind,
    },
    /// A day-off date falls on a non-working day.
    NonWorkingDay(NaiveDate),
    /// Repository-level failure.
    Repo(RepoError),
}

impl Display for EventServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDateRange {
                date_start,
                date_end,
            } => write!(f, "event range {date_start}..{date_end} ends before it starts"),
            Self::EmployeeNotFound(id) => write!(f, "employee not found: {id}"),
            Self::Overlap { proposed, existing } => write!(
                f,
                "{proposed} dates cannot overlap an existing {existing} event"
            ),
            Self::NonWorkingDay(date) => {
                write!(f, "day off cannot fall on a non-working day ({date})")
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for EventServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for EventServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Event admission service facade.
pub struct EventService<P, E, C>
where
    P: EmployeeRepository,
    E: EventRepository,
    C: CalendarRepository,
{
    employees: P,
    events: E,
    calendar: C,
}

impl<P, E, C> EventService<P, E, C>
where
    P: EmployeeRepository,
    E: EventRepository,
    C: CalendarRepository,
{
    /// Creates a service from repository implementations.
    ///
    /// All repositories must share one underlying store so the `exclusive`
    /// scope of the event repository covers every lookup in the pipeline.
    pub fn new(employees: P, events: E, calendar: C) -> Self {
        Self {
            employees,
            events,
            calendar,
        }
    }

    /// Validates and records one proposed event.
    ///
    /// Pipeline: range check, employee existence, category conflict matrix
    /// over overlapping events, working-calendar check (day-off only),
    /// insert. The first failing rule produces the rejection.
    pub fn create_event(
        &self,
        employee_uuid: EmployeeId,
        kind: EventKind,
        date_start: NaiveDate,
        date_end: NaiveDate,
        reason: Option<String>,
    ) -> Result<EmployeeEvent, EventServiceError> {
        if date_start > date_end {
            return Err(EventServiceError::InvalidDateRange {
                date_start,
                date_end,
            });
        }

        let event = self.events.exclusive(|events| {
            if self.employees.get(employee_uuid)?.is_none() {
                return Err(EventServiceError::EmployeeNotFound(employee_uuid));
            }

            for existing in events.find_overlapping(employee_uuid, date_start, date_end)? {
                if kind.conflicts_with(existing.kind) {
                    return Err(EventServiceError::Overlap {
                        proposed: kind,
                        existing: existing.kind,
                    });
                }
            }

            if kind == EventKind::DayOff {
                self.check_working_calendar(date_start, date_end)?;
            }

            let event = EmployeeEvent::new(employee_uuid, kind, date_start, date_end, reason);
            events.insert(&event)?;
            Ok(event)
        })?;

        info!(
            "event=event_recorded module=service status=ok kind={} employee={} range={}..{}",
            event.kind.db_name(),
            event.employee_uuid,
            event.date_start,
            event.date_end
        );
        Ok(event)
    }

    /// Lists all events of one employee ordered by start date.
    pub fn list_events(
        &self,
        employee_uuid: EmployeeId,
    ) -> Result<Vec<EmployeeEvent>, EventServiceError> {
        if self.employees.get(employee_uuid)?.is_none() {
            return Err(EventServiceError::EmployeeNotFound(employee_uuid));
        }
        self.events
            .list_for_employee(employee_uuid)
            .map_err(Into::into)
    }

    fn check_working_calendar(
        &self,
        date_start: NaiveDate,
        date_end: NaiveDate,
    ) -> Result<(), EventServiceError> {
        let mut day = date_start;
        while day <= date_end {
            if self.calendar.find_override(day)? == Some(false) {
                return Err(EventServiceError::NonWorkingDay(day));
            }
            match day.succ_opt() {
                Some(next) => day = next,
                None => break,
            }
        }
        Ok(())
    }
}
