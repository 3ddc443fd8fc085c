//! Employment termination coordinator.
//!
//! # Responsibility
//! - Guard termination against future scheduled trainings.
//! - Cascade-delete future leave/day-off events and stamp the last working
//!   day.
//!
//! # Invariants
//! - Guard, cascade, and stamp run as one atomic unit; a rejection leaves
//!   the store untouched.
//! - Training events are never deleted by the cascade.
//! - An already-terminated employee is rejected; the stamped date never
//!   moves.

use crate::model::employee::EmployeeId;
use crate::repo::employee_repo::EmployeeRepository;
use crate::repo::event_repo::EventRepository;
use crate::repo::RepoError;
use chrono::NaiveDate;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from the termination coordinator.
#[derive(Debug)]
pub enum TerminationError {
    /// Target employee does not exist.
    EmployeeNotFound(EmployeeId),
    /// Employment already ended on the given date.
    AlreadyTerminated { employment_end: NaiveDate },
    /// A training event is scheduled strictly after today.
    FutureTrainingScheduled,
    /// Repository-level failure.
    Repo(RepoError),
}

impl Display for TerminationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmployeeNotFound(id) => write!(f, "employee not found: {id}"),
            Self::AlreadyTerminated { employment_end } => {
                write!(f, "employment already ended on {employment_end}")
            }
            Self::FutureTrainingScheduled => {
                write!(f, "cannot terminate: a future training is scheduled")
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TerminationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for TerminationError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Result of a successful termination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminationOutcome {
    /// Stamped last working day (the supplied `today`).
    pub employment_end: NaiveDate,
    /// Number of cascade-deleted future leave/day-off events.
    pub removed_events: usize,
}

/// Employment termination coordinator.
pub struct TerminationService<P, E>
where
    P: EmployeeRepository,
    E: EventRepository,
{
    employees: P,
    events: E,
}

impl<P, E> TerminationService<P, E>
where
    P: EmployeeRepository,
    E: EventRepository,
{
    /// Creates a service from repository implementations sharing one store.
    pub fn new(employees: P, events: E) -> Self {
        Self { employees, events }
    }

    /// Terminates one employee as of `today`.
    ///
    /// Callers pass the current date explicitly; the service never reads
    /// the system clock, keeping the "strictly future" rules
    /// deterministic.
    ///
    /// # Errors
    /// - [`TerminationError::FutureTrainingScheduled`] rejects with no
    ///   mutation when a training starts after `today`.
    /// - [`TerminationError::AlreadyTerminated`] when an end date is
    ///   already stamped.
    pub fn terminate(
        &self,
        employee_uuid: EmployeeId,
        today: NaiveDate,
    ) -> Result<TerminationOutcome, TerminationError> {
        let outcome = self.events.exclusive(|events| {
            let employee = self
                .employees
                .get(employee_uuid)?
                .ok_or(TerminationError::EmployeeNotFound(employee_uuid))?;

            if let Some(employment_end) = employee.employment_end {
                return Err(TerminationError::AlreadyTerminated { employment_end });
            }

            if events.has_future_training(employee_uuid, today)? {
                return Err(TerminationError::FutureTrainingScheduled);
            }

            let removed_events = events.delete_future_leave_and_day_off(employee_uuid, today)?;
            self.employees.set_employment_end(employee_uuid, today)?;

            Ok(TerminationOutcome {
                employment_end: today,
                removed_events,
            })
        })?;

        info!(
            "event=employee_terminated module=service status=ok employee={} employment_end={} removed_events={}",
            employee_uuid, outcome.employment_end, outcome.removed_events
        );
        Ok(outcome)
    }
}
