//! Core domain logic for staffdesk.
//!
//! This crate is the single source of truth for staff-management business
//! invariants: event admission rules, the employment termination cascade,
//! and department subtree resolution.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::department::{Department, DepartmentId};
pub use model::employee::{Employee, EmployeeId, EmployeeValidationError};
pub use model::event::{EmployeeEvent, EventId, EventKind};
pub use model::position::{Position, PositionId};
pub use repo::calendar_repo::{CalendarRepository, SqliteCalendarRepository};
pub use repo::department_repo::{DepartmentRepository, SqliteDepartmentRepository};
pub use repo::employee_repo::{EmployeeRepository, SqliteEmployeeRepository};
pub use repo::event_repo::{EventRepository, SqliteEventRepository};
pub use repo::position_repo::{PositionRepository, SqlitePositionRepository};
pub use repo::{RepoError, RepoResult};
pub use service::employee_service::{EmployeeService, EmployeeServiceError};
pub use service::event_service::{EventService, EventServiceError};
pub use service::hierarchy_service::{HierarchyService, HierarchyServiceError};
pub use service::termination_service::{TerminationError, TerminationOutcome, TerminationService};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
