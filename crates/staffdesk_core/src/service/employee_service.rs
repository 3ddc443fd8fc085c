//! Employee directory use-case service.
//!
//! # Responsibility
//! - Provide employee create/update/get entry points.
//! - List employees of a department, optionally with its whole subtree,
//!   applying the post-termination visibility window.
//!
//! # Invariants
//! - Service APIs never bypass repository validation contracts.
//! - Listings hide employees terminated more than 30 days before `today`.

use crate::model::department::DepartmentId;
use crate::model::employee::{Employee, EmployeeId};
use crate::model::event::EmployeeEvent;
use crate::repo::department_repo::DepartmentRepository;
use crate::repo::employee_repo::EmployeeRepository;
use crate::repo::event_repo::EventRepository;
use crate::repo::RepoError;
use crate::service::hierarchy_service::{HierarchyService, HierarchyServiceError};
use chrono::NaiveDate;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from directory use-cases.
#[derive(Debug)]
pub enum EmployeeServiceError {
    /// Target employee does not exist.
    EmployeeNotFound(EmployeeId),
    /// Hierarchy resolution failed.
    Hierarchy(HierarchyServiceError),
    /// Repository-level failure.
    Repo(RepoError),
}

impl Display for EmployeeServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmployeeNotFound(id) => write!(f, "employee not found: {id}"),
            Self::Hierarchy(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for EmployeeServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Hierarchy(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::EmployeeNotFound(_) => None,
        }
    }
}

impl From<RepoError> for EmployeeServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<HierarchyServiceError> for EmployeeServiceError {
    fn from(value: HierarchyServiceError) -> Self {
        Self::Hierarchy(value)
    }
}

/// Employee directory service facade.
pub struct EmployeeService<P, E, D>
where
    P: EmployeeRepository,
    E: EventRepository,
    D: DepartmentRepository,
{
    employees: P,
    events: E,
    hierarchy: HierarchyService<D>,
}

impl<P, E, D> EmployeeService<P, E, D>
where
    P: EmployeeRepository,
    E: EventRepository,
    D: DepartmentRepository,
{
    /// Creates a service from repository implementations sharing one store.
    pub fn new(employees: P, events: E, departments: D) -> Self {
        Self {
            employees,
            events,
            hierarchy: HierarchyService::new(departments),
        }
    }

    /// Persists one new employee record.
    pub fn create_employee(&self, employee: &Employee) -> Result<EmployeeId, EmployeeServiceError> {
        self.employees.create(employee).map_err(Into::into)
    }

    /// Replaces one employee record by stable id.
    pub fn update_employee(&self, employee: &Employee) -> Result<(), EmployeeServiceError> {
        self.employees.update(employee).map_err(Into::into)
    }

    /// Loads one employee by id.
    pub fn get_employee(
        &self,
        employee_uuid: EmployeeId,
    ) -> Result<Option<Employee>, EmployeeServiceError> {
        self.employees.get(employee_uuid).map_err(Into::into)
    }

    /// Loads one employee with all of its events ordered by start date.
    pub fn get_employee_with_events(
        &self,
        employee_uuid: EmployeeId,
    ) -> Result<(Employee, Vec<EmployeeEvent>), EmployeeServiceError> {
        let employee = self
            .employees
            .get(employee_uuid)?
            .ok_or(EmployeeServiceError::EmployeeNotFound(employee_uuid))?;
        let events = self.events.list_for_employee(employee_uuid)?;
        Ok((employee, events))
    }

    /// Lists visible employees of one department.
    ///
    /// With `include_subordinates` the whole resolved subtree is scoped.
    /// Records terminated more than 30 days before `today` are filtered
    /// out.
    pub fn list_by_department(
        &self,
        department_uuid: DepartmentId,
        include_subordinates: bool,
        today: NaiveDate,
    ) -> Result<Vec<Employee>, EmployeeServiceError> {
        let department_uuids = if include_subordinates {
            self.hierarchy.resolve_subtree(department_uuid)?
        } else {
            HashSet::from([department_uuid])
        };

        let mut employees = self.employees.list_in_departments(&department_uuids)?;
        employees.retain(|employee| employee.is_visible(today));
        Ok(employees)
    }
}
