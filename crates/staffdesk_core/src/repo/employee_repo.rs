//! Employee repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over canonical `employees` storage.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths must call `Employee::validate()` before SQL mutations.
//! - `set_employment_end` only writes a record that has no end date yet;
//!   the stamped date never moves afterwards.

use crate::model::department::DepartmentId;
use crate::model::employee::{Employee, EmployeeId};
use crate::repo::{ensure_schema_ready, parse_uuid, RepoError, RepoResult};
use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};
use std::collections::HashSet;

const EMPLOYEE_SELECT_SQL: &str = "SELECT
    employee_uuid,
    last_name,
    first_name,
    middle_name,
    date_of_birth,
    mobile_phone,
    work_phone,
    corporate_email,
    cabinet,
    department_uuid,
    position_uuid,
    manager_uuid,
    assistant_uuid,
    additional_info,
    employment_end
FROM employees";

/// Repository interface for employee records.
pub trait EmployeeRepository {
    /// Persists one new employee record.
    fn create(&self, employee: &Employee) -> RepoResult<EmployeeId>;
    /// Replaces one employee record by stable id.
    fn update(&self, employee: &Employee) -> RepoResult<()>;
    /// Loads one employee by id.
    fn get(&self, employee_uuid: EmployeeId) -> RepoResult<Option<Employee>>;
    /// Lists employees whose department is in `department_uuids`,
    /// ordered by last then first name. No visibility filtering here;
    /// that rule belongs to the model/service layer.
    fn list_in_departments(
        &self,
        department_uuids: &HashSet<DepartmentId>,
    ) -> RepoResult<Vec<Employee>>;
    /// Stamps the last working day on a not-yet-terminated record.
    fn set_employment_end(&self, employee_uuid: EmployeeId, date: NaiveDate) -> RepoResult<()>;
}

/// SQLite-backed employee repository.
pub struct SqliteEmployeeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEmployeeRepository<'conn> {
    /// Creates a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_ready(conn)?;
        Ok(Self { conn })
    }
}

impl EmployeeRepository for SqliteEmployeeRepository<'_> {
    fn create(&self, employee: &Employee) -> RepoResult<EmployeeId> {
        employee.validate()?;

        self.conn.execute(
            "INSERT INTO employees (
                employee_uuid,
                last_name,
                first_name,
                middle_name,
                date_of_birth,
                mobile_phone,
                work_phone,
                corporate_email,
                cabinet,
                department_uuid,
                position_uuid,
                manager_uuid,
                assistant_uuid,
                additional_info,
                employment_end
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15);",
            params![
                employee.employee_uuid.to_string(),
                employee.last_name.as_str(),
                employee.first_name.as_str(),
                employee.middle_name.as_deref(),
                employee.date_of_birth,
                employee.mobile_phone.as_deref(),
                employee.work_phone.as_str(),
                employee.corporate_email.as_str(),
                employee.cabinet.as_str(),
                employee.department_uuid.to_string(),
                employee.position_uuid.to_string(),
                employee.manager_uuid.map(|value| value.to_string()),
                employee.assistant_uuid.map(|value| value.to_string()),
                employee.additional_info.as_deref(),
                employee.employment_end,
            ],
        )?;

        Ok(employee.employee_uuid)
    }

    fn update(&self, employee: &Employee) -> RepoResult<()> {
        employee.validate()?;

        let changed = self.conn.execute(
            "UPDATE employees
             SET
                last_name = ?1,
                first_name = ?2,
                middle_name = ?3,
                date_of_birth = ?4,
                mobile_phone = ?5,
                work_phone = ?6,
                corporate_email = ?7,
                cabinet = ?8,
                department_uuid = ?9,
                position_uuid = ?10,
                manager_uuid = ?11,
                assistant_uuid = ?12,
                additional_info = ?13,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE employee_uuid = ?14;",
            params![
                employee.last_name.as_str(),
                employee.first_name.as_str(),
                employee.middle_name.as_deref(),
                employee.date_of_birth,
                employee.mobile_phone.as_deref(),
                employee.work_phone.as_str(),
                employee.corporate_email.as_str(),
                employee.cabinet.as_str(),
                employee.department_uuid.to_string(),
                employee.position_uuid.to_string(),
                employee.manager_uuid.map(|value| value.to_string()),
                employee.assistant_uuid.map(|value| value.to_string()),
                employee.additional_info.as_deref(),
                employee.employee_uuid.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::EmployeeNotFound(employee.employee_uuid));
        }

        Ok(())
    }

    fn get(&self, employee_uuid: EmployeeId) -> RepoResult<Option<Employee>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EMPLOYEE_SELECT_SQL} WHERE employee_uuid = ?1;"))?;
        let mut rows = stmt.query([employee_uuid.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_employee_row(row)?));
        }
        Ok(None)
    }

    fn list_in_departments(
        &self,
        department_uuids: &HashSet<DepartmentId>,
    ) -> RepoResult<Vec<Employee>> {
        if department_uuids.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; department_uuids.len()].join(", ");
        let sql = format!(
            "{EMPLOYEE_SELECT_SQL}
             WHERE department_uuid IN ({placeholders})
             ORDER BY last_name ASC, first_name ASC, employee_uuid ASC;"
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let ids: Vec<String> = department_uuids.iter().map(|id| id.to_string()).collect();
        let mut rows = stmt.query(rusqlite::params_from_iter(ids))?;

        let mut employees = Vec::new();
        while let Some(row) = rows.next()? {
            employees.push(parse_employee_row(row)?);
        }
        Ok(employees)
    }

    fn set_employment_end(&self, employee_uuid: EmployeeId, date: NaiveDate) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE employees
             SET employment_end = ?2,
                 updated_at = (strftime('%s', 'now') * 1000)
             WHERE employee_uuid = ?1
               AND employment_end IS NULL;",
            params![employee_uuid.to_string(), date],
        )?;

        if changed == 0 {
            return Err(RepoError::EmployeeNotFound(employee_uuid));
        }

        Ok(())
    }
}

fn parse_employee_row(row: &Row<'_>) -> RepoResult<Employee> {
    let uuid_text: String = row.get("employee_uuid")?;
    let department_text: String = row.get("department_uuid")?;
    let position_text: String = row.get("position_uuid")?;

    let manager_uuid = match row.get::<_, Option<String>>("manager_uuid")? {
        Some(value) => Some(parse_uuid(&value, "employees.manager_uuid")?),
        None => None,
    };
    let assistant_uuid = match row.get::<_, Option<String>>("assistant_uuid")? {
        Some(value) => Some(parse_uuid(&value, "employees.assistant_uuid")?),
        None => None,
    };

    Ok(Employee {
        employee_uuid: parse_uuid(&uuid_text, "employees.employee_uuid")?,
        last_name: row.get("last_name")?,
        first_name: row.get("first_name")?,
        middle_name: row.get("middle_name")?,
        date_of_birth: row.get("date_of_birth")?,
        mobile_phone: row.get("mobile_phone")?,
        work_phone: row.get("work_phone")?,
        corporate_email: row.get("corporate_email")?,
        cabinet: row.get("cabinet")?,
        department_uuid: parse_uuid(&department_text, "employees.department_uuid")?,
        position_uuid: parse_uuid(&position_text, "employees.position_uuid")?,
        manager_uuid,
        assistant_uuid,
        additional_info: row.get("additional_info")?,
        employment_end: row.get("employment_end")?,
    })
}
