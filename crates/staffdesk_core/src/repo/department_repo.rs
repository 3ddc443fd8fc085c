//! Department repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist department nodes and expose parent/child edges.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - `children_of` of an unknown id returns an empty list; absence is
//!   indistinguishable from a leaf department.

use crate::model::department::{Department, DepartmentId};
use crate::repo::{ensure_schema_ready, parse_uuid, RepoResult};
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

const DEPARTMENT_SELECT_SQL: &str = "SELECT
    department_uuid,
    parent_uuid,
    name
FROM departments";

/// Repository interface for department storage.
pub trait DepartmentRepository {
    /// Creates one department under an optional parent.
    fn create(&self, parent_uuid: Option<DepartmentId>, name: &str) -> RepoResult<Department>;
    /// Loads one department by id.
    fn get(&self, department_uuid: DepartmentId) -> RepoResult<Option<Department>>;
    /// Lists all departments ordered by name.
    fn list_all(&self) -> RepoResult<Vec<Department>>;
    /// Lists direct child department ids.
    fn children_of(&self, department_uuid: DepartmentId) -> RepoResult<Vec<DepartmentId>>;
}

/// SQLite-backed department repository.
pub struct SqliteDepartmentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDepartmentRepository<'conn> {
    /// Creates a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_ready(conn)?;
        Ok(Self { conn })
    }
}

impl DepartmentRepository for SqliteDepartmentRepository<'_> {
    fn create(&self, parent_uuid: Option<DepartmentId>, name: &str) -> RepoResult<Department> {
        let department_uuid = Uuid::new_v4();
        self.conn.execute(
            "INSERT INTO departments (department_uuid, parent_uuid, name)
             VALUES (?1, ?2, ?3);",
            params![
                department_uuid.to_string(),
                parent_uuid.map(|value| value.to_string()),
                name,
            ],
        )?;
        Ok(Department {
            department_uuid,
            parent_uuid,
            name: name.to_string(),
        })
    }

    fn get(&self, department_uuid: DepartmentId) -> RepoResult<Option<Department>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{DEPARTMENT_SELECT_SQL} WHERE department_uuid = ?1;"))?;
        let mut rows = stmt.query([department_uuid.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_department_row(row)?));
        }
        Ok(None)
    }

    fn list_all(&self) -> RepoResult<Vec<Department>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{DEPARTMENT_SELECT_SQL} ORDER BY name ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut departments = Vec::new();
        while let Some(row) = rows.next()? {
            departments.push(parse_department_row(row)?);
        }
        Ok(departments)
    }

    fn children_of(&self, department_uuid: DepartmentId) -> RepoResult<Vec<DepartmentId>> {
        let mut stmt = self.conn.prepare(
            "SELECT department_uuid
             FROM departments
             WHERE parent_uuid = ?1
             ORDER BY department_uuid ASC;",
        )?;
        let mut rows = stmt.query([department_uuid.to_string()])?;
        let mut ids = Vec::new();
        while let Some(row) = rows.next()? {
            let value: String = row.get(0)?;
            ids.push(parse_uuid(&value, "departments.department_uuid")?);
        }
        Ok(ids)
    }
}

fn parse_department_row(row: &Row<'_>) -> RepoResult<Department> {
    let uuid_text: String = row.get("department_uuid")?;
    let department_uuid = parse_uuid(&uuid_text, "departments.department_uuid")?;

    let parent_uuid = match row.get::<_, Option<String>>("parent_uuid")? {
        Some(value) => Some(parse_uuid(&value, "departments.parent_uuid")?),
        None => None,
    };

    Ok(Department {
        department_uuid,
        parent_uuid,
        name: row.get("name")?,
    })
}
