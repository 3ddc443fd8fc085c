//! Position repository contracts and SQLite implementation.

use crate::model::position::{Position, PositionId};
use crate::repo::{ensure_schema_ready, parse_uuid, RepoResult};
use rusqlite::{params, Connection};
use uuid::Uuid;

/// Repository interface for job positions.
pub trait PositionRepository {
    /// Creates one position.
    fn create(&self, name: &str) -> RepoResult<Position>;
    /// Loads one position by id.
    fn get(&self, position_uuid: PositionId) -> RepoResult<Option<Position>>;
    /// Lists all positions ordered by name.
    fn list_all(&self) -> RepoResult<Vec<Position>>;
}

/// SQLite-backed position repository.
pub struct SqlitePositionRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePositionRepository<'conn> {
    /// Creates a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_ready(conn)?;
        Ok(Self { conn })
    }
}

impl PositionRepository for SqlitePositionRepository<'_> {
    fn create(&self, name: &str) -> RepoResult<Position> {
        let position_uuid = Uuid::new_v4();
        self.conn.execute(
            "INSERT INTO positions (position_uuid, name) VALUES (?1, ?2);",
            params![position_uuid.to_string(), name],
        )?;
        Ok(Position {
            position_uuid,
            name: name.to_string(),
        })
    }

    fn get(&self, position_uuid: PositionId) -> RepoResult<Option<Position>> {
        let mut stmt = self.conn.prepare(
            "SELECT position_uuid, name FROM positions WHERE position_uuid = ?1;",
        )?;
        let mut rows = stmt.query([position_uuid.to_string()])?;
        if let Some(row) = rows.next()? {
            let uuid_text: String = row.get("position_uuid")?;
            return Ok(Some(Position {
                position_uuid: parse_uuid(&uuid_text, "positions.position_uuid")?,
                name: row.get("name")?,
            }));
        }
        Ok(None)
    }

    fn list_all(&self) -> RepoResult<Vec<Position>> {
        let mut stmt = self
            .conn
            .prepare("SELECT position_uuid, name FROM positions ORDER BY name ASC;")?;
        let mut rows = stmt.query([])?;
        let mut positions = Vec::new();
        while let Some(row) = rows.next()? {
            let uuid_text: String = row.get("position_uuid")?;
            positions.push(Position {
                position_uuid: parse_uuid(&uuid_text, "positions.position_uuid")?,
                name: row.get("name")?,
            });
        }
        Ok(positions)
    }
}
