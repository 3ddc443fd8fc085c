//! Job position read model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable position identifier.
pub type PositionId = Uuid;

/// One job position referenced by employee records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// Stable position id.
    pub position_uuid: PositionId,
    /// Display name.
    pub name: String,
}
