//! Department read model.
//!
//! # Invariants
//! - `parent_uuid = None` marks a root department.
//! - The parent relation must form a forest; cyclic edges are a storage
//!   bug and are surfaced by the hierarchy service as an error.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable department identifier.
pub type DepartmentId = Uuid;

/// One node of the organizational hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    /// Stable department id.
    pub department_uuid: DepartmentId,
    /// Parent department. `None` means root.
    pub parent_uuid: Option<DepartmentId>,
    /// Display name.
    pub name: String,
}
