//! Department hierarchy resolution.
//!
//! # Responsibility
//! - Compute the full descendant set of one department.
//!
//! # Invariants
//! - Resolution is iterative (worklist + visited set); tree depth never
//!   grows the call stack.
//! - A revisited id means a cyclic parent edge was injected by a storage
//!   bug; resolution stops with an error instead of looping.

use crate::model::department::DepartmentId;
use crate::repo::department_repo::DepartmentRepository;
use crate::repo::RepoError;
use std::collections::{HashSet, VecDeque};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from hierarchy resolution.
#[derive(Debug)]
pub enum HierarchyServiceError {
    /// The parent relation contains a cycle through this department.
    CycleDetected(DepartmentId),
    /// Repository-level failure.
    Repo(RepoError),
}

impl Display for HierarchyServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CycleDetected(id) => {
                write!(f, "department hierarchy contains a cycle through {id}")
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for HierarchyServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::CycleDetected(_) => None,
        }
    }
}

impl From<RepoError> for HierarchyServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Department subtree resolver.
pub struct HierarchyService<R: DepartmentRepository> {
    repo: R,
}

impl<R: DepartmentRepository> HierarchyService<R> {
    /// Creates a service from a repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Resolves the set of `root` plus all transitive child departments.
    ///
    /// An unknown `root` yields the singleton `{root}`: with only child
    /// edges to go on, absence is indistinguishable from a leaf
    /// department.
    ///
    /// # Errors
    /// - [`HierarchyServiceError::CycleDetected`] when a child id is seen
    ///   twice. Each department has a single parent edge, so a revisit can
    ///   only mean a cycle.
    pub fn resolve_subtree(
        &self,
        root: DepartmentId,
    ) -> Result<HashSet<DepartmentId>, HierarchyServiceError> {
        let mut visited = HashSet::from([root]);
        let mut frontier = VecDeque::from([root]);

        while let Some(current) = frontier.pop_front() {
            for child in self.repo.children_of(current)? {
                if !visited.insert(child) {
                    return Err(HierarchyServiceError::CycleDetected(child));
                }
                frontier.push_back(child);
            }
        }

        Ok(visited)
    }
}
