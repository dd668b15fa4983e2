//! Rule-evaluation port used by the compute orchestrator.

use crate::version::domain::{
    BranchName, BumpContext, DomainVersion, ProjectId, VersionDomainError, VersionSnapshot,
};
use thiserror::Error;

/// Result type for next-version calculation.
pub type VersionBumpResult<T> = Result<T, VersionBumpError>;

/// Computes the next version of a branch from a snapshot.
///
/// Implementations must be deterministic and free of I/O: the same branch,
/// snapshot and context always select the same rule.
pub trait VersionCalculator: Send + Sync {
    /// Computes the next unsaved version of `branch`.
    ///
    /// # Errors
    ///
    /// Returns [`VersionBumpError::UnsupportedBranch`] when no rule handles
    /// the branch, or the failure of the rule that was selected.
    fn calculate_next_version(
        &self,
        branch: &BranchName,
        project_id: ProjectId,
        snapshot: &VersionSnapshot,
        context: &BumpContext,
    ) -> VersionBumpResult<DomainVersion>;
}

/// Errors raised while computing a next version.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VersionBumpError {
    /// No rule applies to the branch.
    #[error("No rule was found for branch {0}.")]
    UnsupportedBranch(String),

    /// The selected rule could not compute a version.
    #[error(transparent)]
    Domain(#[from] VersionDomainError),
}
