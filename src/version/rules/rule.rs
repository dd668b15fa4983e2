//! The bump-rule contract.

use crate::version::{
    domain::{BranchName, BumpContext, DomainVersion, ProjectId, VersionSnapshot},
    ports::VersionBumpResult,
};

/// One branch-naming convention's bump policy.
///
/// Rules are evaluated in ascending [`priority`](Self::priority) order by
/// [`VersionBumper`](super::VersionBumper); the first rule whose
/// [`can_apply`](Self::can_apply) returns `true` computes the version.
pub trait VersionRule: Send + Sync {
    /// Evaluation order key; lower runs first.
    fn priority(&self) -> i32;

    /// Diagnostic name of the rule.
    fn name(&self) -> &'static str;

    /// Returns `true` when the rule handles `branch`.
    ///
    /// Must be pure and cheap.
    fn can_apply(
        &self,
        branch: &BranchName,
        snapshot: &VersionSnapshot,
        context: &BumpContext,
    ) -> bool;

    /// Computes the next unsaved version of `branch` in `project_id`.
    ///
    /// # Errors
    ///
    /// Returns [`VersionBumpError::Domain`](crate::version::ports::VersionBumpError::Domain)
    /// when the base version cannot be parsed or bumped.
    fn apply(
        &self,
        branch: &BranchName,
        project_id: ProjectId,
        snapshot: &VersionSnapshot,
        context: &BumpContext,
    ) -> VersionBumpResult<DomainVersion>;
}
