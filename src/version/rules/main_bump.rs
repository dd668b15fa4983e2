//! Bump rules for the trunk branch.

use super::VersionRule;
use crate::version::{
    domain::{BranchName, BumpContext, DomainVersion, ProjectId, ReleaseNumber, VersionSnapshot},
    ports::VersionBumpResult,
};

/// Metadata attached to minor releases of `main`.
const MINOR_META: &str = "minor";

/// Bumps the major component of `main` when the caller sets `isMajor`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MainMajorBumpRule;

impl VersionRule for MainMajorBumpRule {
    fn priority(&self) -> i32 {
        10
    }

    fn name(&self) -> &'static str {
        "MainMajorBumpRule"
    }

    fn can_apply(&self, branch: &BranchName, _: &VersionSnapshot, context: &BumpContext) -> bool {
        branch.is_main() && context.is_major()
    }

    fn apply(
        &self,
        branch: &BranchName,
        project_id: ProjectId,
        snapshot: &VersionSnapshot,
        _: &BumpContext,
    ) -> VersionBumpResult<DomainVersion> {
        let release = snapshot
            .main()
            .map_or(Ok(ReleaseNumber::MAJOR_SEED), |current| {
                current.parsed_release().and_then(ReleaseNumber::bump_major)
            })?;
        Ok(DomainVersion::proposed(
            project_id,
            branch.clone(),
            release,
            None,
        ))
    }
}

/// Bumps the minor component of `main`; the default for the trunk.
#[derive(Debug, Clone, Copy, Default)]
pub struct MainMinorBumpRule;

impl VersionRule for MainMinorBumpRule {
    fn priority(&self) -> i32 {
        15
    }

    fn name(&self) -> &'static str {
        "MainMinorBumpRule"
    }

    fn can_apply(&self, branch: &BranchName, _: &VersionSnapshot, context: &BumpContext) -> bool {
        branch.is_main() && !context.is_major()
    }

    fn apply(
        &self,
        branch: &BranchName,
        project_id: ProjectId,
        snapshot: &VersionSnapshot,
        _: &BumpContext,
    ) -> VersionBumpResult<DomainVersion> {
        let release = snapshot
            .main()
            .map_or(Ok(ReleaseNumber::MINOR_SEED), |current| {
                current.parsed_release().and_then(ReleaseNumber::bump_minor)
            })?;
        Ok(DomainVersion::proposed(
            project_id,
            branch.clone(),
            release,
            Some(MINOR_META.to_owned()),
        ))
    }
}
