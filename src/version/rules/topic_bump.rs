//! Bump rules for short-lived topic branches (`feature/*`, `fix/*`).
//!
//! Both conventions bump the last component and label the release with a
//! slug of the branch name; they differ only in prefix and priority.

use super::VersionRule;
use crate::version::{
    domain::{BranchName, BumpContext, DomainVersion, ProjectId, ReleaseNumber, VersionSnapshot},
    ports::VersionBumpResult,
};

/// Shared apply step: bump the feature component of the branch's own
/// version, else of `main`, else seed at `0.0.0.1`.
fn bump_topic(
    branch: &BranchName,
    project_id: ProjectId,
    snapshot: &VersionSnapshot,
    prefix: &str,
    slug_prefix: &str,
) -> VersionBumpResult<DomainVersion> {
    let release = snapshot
        .own_or_main(branch)
        .map_or(Ok(ReleaseNumber::FEATURE_SEED), |base| {
            base.parsed_release().and_then(ReleaseNumber::bump_feature)
        })?;
    Ok(DomainVersion::proposed(
        project_id,
        branch.clone(),
        release,
        Some(branch.slug(prefix, slug_prefix)),
    ))
}

/// Bumps `feature/*` branches, labelled `feature-<name>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureBumpRule;

impl FeatureBumpRule {
    const PREFIX: &'static str = "feature/";
    const SLUG_PREFIX: &'static str = "feature-";
}

impl VersionRule for FeatureBumpRule {
    fn priority(&self) -> i32 {
        30
    }

    fn name(&self) -> &'static str {
        "FeatureBumpRule"
    }

    fn can_apply(&self, branch: &BranchName, _: &VersionSnapshot, _: &BumpContext) -> bool {
        branch.has_prefix(Self::PREFIX)
    }

    fn apply(
        &self,
        branch: &BranchName,
        project_id: ProjectId,
        snapshot: &VersionSnapshot,
        _: &BumpContext,
    ) -> VersionBumpResult<DomainVersion> {
        bump_topic(
            branch,
            project_id,
            snapshot,
            Self::PREFIX,
            Self::SLUG_PREFIX,
        )
    }
}

/// Bumps `fix/*` branches, labelled `fix-<name>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixBumpRule;

impl FixBumpRule {
    const PREFIX: &'static str = "fix/";
    const SLUG_PREFIX: &'static str = "fix-";
}

impl VersionRule for FixBumpRule {
    fn priority(&self) -> i32 {
        40
    }

    fn name(&self) -> &'static str {
        "FixBumpRule"
    }

    fn can_apply(&self, branch: &BranchName, _: &VersionSnapshot, _: &BumpContext) -> bool {
        branch.has_prefix(Self::PREFIX)
    }

    fn apply(
        &self,
        branch: &BranchName,
        project_id: ProjectId,
        snapshot: &VersionSnapshot,
        _: &BumpContext,
    ) -> VersionBumpResult<DomainVersion> {
        bump_topic(
            branch,
            project_id,
            snapshot,
            Self::PREFIX,
            Self::SLUG_PREFIX,
        )
    }
}
