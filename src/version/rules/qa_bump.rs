//! Bump rule for QA branches.

use super::VersionRule;
use crate::version::{
    domain::{BranchName, BumpContext, DomainVersion, ProjectId, ReleaseNumber, VersionSnapshot},
    ports::VersionBumpResult,
};

const QA_PREFIX: &str = "qa";

/// Bumps the QA component for any branch starting with `qa`.
///
/// The base is the branch's own version, else `main`.
#[derive(Debug, Clone, Copy, Default)]
pub struct QaBumpRule;

impl VersionRule for QaBumpRule {
    fn priority(&self) -> i32 {
        20
    }

    fn name(&self) -> &'static str {
        "QaBumpRule"
    }

    fn can_apply(&self, branch: &BranchName, _: &VersionSnapshot, _: &BumpContext) -> bool {
        branch.has_prefix(QA_PREFIX)
    }

    fn apply(
        &self,
        branch: &BranchName,
        project_id: ProjectId,
        snapshot: &VersionSnapshot,
        _: &BumpContext,
    ) -> VersionBumpResult<DomainVersion> {
        let release = snapshot
            .own_or_main(branch)
            .map_or(Ok(ReleaseNumber::QA_SEED), |base| {
                base.parsed_release().and_then(ReleaseNumber::bump_qa)
            })?;
        Ok(DomainVersion::proposed(
            project_id,
            branch.clone(),
            release,
            Some(QA_PREFIX.to_owned()),
        ))
    }
}
