//! Priority-ordered rule dispatcher.

use super::{
    FeatureBumpRule, FixBumpRule, MainMajorBumpRule, MainMinorBumpRule, QaBumpRule, VersionRule,
};
use crate::version::{
    domain::{BranchName, BumpContext, DomainVersion, ProjectId, VersionSnapshot},
    ports::{VersionBumpError, VersionBumpResult, VersionCalculator},
};
use std::sync::Arc;
use tracing::debug;

/// Selects the first applicable [`VersionRule`] and delegates to it.
///
/// Rules are held in ascending priority order. Equal priorities keep their
/// registration order.
#[derive(Clone)]
pub struct VersionBumper {
    rules: Vec<Arc<dyn VersionRule>>,
}

impl VersionBumper {
    /// Creates a bumper with the built-in rule set.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rules([
            Arc::new(MainMajorBumpRule) as Arc<dyn VersionRule>,
            Arc::new(MainMinorBumpRule),
            Arc::new(QaBumpRule),
            Arc::new(FeatureBumpRule),
            Arc::new(FixBumpRule),
        ])
    }

    /// Creates a bumper from an arbitrary rule set.
    #[must_use]
    pub fn with_rules(rules: impl IntoIterator<Item = Arc<dyn VersionRule>>) -> Self {
        let mut ordered: Vec<_> = rules.into_iter().collect();
        ordered.sort_by_key(|rule| rule.priority());
        Self { rules: ordered }
    }

    /// Returns rule names in evaluation order.
    #[must_use]
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }
}

impl Default for VersionBumper {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for VersionBumper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VersionBumper")
            .field("rules", &self.rule_names())
            .finish()
    }
}

impl VersionCalculator for VersionBumper {
    fn calculate_next_version(
        &self,
        branch: &BranchName,
        project_id: ProjectId,
        snapshot: &VersionSnapshot,
        context: &BumpContext,
    ) -> VersionBumpResult<DomainVersion> {
        let rule = self
            .rules
            .iter()
            .find(|rule| rule.can_apply(branch, snapshot, context))
            .ok_or_else(|| VersionBumpError::UnsupportedBranch(branch.as_str().to_owned()))?;
        debug!(rule = rule.name(), branch = %branch, "applying version rule");
        rule.apply(branch, project_id, snapshot, context)
    }
}
