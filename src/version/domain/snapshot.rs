//! Point-in-time view of a project's stored versions.

use super::{BranchName, ConcurrencyToken, DomainVersion, MAIN_BRANCH};
use std::collections::HashMap;

/// Stored versions of one project, keyed by branch identifier.
///
/// A snapshot is fetched fresh for every compute attempt and never reused
/// across retries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionSnapshot {
    versions: HashMap<String, DomainVersion>,
}

impl VersionSnapshot {
    /// Creates an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a version, replacing any entry for the same branch.
    pub fn insert(&mut self, version: DomainVersion) {
        self.versions
            .insert(version.identifier_name().as_str().to_owned(), version);
    }

    /// Returns the version stored for `branch`.
    #[must_use]
    pub fn get(&self, branch: &str) -> Option<&DomainVersion> {
        self.versions.get(branch)
    }

    /// Returns the version stored for `main`.
    #[must_use]
    pub fn main(&self) -> Option<&DomainVersion> {
        self.get(MAIN_BRANCH)
    }

    /// Returns the branch's own version, falling back to `main`.
    #[must_use]
    pub fn own_or_main(&self, branch: &BranchName) -> Option<&DomainVersion> {
        self.get(branch.as_str()).or_else(|| self.main())
    }

    /// Returns the token the branch's row carried when the snapshot was
    /// taken, or `None` when the branch has no row yet.
    #[must_use]
    pub fn token_for(&self, branch: &BranchName) -> Option<ConcurrencyToken> {
        self.get(branch.as_str())
            .and_then(DomainVersion::concurrency_token)
    }

    /// Returns the number of stored versions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.versions.len()
    }

    /// Returns `true` when the project has no stored versions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    /// Iterates over the stored versions in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &DomainVersion> {
        self.versions.values()
    }

    /// Consumes the snapshot, yielding its versions in arbitrary order.
    #[must_use]
    pub fn into_versions(self) -> Vec<DomainVersion> {
        self.versions.into_values().collect()
    }
}

impl FromIterator<DomainVersion> for VersionSnapshot {
    fn from_iter<T: IntoIterator<Item = DomainVersion>>(iter: T) -> Self {
        let mut snapshot = Self::new();
        for version in iter {
            snapshot.insert(version);
        }
        snapshot
    }
}
