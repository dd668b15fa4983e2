//! Branch identifier value object.

use super::VersionDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length of a branch identifier, matching the `identifier_name`
/// column width.
const MAX_BRANCH_NAME_LENGTH: usize = 200;

/// Name of the trunk branch every other line falls back to.
pub const MAIN_BRANCH: &str = "main";

/// Validated branch identifier such as `main`, `qa`, `feature/x` or `fix/y`.
///
/// Together with a [`ProjectId`](super::ProjectId) it keys one version
/// counter.
///
/// # Examples
///
///     use openversion::version::domain::BranchName;
///
///     let name = BranchName::new("  feature/login ").expect("valid");
///     assert_eq!(name.as_str(), "feature/login");
///     assert!(!name.is_main());
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BranchName(String);

impl BranchName {
    /// Creates a validated branch identifier.
    ///
    /// Surrounding whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`VersionDomainError::EmptyBranchName`] when nothing remains
    /// after trimming, or [`VersionDomainError::BranchNameTooLong`] when the
    /// name exceeds the storage limit.
    pub fn new(value: impl Into<String>) -> Result<Self, VersionDomainError> {
        let raw = value.into();
        let normalized = raw.trim();

        if normalized.is_empty() {
            return Err(VersionDomainError::EmptyBranchName);
        }
        if normalized.chars().count() > MAX_BRANCH_NAME_LENGTH {
            return Err(VersionDomainError::BranchNameTooLong(raw));
        }

        Ok(Self(normalized.to_owned()))
    }

    /// Returns the trunk branch identifier.
    #[must_use]
    pub fn main() -> Self {
        Self(MAIN_BRANCH.to_owned())
    }

    /// Returns the branch identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` for the trunk branch.
    #[must_use]
    pub fn is_main(&self) -> bool {
        self.0 == MAIN_BRANCH
    }

    /// Returns `true` when the identifier starts with `prefix`.
    #[must_use]
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.0.starts_with(prefix)
    }

    /// Replaces every occurrence of `prefix` with `replacement`.
    ///
    /// Used to derive display metadata such as `feature-login` from
    /// `feature/login`.
    #[must_use]
    pub fn slug(&self, prefix: &str, replacement: &str) -> String {
        self.0.replace(prefix, replacement)
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for BranchName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<&str> for BranchName {
    type Error = VersionDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<String> for BranchName {
    type Error = VersionDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BranchName> for String {
    fn from(name: BranchName) -> Self {
        name.0
    }
}
