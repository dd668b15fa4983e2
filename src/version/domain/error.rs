//! Error types for version domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing or parsing version domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VersionDomainError {
    /// The branch identifier is empty after trimming.
    #[error("branch name must not be empty")]
    EmptyBranchName,

    /// The branch identifier exceeds the storage limit.
    #[error("branch name '{0}' exceeds the maximum length")]
    BranchNameTooLong(String),

    /// The project identifier is not a positive integer.
    #[error("invalid project id {0}, expected a positive integer")]
    InvalidProjectId(i64),

    /// The release number is not four dot-separated non-negative integers.
    #[error("invalid release number '{0}', expected major.minor.qa.feature")]
    InvalidReleaseNumber(String),

    /// Bumping a release number component would overflow.
    #[error("release number '{0}' cannot be bumped further")]
    ReleaseNumberOverflow(String),
}
