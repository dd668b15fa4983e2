//! Read-only listing of a project's stored versions.

use super::ErrorKind;
use crate::cancellation::Cancellation;
use crate::version::{
    domain::{DomainVersion, ProjectId, VersionDomainError},
    ports::{VersionRepository, VersionRepositoryError},
};
use std::cmp::Ordering;
use std::sync::Arc;
use thiserror::Error;

/// One stored version as listed for a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectVersion {
    /// Storage identifier.
    pub id: i64,
    /// Branch identifier.
    pub identifier_name: String,
    /// Release number as stored.
    pub release_number: String,
    /// Display metadata, if any.
    pub meta: Option<String>,
}

impl From<DomainVersion> for ProjectVersion {
    fn from(version: DomainVersion) -> Self {
        Self {
            id: version.id().value(),
            identifier_name: version.identifier_name().as_str().to_owned(),
            release_number: version.release_number().to_owned(),
            meta: version.meta().map(str::to_owned),
        }
    }
}

/// Every stored version of a project, sorted by identifier name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectVersions {
    /// Project the listing belongs to.
    pub project_id: i64,
    /// Versions ordered case-insensitively by identifier name.
    pub versions: Vec<ProjectVersion>,
}

/// Service-level errors for the project versions listing.
#[derive(Debug, Clone, Error)]
pub enum ProjectVersionsError {
    /// The project identifier was not positive.
    #[error(transparent)]
    Validation(#[from] VersionDomainError),
    /// The repository failed.
    #[error(transparent)]
    Repository(#[from] VersionRepositoryError),
    /// The caller cancelled the listing.
    #[error("project versions listing was cancelled")]
    Cancelled,
}

impl ProjectVersionsError {
    /// Classifies the error for transports.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Repository(_) => ErrorKind::Application,
            Self::Cancelled => ErrorKind::Cancelled,
        }
    }
}

/// Result type for the project versions listing.
pub type ProjectVersionsResult<T> = Result<T, ProjectVersionsError>;

/// Lists a project's stored versions.
pub struct ProjectVersionsService<R>
where
    R: VersionRepository,
{
    repository: Arc<R>,
}

impl<R> Clone for ProjectVersionsService<R>
where
    R: VersionRepository,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R> ProjectVersionsService<R>
where
    R: VersionRepository,
{
    /// Creates a new listing service.
    #[must_use]
    pub const fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Returns every stored version of `project_id`.
    ///
    /// An unknown project yields an empty listing.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectVersionsError::Validation`] for a non-positive
    /// project, [`ProjectVersionsError::Repository`] when storage fails and
    /// [`ProjectVersionsError::Cancelled`] when `cancellation` fires first.
    pub async fn project_versions(
        &self,
        project_id: i64,
        cancellation: &Cancellation,
    ) -> ProjectVersionsResult<ProjectVersions> {
        let project = ProjectId::new(project_id)?;
        let snapshot = cancellation
            .run(self.repository.current_versions(project))
            .await
            .ok_or(ProjectVersionsError::Cancelled)??;

        let mut versions: Vec<ProjectVersion> = snapshot
            .into_versions()
            .into_iter()
            .map(ProjectVersion::from)
            .collect();
        versions.sort_by(|left, right| {
            compare_identifiers(&left.identifier_name, &right.identifier_name)
        });

        Ok(ProjectVersions {
            project_id: project.value(),
            versions,
        })
    }
}

/// Ordinal order over case-folded characters, ties broken by plain ordinal
/// order.
fn compare_identifiers(left: &str, right: &str) -> Ordering {
    let folded = left.chars().map(fold_case);
    folded
        .cmp(right.chars().map(fold_case))
        .then_with(|| left.cmp(right))
}

/// Upper-cases one character. Characters whose upper case is longer than a
/// single character (`ß`) are kept as they are.
fn fold_case(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(single), None) => single,
        _ => c,
    }
}
