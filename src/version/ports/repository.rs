//! Repository port for version snapshots and optimistic-lock persistence.

use crate::version::domain::{BranchName, DomainVersion, ProjectId, VersionSnapshot};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for version repository operations.
pub type VersionRepositoryResult<T> = Result<T, VersionRepositoryError>;

/// Version persistence contract.
///
/// Implementations own the optimistic-lock primitive: every write stamps a
/// fresh [`ConcurrencyToken`](crate::version::domain::ConcurrencyToken) and
/// refuses to overwrite a row whose token changed since it was observed.
#[async_trait]
pub trait VersionRepository: Send + Sync {
    /// Returns every stored version of the project.
    ///
    /// Returns an empty snapshot when the project has no versions. Each
    /// returned version carries the concurrency token stored with it.
    ///
    /// # Errors
    ///
    /// Returns [`VersionRepositoryError::Persistence`] on infrastructure
    /// failure.
    async fn current_versions(
        &self,
        project_id: ProjectId,
    ) -> VersionRepositoryResult<VersionSnapshot>;

    /// Upserts a version by `(project_id, identifier_name)`.
    ///
    /// A version carrying a [`concurrency_token`](DomainVersion::concurrency_token)
    /// replaces the existing row only while that row still carries the same
    /// token. A version without a token records that no row was observed and
    /// may only insert.
    ///
    /// # Errors
    ///
    /// Returns [`VersionRepositoryError::ConcurrencyConflict`] when the row
    /// changed or was created concurrently, and
    /// [`VersionRepositoryError::Persistence`] on any other storage failure.
    async fn save_version(&self, version: &DomainVersion) -> VersionRepositoryResult<()>;
}

/// Errors returned by version repository implementations.
#[derive(Debug, Clone, Error)]
pub enum VersionRepositoryError {
    /// The optimistic-lock check failed: another writer modified the row
    /// between read and write.
    #[error(
        "a concurrency conflict occurred while trying to save version {release_number} for branch \
         {identifier_name} in project {project_id}; another process may have modified the data"
    )]
    ConcurrencyConflict {
        /// Project of the rejected write.
        project_id: ProjectId,
        /// Branch of the rejected write.
        identifier_name: BranchName,
        /// Release number that was not saved.
        release_number: String,
    },

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl VersionRepositoryError {
    /// Builds a conflict error describing the rejected version.
    #[must_use]
    pub fn conflict(version: &DomainVersion) -> Self {
        Self::ConcurrencyConflict {
            project_id: version.project_id(),
            identifier_name: version.identifier_name().clone(),
            release_number: version.release_number().to_owned(),
        }
    }

    /// Wraps a data-quality or decoding error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Returns `true` for optimistic-lock failures.
    #[must_use]
    pub const fn is_concurrency_conflict(&self) -> bool {
        matches!(self, Self::ConcurrencyConflict { .. })
    }
}
