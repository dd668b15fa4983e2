//! Compute-next-version orchestration with optimistic-concurrency retry.

use super::ErrorKind;
use crate::cancellation::Cancellation;
use crate::version::{
    domain::{BranchName, BumpContext, DomainVersion, ProjectId, VersionDomainError},
    ports::{VersionBumpError, VersionCalculator, VersionRepository, VersionRepositoryError},
};
use std::collections::HashMap;
use std::hash::BuildHasher;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Request payload for computing a branch's next version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComputeNextVersionRequest {
    branch_name: String,
    project_id: i64,
    context: Option<HashMap<String, Option<String>>>,
}

impl ComputeNextVersionRequest {
    /// Creates a request for `branch_name` in the default project.
    #[must_use]
    pub fn new(branch_name: impl Into<String>) -> Self {
        Self {
            branch_name: branch_name.into(),
            project_id: ProjectId::DEFAULT.value(),
            context: None,
        }
    }

    /// Sets the owning project.
    #[must_use]
    pub const fn with_project_id(mut self, project_id: i64) -> Self {
        self.project_id = project_id;
        self
    }

    /// Sets caller-supplied bump hints such as `isMajor`.
    #[must_use]
    pub fn with_context<S: BuildHasher>(
        mut self,
        context: HashMap<String, Option<String>, S>,
    ) -> Self {
        self.context = Some(context.into_iter().collect());
        self
    }

    /// Returns the raw branch name.
    #[must_use]
    pub fn branch_name(&self) -> &str {
        &self.branch_name
    }

    /// Returns the raw project identifier.
    #[must_use]
    pub const fn project_id(&self) -> i64 {
        self.project_id
    }
}

/// Successfully persisted next version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextVersion {
    version: DomainVersion,
    attempts: u32,
}

impl NextVersion {
    /// Returns the version as saved.
    #[must_use]
    pub const fn version(&self) -> &DomainVersion {
        &self.version
    }

    /// Returns the display string, `release` or `release+meta`.
    #[must_use]
    pub fn formatted(&self) -> String {
        self.version.formatted()
    }

    /// Returns how many attempts the computation took.
    #[must_use]
    pub const fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Consumes the result, yielding the saved version.
    #[must_use]
    pub fn into_version(self) -> DomainVersion {
        self.version
    }
}

/// Service-level errors for next-version computation.
#[derive(Debug, Clone, Error)]
pub enum ComputeNextVersionError {
    /// Request validation failed.
    #[error(transparent)]
    Validation(VersionDomainError),
    /// The bumper rejected the branch or its stored base.
    #[error(transparent)]
    Bump(#[from] VersionBumpError),
    /// The repository failed, or conflicts outlasted every attempt.
    #[error(transparent)]
    Repository(#[from] VersionRepositoryError),
    /// The caller cancelled the computation.
    #[error("version computation was cancelled")]
    Cancelled,
}

impl ComputeNextVersionError {
    /// Classifies the error for transports.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Bump(VersionBumpError::UnsupportedBranch(_)) => ErrorKind::UnsupportedBranch,
            Self::Bump(VersionBumpError::Domain(_)) => ErrorKind::Application,
            Self::Repository(err) if err.is_concurrency_conflict() => {
                ErrorKind::ConcurrencyConflict
            }
            Self::Repository(_) => ErrorKind::Application,
            Self::Cancelled => ErrorKind::Cancelled,
        }
    }
}

/// Result type for next-version computation.
pub type ComputeNextVersionResult<T> = Result<T, ComputeNextVersionError>;

/// Fetch, bump and save loop with bounded retry on concurrency conflicts.
///
/// Each attempt reads a fresh snapshot, so a retry always bumps the
/// version that beat it.
pub struct ComputeNextVersionService<R, B>
where
    R: VersionRepository,
    B: VersionCalculator,
{
    repository: Arc<R>,
    bumper: Arc<B>,
    max_attempts: u32,
}

impl<R, B> Clone for ComputeNextVersionService<R, B>
where
    R: VersionRepository,
    B: VersionCalculator,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            bumper: Arc::clone(&self.bumper),
            max_attempts: self.max_attempts,
        }
    }
}

impl<R, B> ComputeNextVersionService<R, B>
where
    R: VersionRepository,
    B: VersionCalculator,
{
    /// Default number of attempts before a conflict is surfaced.
    pub const MAX_ATTEMPTS: u32 = 3;

    /// Creates a service with [`Self::MAX_ATTEMPTS`] attempts.
    #[must_use]
    pub const fn new(repository: Arc<R>, bumper: Arc<B>) -> Self {
        Self {
            repository,
            bumper,
            max_attempts: Self::MAX_ATTEMPTS,
        }
    }

    /// Overrides the attempt budget. Values below one are raised to one.
    #[must_use]
    pub const fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = if max_attempts == 0 { 1 } else { max_attempts };
        self
    }

    /// Returns the attempt budget.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Computes, persists and returns the next version for a branch.
    ///
    /// Cancellation stops the wait on the repository, not the repository
    /// call itself. A save that is already in flight when `cancellation`
    /// fires may still commit: the `PostgreSQL` adapter runs each write on a
    /// blocking thread that keeps going after this future is dropped. The
    /// caller then sees [`ComputeNextVersionError::Cancelled`] even though
    /// the version was stored, and the next compute for the branch starts
    /// from it.
    ///
    /// # Errors
    ///
    /// Returns [`ComputeNextVersionError::Validation`] for a blank branch
    /// or non-positive project, [`ComputeNextVersionError::Bump`] when no
    /// rule applies or the base is malformed,
    /// [`ComputeNextVersionError::Repository`] for storage failures and
    /// exhausted conflicts, and [`ComputeNextVersionError::Cancelled`] when
    /// `cancellation` fires first.
    pub async fn compute_next_version(
        &self,
        request: ComputeNextVersionRequest,
        cancellation: &Cancellation,
    ) -> ComputeNextVersionResult<NextVersion> {
        let branch =
            BranchName::new(request.branch_name).map_err(ComputeNextVersionError::Validation)?;
        let project_id =
            ProjectId::new(request.project_id).map_err(ComputeNextVersionError::Validation)?;
        let context = request.context.map(BumpContext::from).unwrap_or_default();

        let mut attempt = 1;
        loop {
            if cancellation.is_cancelled() {
                return Err(ComputeNextVersionError::Cancelled);
            }
            debug!(%branch, project_id = project_id.value(), attempt, "computing next version");

            let snapshot = cancellation
                .run(self.repository.current_versions(project_id))
                .await
                .ok_or(ComputeNextVersionError::Cancelled)??;
            let candidate = self
                .bumper
                .calculate_next_version(&branch, project_id, &snapshot, &context)?
                .with_concurrency_token(snapshot.token_for(&branch));

            let saved = cancellation
                .run(self.repository.save_version(&candidate))
                .await
                .ok_or(ComputeNextVersionError::Cancelled)?;
            match saved {
                Ok(()) => {
                    info!(
                        %branch,
                        project_id = project_id.value(),
                        version = %candidate,
                        attempt,
                        "next version saved"
                    );
                    return Ok(NextVersion {
                        version: candidate,
                        attempts: attempt,
                    });
                }
                Err(err) if err.is_concurrency_conflict() && attempt < self.max_attempts => {
                    warn!(%branch, attempt, error = %err, "concurrency conflict, retrying");
                    attempt += 1;
                }
                Err(err) if err.is_concurrency_conflict() => {
                    error!(
                        %branch,
                        attempts = attempt,
                        error = %err,
                        "concurrency conflict persisted after every attempt"
                    );
                    return Err(err.into());
                }
                Err(err) => return Err(err.into()),
            }
        }
    }
}
