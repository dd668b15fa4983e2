//! In-memory repository emulating optimistic-lock persistence.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::version::{
    domain::{
        ConcurrencyToken, DomainVersion, PersistedVersionData, ProjectId, VersionId,
        VersionSnapshot,
    },
    ports::{VersionRepository, VersionRepositoryError, VersionRepositoryResult},
};

/// Thread-safe in-memory version repository.
///
/// Rows are keyed by `(project_id, identifier_name)` and stamped with a
/// fresh token on every write. A version without a token may only insert;
/// a version with a token may only replace the row that still carries it.
#[derive(Debug, Clone, Default)]
pub struct InMemoryVersionRepository {
    state: Arc<RwLock<InMemoryVersionState>>,
}

#[derive(Debug, Default)]
struct InMemoryVersionState {
    next_id: i64,
    rows: HashMap<(ProjectId, String), DomainVersion>,
}

impl InMemoryVersionState {
    const fn allocate_id(&mut self) -> VersionId {
        self.next_id += 1;
        VersionId::new(self.next_id)
    }
}

impl InMemoryVersionRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored rows across all projects.
    ///
    /// # Errors
    ///
    /// Returns [`VersionRepositoryError::Persistence`] when the state lock
    /// is poisoned.
    pub fn row_count(&self) -> VersionRepositoryResult<usize> {
        let state = self.state.read().map_err(|err| {
            VersionRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.rows.len())
    }
}

fn stamped(version: &DomainVersion, id: VersionId) -> DomainVersion {
    DomainVersion::from_persisted(PersistedVersionData {
        id,
        project_id: version.project_id(),
        identifier_name: version.identifier_name().clone(),
        release_number: version.release_number().to_owned(),
        meta: version.meta().map(str::to_owned),
        concurrency_token: ConcurrencyToken::new(),
    })
}

#[async_trait]
impl VersionRepository for InMemoryVersionRepository {
    async fn current_versions(
        &self,
        project_id: ProjectId,
    ) -> VersionRepositoryResult<VersionSnapshot> {
        let state = self.state.read().map_err(|err| {
            VersionRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state
            .rows
            .iter()
            .filter(|((project, _), _)| *project == project_id)
            .map(|(_, version)| version.clone())
            .collect())
    }

    async fn save_version(&self, version: &DomainVersion) -> VersionRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            VersionRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let key = (
            version.project_id(),
            version.identifier_name().as_str().to_owned(),
        );

        let stored = state
            .rows
            .get(&key)
            .map(|row| (row.id(), row.concurrency_token()));
        let id = match (stored, version.concurrency_token()) {
            (Some((id, current)), Some(expected)) if current == Some(expected) => id,
            (None, None) => state.allocate_id(),
            _ => return Err(VersionRepositoryError::conflict(version)),
        };

        state.rows.insert(key, stamped(version, id));
        Ok(())
    }
}
