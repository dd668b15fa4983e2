//! Shared world state for next-version BDD scenarios.

use openversion::version::{
    adapters::memory::InMemoryVersionRepository,
    rules::VersionBumper,
    services::{
        ComputeNextVersionError, ComputeNextVersionService, NextVersion, ProjectVersionsService,
    },
};
use rstest::fixture;
use std::sync::Arc;

/// Compute service type used by the BDD world.
pub type TestComputeService = ComputeNextVersionService<InMemoryVersionRepository, VersionBumper>;

/// Scenario world for next-version behaviour tests.
pub struct NextVersionWorld {
    pub repository: Arc<InMemoryVersionRepository>,
    pub service: TestComputeService,
    pub listing: ProjectVersionsService<InMemoryVersionRepository>,
    pub last_result: Option<Result<NextVersion, ComputeNextVersionError>>,
}

impl NextVersionWorld {
    /// Creates a world over an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        let repository = Arc::new(InMemoryVersionRepository::new());
        Self {
            service: ComputeNextVersionService::new(
                Arc::clone(&repository),
                Arc::new(VersionBumper::new()),
            ),
            listing: ProjectVersionsService::new(Arc::clone(&repository)),
            repository,
            last_result: None,
        }
    }
}

impl Default for NextVersionWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> NextVersionWorld {
    NextVersionWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
