//! Shared test helpers for in-memory integration tests.

use openversion::cancellation::Cancellation;
use openversion::version::{
    adapters::memory::InMemoryVersionRepository,
    rules::VersionBumper,
    services::{ComputeNextVersionRequest, ComputeNextVersionService, ProjectVersionsService},
};
use rstest::fixture;
use std::collections::HashMap;
use std::sync::Arc;

/// Compute service over the in-memory store.
pub type MemoryCompute = ComputeNextVersionService<InMemoryVersionRepository, VersionBumper>;

/// Services sharing one in-memory store.
pub struct Harness {
    pub repository: Arc<InMemoryVersionRepository>,
    pub compute: MemoryCompute,
    pub listing: ProjectVersionsService<InMemoryVersionRepository>,
}

/// Provides services over a fresh in-memory store.
#[fixture]
pub fn harness() -> Harness {
    let repository = Arc::new(InMemoryVersionRepository::new());
    Harness {
        compute: ComputeNextVersionService::new(
            Arc::clone(&repository),
            Arc::new(VersionBumper::new()),
        ),
        listing: ProjectVersionsService::new(Arc::clone(&repository)),
        repository,
    }
}

/// Computes the next version of `branch` and returns its display string.
pub async fn next(service: &MemoryCompute, request: ComputeNextVersionRequest) -> String {
    service
        .compute_next_version(request, &Cancellation::never())
        .await
        .expect("compute should succeed")
        .formatted()
}

/// Context requesting a major bump.
pub fn major() -> HashMap<String, Option<String>> {
    HashMap::from([("isMajor".to_owned(), Some("true".to_owned()))])
}
