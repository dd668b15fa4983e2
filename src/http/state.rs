//! Shared handler state.

use crate::cancellation::Cancellation;
use crate::version::{
    ports::{VersionCalculator, VersionRepository},
    services::{ComputeNextVersionService, ProjectVersionsService},
};
use std::sync::Arc;

/// Services and shutdown signal shared by every request.
pub struct AppState<R, B>
where
    R: VersionRepository,
    B: VersionCalculator,
{
    compute: ComputeNextVersionService<R, B>,
    listing: ProjectVersionsService<R>,
    cancellation: Cancellation,
}

impl<R, B> Clone for AppState<R, B>
where
    R: VersionRepository,
    B: VersionCalculator,
{
    fn clone(&self) -> Self {
        Self {
            compute: self.compute.clone(),
            listing: self.listing.clone(),
            cancellation: self.cancellation.clone(),
        }
    }
}

impl<R, B> AppState<R, B>
where
    R: VersionRepository,
    B: VersionCalculator,
{
    /// Builds both services over one repository.
    #[must_use]
    pub fn new(repository: Arc<R>, bumper: Arc<B>) -> Self {
        Self::from_services(
            ComputeNextVersionService::new(Arc::clone(&repository), bumper),
            ProjectVersionsService::new(repository),
        )
    }

    /// Wraps services built elsewhere, for example with a custom attempt
    /// budget.
    #[must_use]
    pub const fn from_services(
        compute: ComputeNextVersionService<R, B>,
        listing: ProjectVersionsService<R>,
    ) -> Self {
        Self {
            compute,
            listing,
            cancellation: Cancellation::never(),
        }
    }

    /// Cancels in-flight requests when `cancellation` fires.
    #[must_use]
    pub fn with_cancellation(mut self, cancellation: Cancellation) -> Self {
        self.cancellation = cancellation;
        self
    }

    /// Returns the compute service.
    #[must_use]
    pub const fn compute(&self) -> &ComputeNextVersionService<R, B> {
        &self.compute
    }

    /// Returns the listing service.
    #[must_use]
    pub const fn listing(&self) -> &ProjectVersionsService<R> {
        &self.listing
    }

    /// Returns the shutdown signal.
    #[must_use]
    pub const fn cancellation(&self) -> &Cancellation {
        &self.cancellation
    }
}
