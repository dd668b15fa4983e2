//! Application services for version computation and listing.

mod compute;
mod kind;
mod project_versions;

pub use compute::{
    ComputeNextVersionError, ComputeNextVersionRequest, ComputeNextVersionResult,
    ComputeNextVersionService, NextVersion,
};
pub use kind::ErrorKind;
pub use project_versions::{
    ProjectVersion, ProjectVersions, ProjectVersionsError, ProjectVersionsResult,
    ProjectVersionsService,
};
