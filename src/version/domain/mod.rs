//! Domain model for version computation.
//!
//! The version domain models four-component release numbers, branch
//! identifiers and the per-project snapshot that bump rules read from. It has
//! no knowledge of storage or transport.

mod branch;
mod context;
mod error;
mod ids;
mod release;
mod snapshot;
mod version;

pub use branch::{BranchName, MAIN_BRANCH};
pub use context::{BumpContext, IS_MAJOR_KEY};
pub use error::VersionDomainError;
pub use ids::{ConcurrencyToken, ProjectId, VersionId};
pub use release::ReleaseNumber;
pub use snapshot::VersionSnapshot;
pub use version::{DomainVersion, PersistedVersionData, format_version};
