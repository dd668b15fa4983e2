//! Port contracts for version computation.
//!
//! Ports define infrastructure-agnostic interfaces used by version services.

pub mod calculator;
pub mod repository;

pub use calculator::{VersionBumpError, VersionBumpResult, VersionCalculator};
pub use repository::{VersionRepository, VersionRepositoryError, VersionRepositoryResult};

