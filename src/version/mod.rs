//! Branch-aware version computation.
//!
//! A version counter exists per project and branch identifier. Computing
//! the next version reads the project's snapshot, lets the first matching
//! bump rule derive a candidate, and saves it under an optimistic lock,
//! retrying from a fresh snapshot when another writer wins. The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Bump rules in [`rules`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod rules;
pub mod services;

#[cfg(test)]
mod tests;
