//! Unit tests for the version module.
//!
//! Tests are organised by layer: domain values, bump rules, the rule
//! dispatcher, the in-memory adapter and the orchestration services.
