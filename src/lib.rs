//! Openversion: branch-aware version numbering service.
//!
//! This crate computes the next four-component version number for a branch
//! of a project, persists it under optimistic concurrency control, and
//! serves the result over HTTP.
//!
//! # Architecture
//!
//! Openversion follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for storage and bump calculation
//! - **Adapters**: Concrete implementations of ports (`PostgreSQL`, memory)
//!
//! # Modules
//!
//! - [`version`]: Version domain, bump rules and orchestration
//! - [`http`]: axum routes over the version services
//! - [`cancellation`]: Cooperative cancellation signal
//! - [`config`]: Layered server configuration
//! - [`telemetry`]: Tracing subscriber setup

pub mod cancellation;
pub mod config;
pub mod http;
pub mod telemetry;
pub mod version;
