//! HTTP surface for version computation.
//!
//! Routes:
//!
//! - `POST /compute-next-version` computes and stores a branch's next
//!   version.
//! - `GET /projects/:project_id/versions` lists a project's versions.
//! - `GET /check-pulse` reports liveness.
//!
//! Errors are rendered as `{"message": ...}` with the status chosen by
//! [`status_for`].

mod error;
mod handlers;
mod router;
mod state;

pub use error::{ApiError, ErrorBody, UNRECOVERABLE_MESSAGE, status_for};
pub use handlers::{
    ComputeNextVersionBody, NextVersionBody, ProjectVersionBody, ProjectVersionsBody, PulseBody,
};
pub use router::build_router;
pub use state::AppState;
