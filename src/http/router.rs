//! Router construction for the version server.

use super::{AppState, PulseBody, error::handle_panic, handlers};
use crate::version::ports::{VersionCalculator, VersionRepository};
use axum::{
    Json, Router,
    routing::{get, post},
};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

/// Builds the axum router with every route and middleware layer.
#[must_use]
pub fn build_router<R, B>(state: AppState<R, B>) -> Router
where
    R: VersionRepository + 'static,
    B: VersionCalculator + 'static,
{
    Router::new()
        .route(
            "/compute-next-version",
            post(handlers::compute_next_version::<R, B>),
        )
        .route(
            "/projects/:project_id/versions",
            get(handlers::project_versions::<R, B>),
        )
        .route("/check-pulse", get(|| async { Json(PulseBody::CHECKED) }))
        .with_state(state)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
}
