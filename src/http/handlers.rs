//! Request handlers and wire bodies.

use super::{ApiError, AppState};
use crate::version::{
    ports::{VersionCalculator, VersionRepository},
    services::{ComputeNextVersionRequest, ErrorKind, ProjectVersion, ProjectVersions},
};
use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Body of `POST /compute-next-version`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeNextVersionBody {
    /// Branch to bump.
    pub branch_name: String,
    /// Owning project; defaults to `1`.
    pub project_id: Option<i64>,
    /// Optional bump hints such as `isMajor`.
    pub context: Option<HashMap<String, Option<String>>>,
}

impl From<ComputeNextVersionBody> for ComputeNextVersionRequest {
    fn from(body: ComputeNextVersionBody) -> Self {
        let ComputeNextVersionBody {
            branch_name,
            project_id,
            context,
        } = body;
        let mut request = Self::new(branch_name);
        if let Some(id) = project_id {
            request = request.with_project_id(id);
        }
        if let Some(entries) = context {
            request = request.with_context(entries);
        }
        request
    }
}

/// Successful compute response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NextVersionBody {
    /// Formatted version string.
    pub next_version: String,
}

/// One entry of the project versions listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectVersionBody {
    /// Storage identifier.
    pub id: i64,
    /// Branch identifier.
    pub identifier_name: String,
    /// Release number as stored.
    pub release_number: String,
    /// Display metadata.
    pub meta: Option<String>,
}

impl From<ProjectVersion> for ProjectVersionBody {
    fn from(version: ProjectVersion) -> Self {
        Self {
            id: version.id,
            identifier_name: version.identifier_name,
            release_number: version.release_number,
            meta: version.meta,
        }
    }
}

/// Project versions listing response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectVersionsBody {
    /// Listed project.
    pub project_id: i64,
    /// Sorted versions.
    pub versions: Vec<ProjectVersionBody>,
}

impl From<ProjectVersions> for ProjectVersionsBody {
    fn from(listing: ProjectVersions) -> Self {
        Self {
            project_id: listing.project_id,
            versions: listing
                .versions
                .into_iter()
                .map(ProjectVersionBody::from)
                .collect(),
        }
    }
}

/// Liveness response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PulseBody {
    /// Fixed liveness message.
    pub message: &'static str,
}

impl PulseBody {
    /// Message returned by the pulse check.
    pub const CHECKED: Self = Self {
        message: "Pulse checked!",
    };
}

fn rejected(detail: String) -> ApiError {
    ApiError::new(ErrorKind::Validation, detail)
}

/// `POST /compute-next-version`
pub(super) async fn compute_next_version<R, B>(
    State(state): State<AppState<R, B>>,
    payload: Result<Json<ComputeNextVersionBody>, JsonRejection>,
) -> Result<Json<NextVersionBody>, ApiError>
where
    R: VersionRepository + 'static,
    B: VersionCalculator + 'static,
{
    let Json(body) = payload.map_err(|rejection| rejected(rejection.body_text()))?;
    let next = state
        .compute()
        .compute_next_version(body.into(), state.cancellation())
        .await?;
    Ok(Json(NextVersionBody {
        next_version: next.formatted(),
    }))
}

/// `GET /projects/:project_id/versions`
pub(super) async fn project_versions<R, B>(
    State(state): State<AppState<R, B>>,
    project_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<ProjectVersionsBody>, ApiError>
where
    R: VersionRepository + 'static,
    B: VersionCalculator + 'static,
{
    let Path(id) = project_id.map_err(|rejection| rejected(rejection.body_text()))?;
    let listing = state
        .listing()
        .project_versions(id, state.cancellation())
        .await?;
    Ok(Json(listing.into()))
}
