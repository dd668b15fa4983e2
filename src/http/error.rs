//! Mapping from service failures to HTTP responses.

use crate::version::services::{ComputeNextVersionError, ErrorKind, ProjectVersionsError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::any::Any;
use tracing::{error, warn};

/// Message returned in place of server-side failure details.
pub const UNRECOVERABLE_MESSAGE: &str = "Unrecoverable error encountered.";

/// JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable description.
    pub message: String,
}

/// Error returned by HTTP handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    kind: ErrorKind,
    detail: String,
}

impl ApiError {
    /// Creates an error of `kind` with a diagnostic detail.
    ///
    /// Details of server-side kinds are logged and never sent to clients.
    #[must_use]
    pub fn new(kind: ErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }

    /// Returns the error classification.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        status_for(self.kind)
    }
}

/// Maps an error kind to its HTTP status.
#[must_use]
pub const fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation | ErrorKind::UnsupportedBranch => StatusCode::BAD_REQUEST,
        ErrorKind::ConcurrencyConflict => StatusCode::CONFLICT,
        ErrorKind::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
        ErrorKind::Application | ErrorKind::Unexpected => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<ComputeNextVersionError> for ApiError {
    fn from(err: ComputeNextVersionError) -> Self {
        Self::new(err.kind(), err.to_string())
    }
}

impl From<ProjectVersionsError> for ApiError {
    fn from(err: ProjectVersionsError) -> Self {
        Self::new(err.kind(), err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            error!(kind = ?self.kind, detail = %self.detail, "request failed");
            UNRECOVERABLE_MESSAGE.to_owned()
        } else {
            warn!(kind = ?self.kind, detail = %self.detail, "request rejected");
            self.detail
        };
        (status, Json(ErrorBody { message })).into_response()
    }
}

/// Converts a handler panic into a generic 500 response.
pub(crate) fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = payload.downcast::<String>().map_or_else(
        |other| {
            other
                .downcast_ref::<&str>()
                .map_or("non-string panic payload", |message| *message)
                .to_owned()
        },
        |message| *message,
    );
    ApiError::new(ErrorKind::Unexpected, detail).into_response()
}
