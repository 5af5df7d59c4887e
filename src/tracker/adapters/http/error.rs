//! Response-side error mapping for the façade.

use crate::tracker::domain::TrackerError;
use crate::tracker::ports::ArchiveError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Error envelope rendered as `{"error": …}` with a mapped status code.
///
/// Mapping: store not-found and cross-reference failures are 404,
/// scheduling conflicts are 406, and everything unexpected (undecodable
/// bodies, persistence trouble) is folded into 404 — the façade fails
/// closed.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// 404 envelope; also the fail-closed default.
    pub(crate) fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    /// 406 envelope for scheduling conflicts.
    pub(crate) fn conflict(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_ACCEPTABLE,
            message: message.into(),
        }
    }
}

impl From<TrackerError> for ApiError {
    fn from(error: TrackerError) -> Self {
        match error {
            TrackerError::SchedulingConflict => Self::conflict(error.to_string()),
            TrackerError::NotFound { .. } | TrackerError::EpicMismatch { .. } => {
                Self::not_found(error.to_string())
            }
        }
    }
}

impl From<ArchiveError> for ApiError {
    fn from(error: ArchiveError) -> Self {
        Self::not_found(format!("persistence failure: {error}"))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}
