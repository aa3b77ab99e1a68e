//! API error taxonomy and its HTTP mapping.
//!
//! Handlers return `Result<_, ApiError>`; the IntoResponse impl turns every
//! failure into a `{"error": ...}` body with the right status code, so no
//! partial results ever accompany an error.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// JSON body for every error response
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or contradictory request parameters
    #[error("{0}")]
    InvalidRequest(String),

    /// Recommendation request for a user with no review history
    #[error("User {user_id} not found")]
    UserNotFound { user_id: String },

    /// A dependency the request needs is not answering. The in-process
    /// catalog makes this unreachable today; the mapping stays so callers
    /// can rely on the contract if a remote dependency returns
    #[error("Upstream dependency unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Anything else is a bug or an I/O fault
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::UserNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::UpstreamUnavailable(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<search::SearchError> for ApiError {
    fn from(err: search::SearchError) -> Self {
        match err {
            search::SearchError::InvalidOrigin { .. } => ApiError::InvalidRequest(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("request failed: {:#}", self);
        }
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let bad = ApiError::InvalidRequest("either coordinates or city".to_string());
        assert_eq!(bad.status(), StatusCode::BAD_REQUEST);

        let missing = ApiError::UserNotFound {
            user_id: "u404".to_string(),
        };
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        let internal = ApiError::Internal(anyhow::anyhow!("boom"));
        assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_invalid_origin_maps_to_bad_request() {
        let err = search::SearchError::InvalidOrigin {
            lat: 123.0,
            lng: 78.4867,
        };
        let api: ApiError = err.into();
        assert_eq!(api.status(), StatusCode::BAD_REQUEST);
    }
}
