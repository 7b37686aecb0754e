//! API error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use vsplit_pipeline::PipelineError;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

impl ApiError {
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            // A bad or missing shared secret is a 403, matching the wire
            // contract callers already depend on.
            ApiError::Unauthorized(_) => StatusCode::FORBIDDEN,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Pipeline(e) if e.is_invalid_request() => StatusCode::BAD_REQUEST,
            ApiError::Config(_) | ApiError::Internal(_) | ApiError::Pipeline(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// One JSON error object per failed request, `{"error": "<message>"}`.
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        // Stage-specific messages aid operability; they carry backend and
        // ffmpeg diagnostics but never credentials.
        let body = ErrorResponse {
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
        assert_eq!(
            ApiError::unauthorized("bad key").status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::bad_request("missing").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::config("no storage").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::Pipeline(PipelineError::invalid_request("empty bucket")).status_code(),
            StatusCode::BAD_REQUEST
        );
    }
}
