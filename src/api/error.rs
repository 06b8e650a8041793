//! API error type mapped to HTTP status codes and JSON bodies.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::PoseError;
use crate::wellness::WellnessError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or incomplete request (400)
    #[error("{message}")]
    BadRequest { message: String },

    /// Frame could not be decoded into an image (400)
    #[error("invalid image: {0}")]
    InvalidImage(String),

    /// Inference did not finish in time (503)
    #[error("pose inference timed out after {seconds}s")]
    Timeout { seconds: u64 },

    /// Pipeline failure for a decoded frame (500)
    #[error("pose inference failed: {0}")]
    Pose(#[from] PoseError),

    #[error(transparent)]
    Wellness(#[from] WellnessError),

    /// Anything else (500)
    #[error("internal error: {message}")]
    Internal { message: String },
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Rejects a request that lacks any of the named fields.
    pub fn missing_fields(fields: &[&str]) -> Self {
        Self::bad_request(format!("Missing required fields: {}", fields.join(", ")))
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } | Self::InvalidImage(_) | Self::Wellness(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Timeout { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::Pose(_) | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::BadRequest { .. } => "BAD_REQUEST",
            Self::InvalidImage(_) => "INVALID_IMAGE",
            Self::Timeout { .. } => "INFERENCE_TIMEOUT",
            Self::Pose(PoseError::FeatureDimensionMismatch { .. }) => "FEATURE_DIMENSION_MISMATCH",
            Self::Pose(_) => "INFERENCE_ERROR",
            Self::Wellness(_) => "INVALID_MEASUREMENT",
            Self::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, code = self.error_code(), "API error");
        } else {
            tracing::warn!(error = %self, code = self.error_code(), "API error");
        }

        let body = ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
