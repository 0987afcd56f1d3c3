use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::services::{AudioDetectionError, VideoDetectionError};

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

/// Error returned by every handler, rendered as `{"detail": ...}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl ApiError {
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            detail: detail.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorResponse { detail: self.detail })).into_response()
    }
}

impl From<VideoDetectionError> for ApiError {
    fn from(e: VideoDetectionError) -> Self {
        if e.is_client_error() {
            tracing::warn!(error = %e, "Rejected video request");
            Self::bad_request(e.to_string())
        } else {
            tracing::error!(error = %e, "Video prediction failed");
            Self::internal(e.to_string())
        }
    }
}

impl From<AudioDetectionError> for ApiError {
    fn from(e: AudioDetectionError) -> Self {
        if e.is_client_error() {
            tracing::warn!(error = %e, "Rejected audio request");
            Self::bad_request(e.to_string())
        } else {
            tracing::error!(error = %e, "Audio prediction failed");
            Self::internal(e.to_string())
        }
    }
}
