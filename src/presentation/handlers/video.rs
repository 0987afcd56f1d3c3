use axum::Json;
use axum::extract::{Multipart, State};
use serde::Serialize;

use crate::application::services::{VideoReport, VideoRequest};
use crate::domain::Verdict;
use crate::presentation::state::AppState;

use super::error::ApiError;
use super::upload::Upload;

#[derive(Debug, Serialize)]
pub struct VideoPredictionResponse {
    pub prediction: Verdict,
    pub confidence: f64,
    pub sequence_length: usize,
    pub device: String,
    pub faces_found: usize,
    pub total_frames_analyzed: usize,
    pub frame_images: Vec<String>,
}

impl From<VideoReport> for VideoPredictionResponse {
    fn from(report: VideoReport) -> Self {
        Self {
            prediction: report.verdict,
            confidence: report.confidence,
            sequence_length: report.sequence_length,
            device: report.device.label().to_string(),
            faces_found: report.faces_found,
            total_frames_analyzed: report.total_frames_analyzed,
            frame_images: report.frame_images,
        }
    }
}

#[tracing::instrument(skip(state, multipart))]
pub async fn predict_video_handler(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<VideoPredictionResponse>, ApiError> {
    let upload = Upload::read(multipart, "").await?;

    let result = predict(&state, &upload).await;
    upload.discard();
    result.map(Json)
}

async fn predict(state: &AppState, upload: &Upload) -> Result<VideoPredictionResponse, ApiError> {
    let sequence_length = upload
        .field("sequence_length")
        .ok_or_else(|| ApiError::bad_request("sequence_length is required"))?
        .trim()
        .parse::<usize>()
        .map_err(|_| ApiError::bad_request("sequence_length must be an integer"))?;
    let face_focus = parse_flag(upload.field("face_focus"))?;

    tracing::info!(
        filename = %upload.display_name(),
        bytes = upload.size,
        sequence_length,
        face_focus,
        "Video prediction requested"
    );

    let report = state
        .video_service
        .detect(VideoRequest {
            path: upload.path(),
            content_type: upload.content_type.as_deref(),
            sequence_length,
        })
        .await?;

    Ok(report.into())
}

fn parse_flag(value: Option<&str>) -> Result<bool, ApiError> {
    match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
        None | Some("") => Ok(true),
        Some("true" | "1" | "yes" | "on") => Ok(true),
        Some("false" | "0" | "no" | "off") => Ok(false),
        Some(other) => Err(ApiError::bad_request(format!(
            "face_focus must be a boolean, got {other}"
        ))),
    }
}
