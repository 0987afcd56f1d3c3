use axum::Json;
use axum::extract::{Multipart, State};
use serde::Serialize;

use crate::application::services::{AudioModelStatus, AudioReport};
use crate::domain::Verdict;
use crate::presentation::state::AppState;

use super::error::ApiError;
use super::upload::Upload;

#[derive(Debug, Serialize)]
pub struct AllScores {
    pub real: f64,
    pub fake: f64,
}

#[derive(Debug, Serialize)]
pub struct AudioPredictionResponse {
    pub prediction: Verdict,
    pub confidence: f64,
    pub model: String,
    pub all_scores: AllScores,
}

impl From<AudioReport> for AudioPredictionResponse {
    fn from(report: AudioReport) -> Self {
        Self {
            prediction: report.verdict,
            confidence: report.confidence,
            model: report.model,
            all_scores: AllScores {
                real: report.real,
                fake: report.fake,
            },
        }
    }
}

/// A missing or blank content type is accepted; the extension decides.
pub fn is_audio_content_type(content_type: Option<&str>) -> bool {
    content_type
        .map(str::trim)
        .filter(|ct| !ct.is_empty())
        .is_none_or(|ct| ct.starts_with("audio/"))
}

#[tracing::instrument(skip(state, multipart))]
pub async fn predict_audio_handler(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AudioPredictionResponse>, ApiError> {
    let upload = Upload::read(multipart, ".wav").await?;

    if !is_audio_content_type(upload.content_type.as_deref()) {
        upload.discard();
        return Err(ApiError::bad_request("File must be an audio file"));
    }

    tracing::info!(
        filename = %upload.display_name(),
        bytes = upload.size,
        "Audio prediction requested"
    );

    let result = state
        .audio_service
        .detect(upload.path(), upload.content_type.as_deref())
        .await;
    upload.discard();

    Ok(Json(result?.into()))
}

pub async fn audio_model_handler(State(state): State<AppState>) -> Json<AudioModelStatus> {
    Json(state.audio_service.status().await)
}
