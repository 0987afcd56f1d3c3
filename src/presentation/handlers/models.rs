use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::presentation::state::AppState;

use super::error::ApiError;

#[derive(Debug, Serialize)]
pub struct ModelEntry {
    pub filename: String,
    pub frames: usize,
    pub accuracy: String,
}

#[derive(Debug, Serialize)]
pub struct ModelsResponse {
    pub available_models: Vec<ModelEntry>,
    pub total: usize,
}

pub async fn models_handler(State(state): State<AppState>) -> Result<Json<ModelsResponse>, ApiError> {
    let mut artifacts = state
        .video_service
        .models()
        .catalog()
        .list()
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to list models");
            ApiError::internal(e.to_string())
        })?;
    artifacts.sort_by_key(|a| a.frames);

    let available_models: Vec<ModelEntry> = artifacts
        .into_iter()
        .map(|a| ModelEntry {
            accuracy: a.accuracy_label(),
            filename: a.filename,
            frames: a.frames,
        })
        .collect();

    Ok(Json(ModelsResponse {
        total: available_models.len(),
        available_models,
    }))
}
