use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::presentation::state::AppState;

pub const SERVICE_NAME: &str = "Deepfake Detection API";

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Serialize)]
pub struct ServiceInfoResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub device: String,
    pub capabilities: Vec<String>,
}

pub async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
        }),
    )
}

pub async fn root_handler(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(ServiceInfoResponse {
            status: "online".to_string(),
            service: SERVICE_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            device: state.video_service.device().label().to_string(),
            capabilities: vec!["video".to_string(), "audio".to_string()],
        }),
    )
}
