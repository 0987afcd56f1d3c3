use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::config::CorsSettings;
use crate::presentation::handlers::{
    audio_model_handler, health_handler, models_handler, predict_audio_handler,
    predict_video_handler, root_handler,
};
use crate::presentation::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.settings.cors);
    let body_limit = DefaultBodyLimit::max(state.settings.max_upload_bytes());

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/api/predict", post(predict_video_handler))
        .route("/api/models", get(models_handler))
        .route("/api/audio/predict", post(predict_audio_handler))
        .route("/api/audio/model", get(audio_model_handler))
        .layer(body_limit)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}

fn cors_layer(settings: &CorsSettings) -> CorsLayer {
    let origins: Vec<HeaderValue> = settings
        .allowed_origins()
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}
