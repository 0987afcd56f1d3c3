mod audio;
mod error;
mod health;
mod models;
mod upload;
mod video;

pub use audio::{
    AudioPredictionResponse, audio_model_handler, is_audio_content_type, predict_audio_handler,
};
pub use error::{ApiError, ErrorResponse};
pub use health::{SERVICE_NAME, health_handler, root_handler};
pub use models::{ModelsResponse, models_handler};
pub use video::{VideoPredictionResponse, predict_video_handler};
