mod audio_detection_service;
mod frame_preprocessor;
mod media_validator;
mod video_detection_service;
mod video_model_cache;

pub use audio_detection_service::{
    AudioDetectionError, AudioDetectionService, AudioModelStatus, AudioReport, DEFAULT_TEMPERATURE,
};
pub use frame_preprocessor::{
    FACE_PADDING, FramePreprocessor, IMAGE_SIZE, MAX_DISPLAY_FRAMES, PreprocessError,
    PreprocessedVideo, PreprocessorConfig,
};
pub use media_validator::{AudioValidationError, MediaValidator, VideoValidationError};
pub use video_detection_service::{
    VideoDetectionError, VideoDetectionService, VideoReport, VideoRequest,
};
pub use video_model_cache::{ModelCacheError, VideoModelCache};

/// Rounds half away from zero to `places` decimals.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
