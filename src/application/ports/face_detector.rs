use image::RgbImage;

use crate::domain::FaceBox;

pub trait FaceDetector: Send + Sync {
    /// Returns the most confident face in the frame, if any.
    fn detect(&self, frame: &RgbImage) -> Result<Option<FaceBox>, FaceDetectionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum FaceDetectionError {
    #[error("face model loading failed: {0}")]
    ModelLoadFailed(String),
    #[error("face detection failed: {0}")]
    DetectionFailed(String),
}
