use std::path::Path;
use std::sync::Arc;

use crate::application::ports::{ClassifierError, FrameSource, FrameSourceError};
use crate::domain::{ComputeDevice, InvalidSequenceLength, SequenceLength, Verdict};

use super::frame_preprocessor::{FramePreprocessor, PreprocessError};
use super::media_validator::{MediaValidator, VideoValidationError};
use super::round_to;
use super::video_model_cache::{ModelCacheError, VideoModelCache};

#[derive(Debug, Clone)]
pub struct VideoRequest<'a> {
    pub path: &'a Path,
    pub content_type: Option<&'a str>,
    pub sequence_length: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VideoReport {
    pub verdict: Verdict,
    pub confidence: f64,
    pub sequence_length: usize,
    pub device: ComputeDevice,
    pub faces_found: usize,
    pub total_frames_analyzed: usize,
    pub frame_images: Vec<String>,
}

pub struct VideoDetectionService {
    validator: MediaValidator,
    frame_source: Arc<dyn FrameSource>,
    preprocessor: Arc<FramePreprocessor>,
    models: VideoModelCache,
    device: ComputeDevice,
    allowed_lengths: Vec<usize>,
}

impl VideoDetectionService {
    pub fn new(
        validator: MediaValidator,
        frame_source: Arc<dyn FrameSource>,
        preprocessor: Arc<FramePreprocessor>,
        models: VideoModelCache,
        device: ComputeDevice,
        allowed_lengths: Vec<usize>,
    ) -> Self {
        Self {
            validator,
            frame_source,
            preprocessor,
            models,
            device,
            allowed_lengths,
        }
    }

    pub fn device(&self) -> ComputeDevice {
        self.device
    }

    pub fn models(&self) -> &VideoModelCache {
        &self.models
    }

    #[tracing::instrument(skip(self, request), fields(sequence_length = request.sequence_length))]
    pub async fn detect(&self, request: VideoRequest<'_>) -> Result<VideoReport, VideoDetectionError> {
        let sequence_length = SequenceLength::parse(request.sequence_length, &self.allowed_lengths)?;
        self.validator
            .validate_video(request.path, request.content_type)?;

        let model = self.models.get(sequence_length, self.device).await?;

        let info = self.frame_source.describe(request.path).await?;
        tracing::debug!(width = info.width, height = info.height, "Video probed");

        let frames = self
            .frame_source
            .read_frames(request.path, info, sequence_length.get())
            .await?;
        tracing::info!(frames = frames.len(), "Frames extracted");

        let preprocessor = Arc::clone(&self.preprocessor);
        let preprocessed = tokio::task::spawn_blocking(move || {
            preprocessor.process(&frames, sequence_length.get())
        })
        .await
        .map_err(|e| VideoDetectionError::Task(e.to_string()))??;

        tracing::info!(
            faces_found = preprocessed.faces_found,
            total = sequence_length.get(),
            padded = preprocessed.sequence.padded_frames(),
            "Faces detected"
        );

        let sequence = preprocessed.sequence;
        let probabilities = tokio::task::spawn_blocking(move || model.classify(&sequence))
            .await
            .map_err(|e| VideoDetectionError::Task(e.to_string()))??;

        let verdict = probabilities.verdict();
        let confidence = round_to(probabilities.confidence() as f64, 1);

        tracing::info!(%verdict, confidence, "Video prediction complete");

        Ok(VideoReport {
            verdict,
            confidence,
            sequence_length: sequence_length.get(),
            device: self.device,
            faces_found: preprocessed.faces_found,
            total_frames_analyzed: preprocessed.total_frames_analyzed,
            frame_images: preprocessed.frame_images,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum VideoDetectionError {
    #[error(transparent)]
    InvalidSequenceLength(#[from] InvalidSequenceLength),
    #[error(transparent)]
    Validation(#[from] VideoValidationError),
    #[error(transparent)]
    Model(#[from] ModelCacheError),
    #[error(transparent)]
    Decode(#[from] FrameSourceError),
    #[error(transparent)]
    Preprocess(#[from] PreprocessError),
    #[error(transparent)]
    Inference(#[from] ClassifierError),
    #[error("prediction task failed: {0}")]
    Task(String),
}

impl VideoDetectionError {
    /// Errors caused by the uploaded request rather than the service.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidSequenceLength(_)
                | Self::Validation(_)
                | Self::Decode(FrameSourceError::NoVideoStream)
                | Self::Decode(FrameSourceError::ProbeFailed(_))
                | Self::Decode(FrameSourceError::DecodingFailed(_))
                | Self::Preprocess(PreprocessError::NoFrames(_))
        )
    }
}
