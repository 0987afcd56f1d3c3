use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::{Mutex, RwLock};

use crate::application::ports::{
    AudioClassifier, AudioClassifierError, AudioDecoder, AudioDecoderError, AudioModelInfo,
    AudioModelLoader, AudioTranscoder, LabelScore, TranscodeError,
};
use crate::domain::{Verdict, calibrate};

use super::media_validator::{AudioValidationError, MediaValidator};
use super::round_to;

pub const DEFAULT_TEMPERATURE: f64 = 3.0;

#[derive(Debug, Clone, PartialEq)]
pub struct AudioReport {
    pub verdict: Verdict,
    pub confidence: f64,
    pub model: String,
    pub real: f64,
    pub fake: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AudioModelStatus {
    #[serde(flatten)]
    pub info: AudioModelInfo,
    pub loaded: bool,
}

pub struct AudioDetectionService {
    validator: MediaValidator,
    transcoder: Arc<dyn AudioTranscoder>,
    decoder: Arc<dyn AudioDecoder>,
    loader: Arc<dyn AudioModelLoader>,
    classifier: RwLock<Option<Arc<dyn AudioClassifier>>>,
    load_lock: Mutex<()>,
    temperature: f64,
}

impl AudioDetectionService {
    pub fn new(
        validator: MediaValidator,
        transcoder: Arc<dyn AudioTranscoder>,
        decoder: Arc<dyn AudioDecoder>,
        loader: Arc<dyn AudioModelLoader>,
        temperature: f64,
    ) -> Self {
        Self {
            validator,
            transcoder,
            decoder,
            loader,
            classifier: RwLock::new(None),
            load_lock: Mutex::new(()),
            temperature,
        }
    }

    #[tracing::instrument(skip(self, path))]
    pub async fn detect(
        &self,
        path: &Path,
        content_type: Option<&str>,
    ) -> Result<AudioReport, AudioDetectionError> {
        tracing::info!(path = %path.display(), "Starting audio prediction");

        let format = self.validator.validate_audio(path, content_type)?;

        let transcoded = match format {
            Some(f) if f.is_native() => {
                tracing::info!(format = f.extension(), "Format is read directly, no conversion needed");
                None
            }
            _ => Some(TranscodedFile(self.transcoder.to_wav(path).await?)),
        };
        let wav_path = transcoded
            .as_ref()
            .map(|t| t.0.clone())
            .unwrap_or_else(|| path.to_path_buf());

        let decoder = Arc::clone(&self.decoder);
        let samples = tokio::task::spawn_blocking(move || decoder.decode(&wav_path))
            .await
            .map_err(|e| AudioDetectionError::Prediction(e.to_string()))??;
        drop(transcoded);

        tracing::debug!(samples = samples.len(), "Audio ready for inference");

        let classifier = self.classifier().await?;
        let scores = tokio::task::spawn_blocking(move || classifier.classify(&samples))
            .await
            .map_err(|e| AudioDetectionError::Prediction(e.to_string()))??;

        tracing::info!(?scores, "Raw prediction results");

        let calibrated = calibrate(
            find_score(&scores, "real"),
            find_score(&scores, "fake"),
            self.temperature,
        );

        tracing::info!(
            real = calibrated.real,
            fake = calibrated.fake,
            temperature = self.temperature,
            "Temperature-scaled scores"
        );

        let report = AudioReport {
            verdict: calibrated.verdict,
            confidence: round_to(calibrated.confidence(), 2),
            model: self.loader.info().model_id,
            real: round_to(calibrated.real * 100.0, 2),
            fake: round_to(calibrated.fake * 100.0, 2),
        };

        tracing::info!(verdict = %report.verdict, confidence = report.confidence, "Audio prediction complete");

        Ok(report)
    }

    /// Loads the classifier on first use and keeps it for later requests.
    /// Only loaders wait on `load_lock`; the slot is written once the load
    /// finishes so `status` and `unload` never wait on a load.
    async fn classifier(&self) -> Result<Arc<dyn AudioClassifier>, AudioDetectionError> {
        if let Some(classifier) = self.cached().await {
            tracing::debug!("Using cached audio classification pipeline");
            return Ok(classifier);
        }

        let _loading = self.load_lock.lock().await;
        if let Some(classifier) = self.cached().await {
            return Ok(classifier);
        }

        let loader = Arc::clone(&self.loader);
        let classifier = tokio::task::spawn_blocking(move || loader.load())
            .await
            .map_err(|e| AudioDetectionError::Prediction(e.to_string()))??;

        *self.classifier.write().await = Some(Arc::clone(&classifier));
        Ok(classifier)
    }

    async fn cached(&self) -> Option<Arc<dyn AudioClassifier>> {
        self.classifier.read().await.as_ref().map(Arc::clone)
    }

    pub async fn status(&self) -> AudioModelStatus {
        AudioModelStatus {
            info: self.loader.info(),
            loaded: self.classifier.read().await.is_some(),
        }
    }

    pub async fn unload(&self) {
        if self.classifier.write().await.take().is_some() {
            tracing::info!("Audio pipeline unloaded from memory");
        }
    }
}

fn find_score(scores: &[LabelScore], label: &str) -> Option<f64> {
    scores
        .iter()
        .find(|s| s.label.eq_ignore_ascii_case(label))
        .map(|s| s.score)
}

/// Intermediate WAV produced by the transcoder, removed when dropped.
struct TranscodedFile(PathBuf);

impl Drop for TranscodedFile {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.0) {
            Ok(()) => tracing::info!(path = %self.0.display(), "Cleaned up temporary WAV file"),
            Err(e) => tracing::warn!(path = %self.0.display(), error = %e, "Could not delete temporary WAV"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AudioDetectionError {
    #[error(transparent)]
    Validation(#[from] AudioValidationError),
    #[error(transparent)]
    Transcode(#[from] TranscodeError),
    #[error(transparent)]
    Decode(#[from] AudioDecoderError),
    #[error("Prediction failed: {0}")]
    Classifier(#[from] AudioClassifierError),
    #[error("Prediction failed: {0}")]
    Prediction(String),
}

impl AudioDetectionError {
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::Transcode(_) | Self::Decode(_)
        )
    }
}
