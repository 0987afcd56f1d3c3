use std::sync::Arc;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq)]
pub struct LabelScore {
    pub label: String,
    pub score: f64,
}

impl LabelScore {
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// Static description of the audio model, reported by the status endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AudioModelInfo {
    pub model_id: String,
    pub task: String,
    pub architecture: String,
    pub base_model: String,
    pub sample_rate: u32,
    pub labels: Vec<String>,
    pub reported_accuracy: f64,
}

pub trait AudioClassifier: Send + Sync {
    /// Returns one probability per label for 16 kHz mono samples.
    fn classify(&self, samples: &[f32]) -> Result<Vec<LabelScore>, AudioClassifierError>;
}

pub trait AudioModelLoader: Send + Sync {
    fn info(&self) -> AudioModelInfo;

    fn load(&self) -> Result<Arc<dyn AudioClassifier>, AudioClassifierError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AudioClassifierError {
    #[error("Failed to load audio classification model: {0}")]
    ModelLoadFailed(String),
    #[error("inference failed: {0}")]
    InferenceFailed(String),
}
