use std::sync::Arc;

use crate::domain::{ClassProbabilities, ComputeDevice, FrameSequence, ModelArtifact};

pub trait VideoClassifier: Send + Sync {
    fn classify(&self, frames: &FrameSequence) -> Result<ClassProbabilities, ClassifierError>;
}

pub trait VideoModelLoader: Send + Sync {
    fn load(
        &self,
        artifact: &ModelArtifact,
        device: ComputeDevice,
    ) -> Result<Arc<dyn VideoClassifier>, ClassifierError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("model loading failed: {0}")]
    ModelLoadFailed(String),
    #[error("inference failed: {0}")]
    InferenceFailed(String),
    #[error("unexpected input shape: {0}")]
    InvalidInput(String),
}
