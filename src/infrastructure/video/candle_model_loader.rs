use std::sync::Arc;

use crate::application::ports::{ClassifierError, VideoClassifier, VideoModelLoader};
use crate::domain::{ComputeDevice, ModelArtifact};
use crate::infrastructure::ml::candle_device;

use super::resnext_lstm::ResNextLstm;

/// Loads ResNeXt-LSTM checkpoints onto the requested device.
#[derive(Debug, Clone, Copy)]
pub struct CandleModelLoader {
    image_size: usize,
}

impl CandleModelLoader {
    pub fn new(image_size: usize) -> Self {
        Self { image_size }
    }
}

impl VideoModelLoader for CandleModelLoader {
    fn load(
        &self,
        artifact: &ModelArtifact,
        device: ComputeDevice,
    ) -> Result<Arc<dyn VideoClassifier>, ClassifierError> {
        let device = candle_device(device)
            .map_err(|e| ClassifierError::ModelLoadFailed(format!("device: {}", e)))?;

        tracing::info!(path = %artifact.path.display(), device = ?device, "Reading checkpoint");

        let model = ResNextLstm::load(&artifact.path, &device, self.image_size)?;
        Ok(Arc::new(model))
    }
}
