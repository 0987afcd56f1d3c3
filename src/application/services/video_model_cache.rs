use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OnceCell};

use crate::application::ports::{
    CatalogError, ClassifierError, ModelCatalog, VideoClassifier, VideoModelLoader,
};
use crate::domain::{ComputeDevice, SequenceLength, select_best_artifact};

type CacheKey = (SequenceLength, ComputeDevice);
type ModelSlot = Arc<OnceCell<Arc<dyn VideoClassifier>>>;

/// Keeps one loaded classifier per sequence length and device.
pub struct VideoModelCache {
    catalog: Arc<dyn ModelCatalog>,
    loader: Arc<dyn VideoModelLoader>,
    models: Mutex<HashMap<CacheKey, ModelSlot>>,
}

impl VideoModelCache {
    pub fn new(catalog: Arc<dyn ModelCatalog>, loader: Arc<dyn VideoModelLoader>) -> Self {
        Self {
            catalog,
            loader,
            models: Mutex::new(HashMap::new()),
        }
    }

    pub fn catalog(&self) -> &Arc<dyn ModelCatalog> {
        &self.catalog
    }

    /// Returns the cached classifier, loading it on first use. Concurrent
    /// requests for one key share a single load; other keys are not blocked.
    pub async fn get(
        &self,
        sequence_length: SequenceLength,
        device: ComputeDevice,
    ) -> Result<Arc<dyn VideoClassifier>, ModelCacheError> {
        let slot = {
            let mut models = self.models.lock().await;
            Arc::clone(models.entry((sequence_length, device)).or_default())
        };

        if let Some(model) = slot.get() {
            tracing::debug!(%sequence_length, %device, "Using cached video model");
            return Ok(Arc::clone(model));
        }

        let model = slot
            .get_or_try_init(|| self.load(sequence_length, device))
            .await?;
        Ok(Arc::clone(model))
    }

    async fn load(
        &self,
        sequence_length: SequenceLength,
        device: ComputeDevice,
    ) -> Result<Arc<dyn VideoClassifier>, ModelCacheError> {
        let artifacts = self.catalog.list()?;
        let artifact = select_best_artifact(&artifacts, sequence_length.get())
            .cloned()
            .ok_or(ModelCacheError::NoModel {
                frames: sequence_length.get(),
            })?;

        tracing::info!(
            model = %artifact.filename,
            accuracy = %artifact.accuracy,
            %device,
            "Loading video model"
        );

        let loader = Arc::clone(&self.loader);
        let model = tokio::task::spawn_blocking(move || loader.load(&artifact, device))
            .await
            .map_err(|e| ModelCacheError::Task(e.to_string()))??;

        tracing::info!(%sequence_length, "Video model loaded");
        Ok(model)
    }

    pub async fn loaded(&self) -> usize {
        self.models
            .lock()
            .await
            .values()
            .filter(|slot| slot.initialized())
            .count()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ModelCacheError {
    #[error("Failed to load model for {frames} frames")]
    NoModel { frames: usize },
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Load(#[from] ClassifierError),
    #[error("model loading task failed: {0}")]
    Task(String),
}
