use std::path::PathBuf;

use crate::application::ports::{CatalogError, ModelCatalog};
use crate::domain::ModelArtifact;

/// Scans a directory for checkpoints following the artifact naming scheme.
#[derive(Debug, Clone)]
pub struct FsModelCatalog {
    dir: PathBuf,
}

impl FsModelCatalog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ModelCatalog for FsModelCatalog {
    fn list(&self) -> Result<Vec<ModelArtifact>, CatalogError> {
        if !self.dir.is_dir() {
            tracing::warn!(dir = %self.dir.display(), "No models found");
            return Ok(Vec::new());
        }

        let entries = std::fs::read_dir(&self.dir).map_err(|source| CatalogError::Unreadable {
            path: self.dir.display().to_string(),
            source,
        })?;

        let mut artifacts: Vec<ModelArtifact> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .filter_map(|path| ModelArtifact::from_path(&path))
            .collect();
        artifacts.sort_by(|a, b| a.filename.cmp(&b.filename));

        Ok(artifacts)
    }
}
