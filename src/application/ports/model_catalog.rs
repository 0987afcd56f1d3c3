use crate::domain::ModelArtifact;

/// Lists trained video checkpoints available to the service.
pub trait ModelCatalog: Send + Sync {
    fn list(&self) -> Result<Vec<ModelArtifact>, CatalogError>;
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("cannot read model directory {path}: {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
