use std::path::Path;

pub trait AudioDecoder: Send + Sync {
    /// Decodes the file to mono f32 samples at the classifier sample rate.
    fn decode(&self, path: &Path) -> Result<Vec<f32>, AudioDecoderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AudioDecoderError {
    #[error("audio decoding failed: {0}")]
    DecodingFailed(String),
    #[error("cannot read audio file: {0}")]
    Io(#[from] std::io::Error),
}
