use std::path::{Path, PathBuf};

use async_trait::async_trait;

#[async_trait]
pub trait AudioTranscoder: Send + Sync {
    /// Converts `input` into a 16 kHz mono PCM WAV file and returns its path.
    /// The caller owns the returned file.
    async fn to_wav(&self, input: &Path) -> Result<PathBuf, TranscodeError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscodeError {
    #[error("ffmpeg not found. Please install ffmpeg.")]
    BinaryNotFound,
    #[error("Failed to convert audio: {0}")]
    Failed(String),
    #[error("Audio conversion timed out")]
    Timeout,
    #[error("Audio conversion failed: {0}")]
    Io(#[from] std::io::Error),
}
