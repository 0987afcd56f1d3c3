use std::path::Path;

use async_trait::async_trait;
use image::RgbImage;

/// Stream properties reported by the decoder, after rotation is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoInfo {
    pub width: u32,
    pub height: u32,
}

#[async_trait]
pub trait FrameSource: Send + Sync {
    async fn describe(&self, path: &Path) -> Result<VideoInfo, FrameSourceError>;

    /// Decodes at most `max_frames` frames from the start of the video, in
    /// presentation order, as RGB images sized per `info`.
    async fn read_frames(
        &self,
        path: &Path,
        info: VideoInfo,
        max_frames: usize,
    ) -> Result<Vec<RgbImage>, FrameSourceError>;
}

#[derive(Debug, thiserror::Error)]
pub enum FrameSourceError {
    #[error("video decoder not available: {0}")]
    DecoderUnavailable(String),
    #[error("failed to probe video: {0}")]
    ProbeFailed(String),
    #[error("no video stream found")]
    NoVideoStream,
    #[error("failed to decode video: {0}")]
    DecodingFailed(String),
    #[error("video decoding timed out")]
    Timeout,
}
