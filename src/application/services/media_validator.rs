use std::path::Path;

use crate::domain::{AudioFormat, is_supported_audio_mime};

const BYTES_PER_MB: u64 = 1024 * 1024;

/// Upload checks run before any decoding.
#[derive(Debug, Clone, Copy)]
pub struct MediaValidator {
    audio_max_mb: u64,
    video_max_mb: u64,
}

impl MediaValidator {
    pub fn new(audio_max_mb: u64, video_max_mb: u64) -> Self {
        Self {
            audio_max_mb,
            video_max_mb,
        }
    }

    /// Returns the detected format, or `None` when the file has no extension.
    pub fn validate_audio(
        &self,
        path: &Path,
        content_type: Option<&str>,
    ) -> Result<Option<AudioFormat>, AudioValidationError> {
        let size = std::fs::metadata(path)
            .map_err(|_| AudioValidationError::NotFound)?
            .len();

        if size == 0 {
            return Err(AudioValidationError::Empty);
        }
        if size > self.audio_max_mb * BYTES_PER_MB {
            return Err(AudioValidationError::TooLarge {
                max_mb: self.audio_max_mb,
            });
        }

        let format = match path.extension().and_then(|e| e.to_str()) {
            None | Some("") => None,
            Some(ext) => Some(AudioFormat::from_extension(ext).ok_or_else(|| {
                AudioValidationError::UnsupportedFormat {
                    extension: format!(".{}", ext.to_ascii_lowercase()),
                    supported: AudioFormat::supported_list(),
                }
            })?),
        };

        if let Some(content_type) = content_type.filter(|c| !c.is_empty()) {
            if !is_supported_audio_mime(content_type) {
                return Err(AudioValidationError::InvalidContentType(
                    content_type.to_string(),
                ));
            }
        }

        tracing::info!(path = %path.display(), bytes = size, "Audio file validated");
        Ok(format)
    }

    pub fn validate_video(
        &self,
        path: &Path,
        content_type: Option<&str>,
    ) -> Result<u64, VideoValidationError> {
        if !content_type.is_some_and(|c| c.starts_with("video/")) {
            return Err(VideoValidationError::NotVideo);
        }

        let size = std::fs::metadata(path)
            .map_err(|_| VideoValidationError::NotFound)?
            .len();

        if size == 0 {
            return Err(VideoValidationError::Empty);
        }
        if size > self.video_max_mb * BYTES_PER_MB {
            return Err(VideoValidationError::TooLarge {
                max_mb: self.video_max_mb,
            });
        }

        Ok(size)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AudioValidationError {
    #[error("Audio file not found")]
    NotFound,
    #[error("Audio file is empty")]
    Empty,
    #[error("Audio file too large (max {max_mb}MB)")]
    TooLarge { max_mb: u64 },
    #[error("Unsupported audio format: {extension}. Supported formats: {supported}")]
    UnsupportedFormat {
        extension: String,
        supported: String,
    },
    #[error("Invalid content type: {0}. Must be an audio file.")]
    InvalidContentType(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VideoValidationError {
    #[error("File must be a video")]
    NotVideo,
    #[error("Video file not found")]
    NotFound,
    #[error("Video file is empty")]
    Empty,
    #[error("Video file too large (max {max_mb}MB)")]
    TooLarge { max_mb: u64 },
}
