use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use crate::application::ports::{AudioTranscoder, TranscodeError};

use super::audio_decoder::TARGET_SAMPLE_RATE;

pub const DEFAULT_TRANSCODE_TIMEOUT: Duration = Duration::from_secs(60);
const STDERR_EXCERPT: usize = 200;

/// Converts audio the decoder cannot read (MP3, M4A, AAC, WMA) into
/// 16 kHz mono signed 16-bit WAV by shelling out to `ffmpeg`.
#[derive(Debug, Clone)]
pub struct FfmpegTranscoder {
    binary: String,
    timeout: Duration,
}

impl FfmpegTranscoder {
    pub fn new(binary: impl Into<String>, timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            timeout,
        }
    }
}

impl Default for FfmpegTranscoder {
    fn default() -> Self {
        Self::new("ffmpeg", DEFAULT_TRANSCODE_TIMEOUT)
    }
}

#[async_trait]
impl AudioTranscoder for FfmpegTranscoder {
    async fn to_wav(&self, input: &Path) -> Result<PathBuf, TranscodeError> {
        let output = tempfile::Builder::new()
            .prefix("deepscan-")
            .suffix(".wav")
            .tempfile()?
            .into_temp_path()
            .keep()
            .map_err(|e| TranscodeError::Io(e.error))?;

        tracing::info!(input = %input.display(), "Converting audio to WAV using ffmpeg");

        match self.run(input, &output).await {
            Ok(()) => {
                tracing::info!(output = %output.display(), "Audio converted to WAV");
                Ok(output)
            }
            Err(e) => {
                let _ = std::fs::remove_file(&output);
                Err(e)
            }
        }
    }
}

impl FfmpegTranscoder {
    async fn run(&self, input: &Path, output: &Path) -> Result<(), TranscodeError> {
        let sample_rate = TARGET_SAMPLE_RATE.to_string();
        let child = Command::new(&self.binary)
            .arg("-y")
            .arg("-i")
            .arg(input)
            .args(["-ar", &sample_rate, "-ac", "1", "-c:a", "pcm_s16le"])
            .arg(output)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => TranscodeError::BinaryNotFound,
                _ => TranscodeError::Io(e),
            })?;

        let result = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| TranscodeError::Timeout)??;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            tracing::error!(stderr = %stderr, "ffmpeg conversion failed");
            return Err(TranscodeError::Failed(excerpt(&stderr, STDERR_EXCERPT)));
        }

        Ok(())
    }
}

/// First `limit` characters of `text`.
pub fn excerpt(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}

/// Verifies that `binary -version` runs.
pub fn check_ffmpeg_binary(binary: &str) -> Result<(), TranscodeError> {
    let output = std::process::Command::new(binary)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => TranscodeError::BinaryNotFound,
            _ => TranscodeError::Io(e),
        })?;

    if output.success() {
        Ok(())
    } else {
        Err(TranscodeError::Failed(format!("{binary} -version exited with {output}")))
    }
}
