use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use image::RgbImage;
use serde::Deserialize;
use tokio::process::Command;

use crate::application::ports::{FrameSource, FrameSourceError, VideoInfo};

pub const DEFAULT_DECODE_TIMEOUT: Duration = Duration::from_secs(120);

/// Decodes frames by piping raw RGB24 out of `ffmpeg`. Frame dimensions come
/// from `ffprobe`, corrected for rotation metadata since `ffmpeg` autorotates.
#[derive(Debug, Clone)]
pub struct FfmpegFrameSource {
    ffmpeg: String,
    ffprobe: String,
    timeout: Duration,
}

impl FfmpegFrameSource {
    pub fn new(ffmpeg: impl Into<String>, ffprobe: impl Into<String>, timeout: Duration) -> Self {
        Self {
            ffmpeg: ffmpeg.into(),
            ffprobe: ffprobe.into(),
            timeout,
        }
    }

    async fn run(&self, command: &mut Command) -> Result<std::process::Output, FrameSourceError> {
        let child = command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| FrameSourceError::DecoderUnavailable(e.to_string()))?;

        tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| FrameSourceError::Timeout)?
            .map_err(|e| FrameSourceError::DecodingFailed(e.to_string()))
    }
}

impl Default for FfmpegFrameSource {
    fn default() -> Self {
        Self::new("ffmpeg", "ffprobe", DEFAULT_DECODE_TIMEOUT)
    }
}

#[async_trait]
impl FrameSource for FfmpegFrameSource {
    async fn describe(&self, path: &Path) -> Result<VideoInfo, FrameSourceError> {
        let output = self
            .run(
                Command::new(&self.ffprobe)
                    .args(["-v", "error", "-select_streams", "v:0"])
                    .args([
                        "-show_entries",
                        "stream=width,height:stream_tags=rotate:stream_side_data=rotation",
                    ])
                    .args(["-of", "json"])
                    .arg(path),
            )
            .await?;

        if !output.status.success() {
            return Err(FrameSourceError::ProbeFailed(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        parse_probe(&String::from_utf8_lossy(&output.stdout))
    }

    async fn read_frames(
        &self,
        path: &Path,
        info: VideoInfo,
        max_frames: usize,
    ) -> Result<Vec<RgbImage>, FrameSourceError> {
        let frame_len = info.width as usize * info.height as usize * 3;

        let output = self
            .run(
                Command::new(&self.ffmpeg)
                    .args(["-v", "error", "-i"])
                    .arg(path)
                    .args(["-map", "0:v:0", "-frames:v"])
                    .arg(max_frames.to_string())
                    .args(["-f", "rawvideo", "-pix_fmt", "rgb24", "pipe:1"]),
            )
            .await?;

        if !output.status.success() {
            return Err(FrameSourceError::DecodingFailed(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        let frames = split_frames(&output.stdout, info)?;
        tracing::debug!(
            frames = frames.len(),
            width = info.width,
            height = info.height,
            bytes = frame_len * frames.len(),
            "Decoded raw video frames"
        );

        Ok(frames)
    }
}

/// Cuts a raw RGB24 stream into frames. A trailing partial frame is dropped.
pub fn split_frames(raw: &[u8], info: VideoInfo) -> Result<Vec<RgbImage>, FrameSourceError> {
    let frame_len = info.width as usize * info.height as usize * 3;
    if frame_len == 0 {
        return Err(FrameSourceError::NoVideoStream);
    }

    raw.chunks_exact(frame_len)
        .map(|chunk| {
            RgbImage::from_raw(info.width, info.height, chunk.to_vec()).ok_or_else(|| {
                FrameSourceError::DecodingFailed("frame buffer size mismatch".to_string())
            })
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    streams: Vec<ProbeStream>,
}

#[derive(Debug, Deserialize)]
struct ProbeStream {
    width: Option<u32>,
    height: Option<u32>,
    #[serde(default)]
    tags: Option<ProbeTags>,
    #[serde(default)]
    side_data_list: Vec<ProbeSideData>,
}

#[derive(Debug, Deserialize)]
struct ProbeTags {
    rotate: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProbeSideData {
    rotation: Option<f64>,
}

/// Parses `ffprobe -of json` output for the first video stream.
pub fn parse_probe(json: &str) -> Result<VideoInfo, FrameSourceError> {
    let probe: ProbeOutput =
        serde_json::from_str(json).map_err(|e| FrameSourceError::ProbeFailed(e.to_string()))?;

    let stream = probe
        .streams
        .into_iter()
        .next()
        .ok_or(FrameSourceError::NoVideoStream)?;

    let (width, height) = match (stream.width, stream.height) {
        (Some(w), Some(h)) if w > 0 && h > 0 => (w, h),
        _ => return Err(FrameSourceError::NoVideoStream),
    };

    let rotation = stream
        .side_data_list
        .iter()
        .find_map(|s| s.rotation)
        .or_else(|| {
            stream
                .tags
                .as_ref()
                .and_then(|t| t.rotate.as_deref())
                .and_then(|r| r.parse::<f64>().ok())
        })
        .unwrap_or(0.0);

    let quarter_turns = (rotation / 90.0).round() as i64;
    Ok(if quarter_turns.rem_euclid(2) == 1 {
        VideoInfo {
            width: height,
            height: width,
        }
    } else {
        VideoInfo { width, height }
    })
}
