use std::io::Cursor;
use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, RgbImage};

use crate::application::ports::{FaceDetectionError, FaceDetector};
use crate::domain::{EmptySequence, FrameSequence, NormalizedFrame};

pub const IMAGE_SIZE: u32 = 112;
pub const FACE_PADDING: u32 = 40;
pub const MAX_DISPLAY_FRAMES: usize = 6;

const MEAN: [f32; 3] = [0.485, 0.456, 0.406];
const STD: [f32; 3] = [0.229, 0.224, 0.225];
const DISPLAY_EDGE: u32 = 256;

#[derive(Debug, Clone)]
pub struct PreprocessorConfig {
    pub image_size: u32,
    pub face_padding: u32,
    pub max_display_frames: usize,
}

impl Default for PreprocessorConfig {
    fn default() -> Self {
        Self {
            image_size: IMAGE_SIZE,
            face_padding: FACE_PADDING,
            max_display_frames: MAX_DISPLAY_FRAMES,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PreprocessedVideo {
    pub sequence: FrameSequence,
    pub faces_found: usize,
    pub total_frames_analyzed: usize,
    /// PNG data URLs of the first face crops.
    pub frame_images: Vec<String>,
}

/// Turns decoded frames into the fixed-length, normalized classifier input.
pub struct FramePreprocessor {
    detector: Arc<dyn FaceDetector>,
    config: PreprocessorConfig,
}

impl FramePreprocessor {
    pub fn new(detector: Arc<dyn FaceDetector>, config: PreprocessorConfig) -> Self {
        Self { detector, config }
    }

    pub fn process(
        &self,
        frames: &[RgbImage],
        sequence_length: usize,
    ) -> Result<PreprocessedVideo, PreprocessError> {
        let mut normalized: Vec<NormalizedFrame> = Vec::with_capacity(sequence_length);
        let mut frame_images = Vec::new();
        let mut faces_found = 0;

        for (index, frame) in frames.iter().take(sequence_length).enumerate() {
            let (face, found) = self.crop_face(frame)?;

            if found {
                faces_found += 1;
                if frame_images.len() < self.config.max_display_frames {
                    match encode_data_url(&face) {
                        Ok(url) => frame_images.push(url),
                        Err(e) => {
                            tracing::warn!(frame = index, error = %e, "Failed to encode face crop")
                        }
                    }
                }
            }

            normalized.push(self.normalize(&face));
        }

        let total_frames_analyzed = normalized.len();

        tracing::debug!(
            faces_found,
            total_frames_analyzed,
            sequence_length,
            "Frames preprocessed"
        );

        let sequence = FrameSequence::assemble(normalized, sequence_length)?;

        Ok(PreprocessedVideo {
            sequence,
            faces_found,
            total_frames_analyzed,
            frame_images,
        })
    }

    /// Crops the padded face region, or returns the whole frame when no face
    /// is detected.
    fn crop_face(&self, frame: &RgbImage) -> Result<(RgbImage, bool), PreprocessError> {
        let (width, height) = frame.dimensions();

        let face = self
            .detector
            .detect(frame)?
            .map(|b| b.padded(self.config.face_padding, width, height))
            .filter(|b| !b.is_empty());

        Ok(match face {
            Some(b) => (
                imageops::crop_imm(frame, b.left, b.top, b.width(), b.height()).to_image(),
                true,
            ),
            None => (frame.clone(), false),
        })
    }

    /// Resizes to a square and converts to CHW floats normalized with the
    /// ImageNet statistics.
    pub fn normalize(&self, image: &RgbImage) -> NormalizedFrame {
        let size = self.config.image_size;
        let resized = imageops::resize(image, size, size, FilterType::Triangle);
        let plane = (size * size) as usize;

        let mut data = vec![0f32; plane * 3];
        for (i, pixel) in resized.pixels().enumerate() {
            for c in 0..3 {
                let value = pixel.0[c] as f32 / 255.0;
                data[c * plane + i] = (value - MEAN[c]) / STD[c];
            }
        }

        Arc::from(data)
    }
}

fn encode_data_url(image: &RgbImage) -> Result<String, image::ImageError> {
    let thumbnail = DynamicImage::ImageRgb8(image.clone()).thumbnail(DISPLAY_EDGE, DISPLAY_EDGE);
    let mut buffer = Cursor::new(Vec::new());
    thumbnail.write_to(&mut buffer, ImageFormat::Png)?;
    Ok(format!(
        "data:image/png;base64,{}",
        STANDARD.encode(buffer.into_inner())
    ))
}

#[derive(Debug, thiserror::Error)]
pub enum PreprocessError {
    #[error(transparent)]
    FaceDetection(#[from] FaceDetectionError),
    #[error("Video contains no decodable frames")]
    NoFrames(#[from] EmptySequence),
}
