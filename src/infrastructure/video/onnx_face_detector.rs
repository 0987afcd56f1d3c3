use std::path::Path;
use std::sync::Mutex;

use image::RgbImage;
use image::imageops::{self, FilterType};
use ndarray::Array4;
use ort::session::Session;
use ort::value::TensorRef;

use crate::application::ports::{FaceDetectionError, FaceDetector};
use crate::domain::FaceBox;

pub const DEFAULT_SCORE_THRESHOLD: f32 = 0.7;
const INPUT_WIDTH: u32 = 320;
const INPUT_HEIGHT: u32 = 240;

/// Ultra-Light-Fast face detector (RFB-320) exported to ONNX. Outputs are
/// per-anchor `[background, face]` scores and normalized corner boxes.
pub struct OnnxFaceDetector {
    session: Mutex<Session>,
    score_threshold: f32,
}

impl OnnxFaceDetector {
    pub fn new(model_path: &Path, score_threshold: f32) -> Result<Self, FaceDetectionError> {
        tracing::info!(model = %model_path.display(), score_threshold, "Loading face detector");

        let session = Session::builder()
            .map_err(|e| FaceDetectionError::ModelLoadFailed(e.to_string()))?
            .commit_from_file(model_path)
            .map_err(|e| FaceDetectionError::ModelLoadFailed(e.to_string()))?;

        Ok(Self {
            session: Mutex::new(session),
            score_threshold,
        })
    }

    fn input_tensor(frame: &RgbImage) -> Array4<f32> {
        let resized = imageops::resize(frame, INPUT_WIDTH, INPUT_HEIGHT, FilterType::Triangle);
        let mut input =
            Array4::<f32>::zeros((1, 3, INPUT_HEIGHT as usize, INPUT_WIDTH as usize));
        for (x, y, pixel) in resized.enumerate_pixels() {
            for c in 0..3 {
                input[[0, c, y as usize, x as usize]] = (pixel.0[c] as f32 - 127.0) / 128.0;
            }
        }
        input
    }
}

impl FaceDetector for OnnxFaceDetector {
    fn detect(&self, frame: &RgbImage) -> Result<Option<FaceBox>, FaceDetectionError> {
        let input = Self::input_tensor(frame);
        let tensor = TensorRef::from_array_view(input.view())
            .map_err(|e| FaceDetectionError::DetectionFailed(e.to_string()))?;

        let mut session = self.session.lock().map_err(|_| {
            FaceDetectionError::DetectionFailed("session lock poisoned".to_string())
        })?;
        let outputs = session
            .run(ort::inputs![tensor])
            .map_err(|e| FaceDetectionError::DetectionFailed(e.to_string()))?;

        let (_, scores) = outputs[0]
            .try_extract_tensor::<f32>()
            .map_err(|e| FaceDetectionError::DetectionFailed(e.to_string()))?;
        let (_, boxes) = outputs[1]
            .try_extract_tensor::<f32>()
            .map_err(|e| FaceDetectionError::DetectionFailed(e.to_string()))?;

        let (width, height) = frame.dimensions();
        Ok(best_face(scores, boxes, self.score_threshold, width, height))
    }
}

/// Picks the anchor with the highest face score at or above `threshold` and
/// maps its normalized box onto a `width` x `height` frame.
pub fn best_face(
    scores: &[f32],
    boxes: &[f32],
    threshold: f32,
    width: u32,
    height: u32,
) -> Option<FaceBox> {
    let anchors = (scores.len() / 2).min(boxes.len() / 4);

    let best = (0..anchors)
        .map(|i| (i, scores[i * 2 + 1]))
        .filter(|(_, score)| *score >= threshold)
        .max_by(|a, b| a.1.total_cmp(&b.1))?;

    let b = &boxes[best.0 * 4..best.0 * 4 + 4];
    let to_px = |v: f32, limit: u32| (v.clamp(0.0, 1.0) * limit as f32).round() as u32;

    let face = FaceBox::new(
        to_px(b[1], height),
        to_px(b[2], width),
        to_px(b[3], height),
        to_px(b[0], width),
    );

    (!face.is_empty()).then_some(face)
}
