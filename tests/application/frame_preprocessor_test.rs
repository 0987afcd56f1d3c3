use std::sync::Arc;

use deepscan::application::services::{FramePreprocessor, PreprocessError, PreprocessorConfig};
use deepscan::domain::FaceBox;

use crate::helpers::{FixedFaceDetector, solid_frame};

fn preprocessor(face: Option<FaceBox>) -> FramePreprocessor {
    FramePreprocessor::new(Arc::new(FixedFaceDetector(face)), PreprocessorConfig::default())
}

#[test]
fn given_frames_with_faces_when_processing_then_counts_faces_and_keeps_six_crops() {
    let frames: Vec<_> = (0..10).map(|_| solid_frame(200, 150, 128)).collect();
    let preprocessor = preprocessor(Some(FaceBox::new(50, 120, 100, 60)));

    let result = preprocessor.process(&frames, 10).unwrap();

    assert_eq!(result.faces_found, 10);
    assert_eq!(result.total_frames_analyzed, 10);
    assert_eq!(result.frame_images.len(), 6);
    assert_eq!(result.sequence.len(), 10);
    assert_eq!(result.sequence.frame_len(), 3 * 112 * 112);
}

#[test]
fn given_no_faces_when_processing_then_whole_frames_are_used_without_crops() {
    let frames: Vec<_> = (0..4).map(|_| solid_frame(64, 48, 0)).collect();
    let preprocessor = preprocessor(None);

    let result = preprocessor.process(&frames, 10).unwrap();

    assert_eq!(result.faces_found, 0);
    assert!(result.frame_images.is_empty());
    assert_eq!(result.total_frames_analyzed, 4);
    assert_eq!(result.sequence.len(), 10);
    assert_eq!(result.sequence.padded_frames(), 6);
}

#[test]
fn given_more_frames_than_needed_when_processing_then_only_sequence_length_are_analyzed() {
    let frames: Vec<_> = (0..30).map(|_| solid_frame(32, 32, 10)).collect();
    let preprocessor = preprocessor(None);

    let result = preprocessor.process(&frames, 20).unwrap();

    assert_eq!(result.total_frames_analyzed, 20);
    assert_eq!(result.sequence.padded_frames(), 0);
}

#[test]
fn given_no_frames_when_processing_then_reports_no_frames() {
    let preprocessor = preprocessor(None);

    let err = preprocessor.process(&[], 10).unwrap_err();

    assert!(matches!(err, PreprocessError::NoFrames(_)));
    assert_eq!(err.to_string(), "Video contains no decodable frames");
}

#[test]
fn given_white_frame_when_normalizing_then_channels_use_imagenet_statistics() {
    let preprocessor = preprocessor(None);

    let frame = preprocessor.normalize(&solid_frame(8, 8, 255));

    let plane = 112 * 112;
    assert_eq!(frame.len(), 3 * plane);
    assert!((frame[0] - (1.0 - 0.485) / 0.229).abs() < 1e-4);
    assert!((frame[plane] - (1.0 - 0.456) / 0.224).abs() < 1e-4);
    assert!((frame[2 * plane] - (1.0 - 0.406) / 0.225).abs() < 1e-4);
}
