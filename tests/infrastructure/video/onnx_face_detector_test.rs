use deepscan::domain::FaceBox;
use deepscan::infrastructure::video::{DEFAULT_SCORE_THRESHOLD, OnnxFaceDetector, best_face};

#[test]
fn given_anchors_when_picking_face_then_highest_score_above_threshold_wins() {
    let scores = [0.9, 0.1, 0.2, 0.8, 0.05, 0.95];
    let boxes = [
        0.0, 0.0, 0.1, 0.1, //
        0.1, 0.2, 0.3, 0.4, //
        0.5, 0.5, 0.75, 1.0,
    ];

    let face = best_face(&scores, &boxes, DEFAULT_SCORE_THRESHOLD, 200, 100).unwrap();

    assert_eq!(face, FaceBox::new(50, 150, 100, 100));
}

#[test]
fn given_scores_below_threshold_when_picking_face_then_none() {
    let scores = [0.4, 0.6, 0.5, 0.5];
    let boxes = [0.0, 0.0, 0.5, 0.5, 0.2, 0.2, 0.6, 0.6];

    assert!(best_face(&scores, &boxes, 0.7, 100, 100).is_none());
}

#[test]
fn given_box_outside_frame_when_picking_face_then_coordinates_are_clamped() {
    let scores = [0.0, 0.99];
    let boxes = [-0.2, -0.1, 1.3, 1.2];

    let face = best_face(&scores, &boxes, 0.7, 320, 240).unwrap();

    assert_eq!(face, FaceBox::new(0, 320, 240, 0));
}

#[test]
fn given_missing_model_file_when_loading_detector_then_returns_error() {
    let result = OnnxFaceDetector::new(std::path::Path::new("/nonexistent/face.onnx"), 0.7);

    assert!(result.is_err());
}
