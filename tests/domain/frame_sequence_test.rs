use std::sync::Arc;

use deepscan::domain::{EmptySequence, FrameSequence, NormalizedFrame};

fn frame(value: f32) -> NormalizedFrame {
    Arc::from(vec![value; 3])
}

#[test]
fn given_fewer_frames_than_length_when_assembling_then_repeats_last_frame() {
    let sequence = FrameSequence::assemble(vec![frame(1.0), frame(2.0)], 5).unwrap();

    assert_eq!(sequence.len(), 5);
    assert_eq!(sequence.real_frames(), 2);
    assert_eq!(sequence.padded_frames(), 3);
    assert!(sequence.frames()[2..].iter().all(|f| f[0] == 2.0));
}

#[test]
fn given_more_frames_than_length_when_assembling_then_truncates() {
    let frames = (0..8).map(|i| frame(i as f32)).collect();

    let sequence = FrameSequence::assemble(frames, 3).unwrap();

    assert_eq!(sequence.len(), 3);
    assert_eq!(sequence.padded_frames(), 0);
    assert_eq!(sequence.frames()[2][0], 2.0);
}

#[test]
fn given_no_frames_when_assembling_then_returns_empty_sequence_error() {
    assert_eq!(FrameSequence::assemble(Vec::new(), 10), Err(EmptySequence));
}

#[test]
fn given_sequence_when_flattening_then_frames_are_concatenated_in_order() {
    let sequence = FrameSequence::assemble(vec![frame(1.0), frame(2.0)], 3).unwrap();

    let data = sequence.flatten();

    assert_eq!(sequence.frame_len(), 3);
    assert_eq!(data, vec![1.0, 1.0, 1.0, 2.0, 2.0, 2.0, 2.0, 2.0, 2.0]);
}
