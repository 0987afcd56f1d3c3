mod audio_format;
mod calibration;
mod compute_device;
mod face_box;
mod frame_sequence;
mod model_artifact;
mod sequence_length;
mod verdict;

pub use audio_format::{AudioFormat, is_supported_audio_mime};
pub use calibration::{CLAMP_MAX, CLAMP_MIN, CalibratedScores, calibrate};
pub use compute_device::ComputeDevice;
pub use face_box::FaceBox;
pub use frame_sequence::{EmptySequence, FrameSequence, NormalizedFrame};
pub use model_artifact::{ModelArtifact, select_best_artifact};
pub use sequence_length::{DEFAULT_SEQUENCE_LENGTHS, InvalidSequenceLength, SequenceLength};
pub use verdict::{ClassProbabilities, Verdict};
