mod audio_classifier;
mod audio_decoder;
mod audio_transcoder;
mod face_detector;
mod frame_source;
mod model_catalog;
mod video_classifier;

pub use audio_classifier::{
    AudioClassifier, AudioClassifierError, AudioModelInfo, AudioModelLoader, LabelScore,
};
pub use audio_decoder::{AudioDecoder, AudioDecoderError};
pub use audio_transcoder::{AudioTranscoder, TranscodeError};
pub use face_detector::{FaceDetectionError, FaceDetector};
pub use frame_source::{FrameSource, FrameSourceError, VideoInfo};
pub use model_catalog::{CatalogError, ModelCatalog};
pub use video_classifier::{ClassifierError, VideoClassifier, VideoModelLoader};
