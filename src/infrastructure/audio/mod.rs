pub mod audio_decoder;
mod ffmpeg_transcoder;
mod onnx_audio_classifier;

pub use audio_decoder::{SymphoniaDecoder, TARGET_SAMPLE_RATE};
pub use ffmpeg_transcoder::{
    DEFAULT_TRANSCODE_TIMEOUT, FfmpegTranscoder, check_ffmpeg_binary, excerpt,
};
pub use onnx_audio_classifier::{
    AUDIO_MODEL_ID, AUDIO_MODEL_TASK, AudioModelSource, DEFAULT_ONNX_FILE, OnnxAudioClassifier,
    OnnxAudioModelLoader, labels_from_config, normalize_waveform, softmax,
};
