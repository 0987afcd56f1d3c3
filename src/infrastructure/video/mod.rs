mod candle_model_loader;
mod ffmpeg_frame_source;
mod fs_model_catalog;
mod onnx_face_detector;
mod resnext_lstm;

pub use candle_model_loader::CandleModelLoader;
pub use ffmpeg_frame_source::{DEFAULT_DECODE_TIMEOUT, FfmpegFrameSource, parse_probe, split_frames};
pub use fs_model_catalog::FsModelCatalog;
pub use onnx_face_detector::{DEFAULT_SCORE_THRESHOLD, OnnxFaceDetector, best_face};
pub use resnext_lstm::{HIDDEN_DIM, LATENT_DIM, NUM_CLASSES, ResNextLstm};
