use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;

use deepscan::application::services::{
    AudioDetectionService, FramePreprocessor, MediaValidator, PreprocessorConfig,
    VideoDetectionService, VideoModelCache,
};
use deepscan::infrastructure::audio::{
    AudioModelSource, FfmpegTranscoder, OnnxAudioModelLoader, SymphoniaDecoder,
    check_ffmpeg_binary,
};
use deepscan::infrastructure::ml::detect_device;
use deepscan::infrastructure::observability::{TracingConfig, init_tracing};
use deepscan::infrastructure::video::{
    CandleModelLoader, FfmpegFrameSource, FsModelCatalog, OnnxFaceDetector,
};
use deepscan::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;

    let settings = Settings::load(environment).context("Failed to load settings")?;

    init_tracing(
        &TracingConfig::new(
            environment.as_str(),
            settings.logging.json,
            settings.logging.level.as_deref(),
        ),
        settings.server.port,
    );

    match check_ffmpeg_binary(&settings.video.ffmpeg_path) {
        Ok(()) => tracing::info!("ffmpeg is available"),
        Err(e) => tracing::warn!(error = %e, "Non-native audio formats and video decoding will fail"),
    }

    let device = detect_device();
    tracing::info!(device = device.label(), "Compute device selected");

    let validator = MediaValidator::new(
        settings.audio.max_file_size_mb,
        settings.video.max_file_size_mb,
    );

    let face_detector = OnnxFaceDetector::new(
        &settings.video.face_model_path,
        settings.video.face_score_threshold,
    )
    .context("Failed to load face detector")?;

    let preprocessor = FramePreprocessor::new(
        Arc::new(face_detector),
        PreprocessorConfig {
            image_size: settings.video.image_size,
            face_padding: settings.video.face_padding,
            max_display_frames: settings.video.max_display_frames,
        },
    );

    let models = VideoModelCache::new(
        Arc::new(FsModelCatalog::new(&settings.video.models_dir)),
        Arc::new(CandleModelLoader::new(settings.video.image_size as usize)),
    );

    let video_service = VideoDetectionService::new(
        validator,
        Arc::new(FfmpegFrameSource::new(
            &settings.video.ffmpeg_path,
            &settings.video.ffprobe_path,
            Duration::from_secs(settings.video.decode_timeout_secs),
        )),
        Arc::new(preprocessor),
        models,
        device,
        settings.video.allowed_sequence_lengths.clone(),
    );

    let audio_service = AudioDetectionService::new(
        validator,
        Arc::new(FfmpegTranscoder::new(
            &settings.video.ffmpeg_path,
            Duration::from_secs(settings.audio.transcode_timeout_secs),
        )),
        Arc::new(SymphoniaDecoder),
        Arc::new(OnnxAudioModelLoader::new(AudioModelSource {
            model_id: settings.audio.model_id.clone(),
            model_dir: settings.audio.model_dir.clone(),
            onnx_file: settings.audio.onnx_file.clone(),
        })),
        settings.audio.temperature,
    );

    let address = format!("{}:{}", settings.server.host, settings.server.port);
    let state = AppState::new(video_service, audio_service, settings);
    let router = create_router(state);

    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    tracing::info!("Listening on {}", address);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutting down");
}
