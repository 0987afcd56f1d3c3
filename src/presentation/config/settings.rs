use std::path::PathBuf;

use config::{Config, ConfigError, File};
use serde::Deserialize;

use crate::domain::DEFAULT_SEQUENCE_LENGTHS;

use super::Environment;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub cors: CorsSettings,
    pub video: VideoSettings,
    pub audio: AudioSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub max_upload_mb: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            max_upload_mb: 512,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CorsSettings {
    pub frontend_url: Option<String>,
    pub dev_origins: Vec<String>,
}

impl Default for CorsSettings {
    fn default() -> Self {
        Self {
            frontend_url: None,
            dev_origins: vec![
                "http://localhost:8080".to_string(),
                "http://localhost:5173".to_string(),
                "http://127.0.0.1:8080".to_string(),
                "http://127.0.0.1:5173".to_string(),
            ],
        }
    }
}

impl CorsSettings {
    pub fn allowed_origins(&self) -> Vec<String> {
        let mut origins = self.dev_origins.clone();
        if let Some(url) = self
            .frontend_url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
        {
            origins.push(url.to_string());
        }
        origins
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VideoSettings {
    pub models_dir: PathBuf,
    pub allowed_sequence_lengths: Vec<usize>,
    pub face_padding: u32,
    pub image_size: u32,
    pub max_display_frames: usize,
    pub face_model_path: PathBuf,
    pub face_score_threshold: f32,
    pub max_file_size_mb: u64,
    pub decode_timeout_secs: u64,
    pub ffmpeg_path: String,
    pub ffprobe_path: String,
}

impl Default for VideoSettings {
    fn default() -> Self {
        Self {
            models_dir: PathBuf::from("models"),
            allowed_sequence_lengths: DEFAULT_SEQUENCE_LENGTHS.to_vec(),
            face_padding: 40,
            image_size: 112,
            max_display_frames: 6,
            face_model_path: PathBuf::from("models/face/version-RFB-320.onnx"),
            face_score_threshold: 0.7,
            max_file_size_mb: 500,
            decode_timeout_secs: 120,
            ffmpeg_path: "ffmpeg".to_string(),
            ffprobe_path: "ffprobe".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    pub model_id: String,
    pub model_dir: Option<PathBuf>,
    pub onnx_file: String,
    pub temperature: f64,
    pub max_file_size_mb: u64,
    pub transcode_timeout_secs: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            model_id: "MelodyMachine/Deepfake-audio-detection-V2".to_string(),
            model_dir: None,
            onnx_file: "model.onnx".to_string(),
            temperature: 3.0,
            max_file_size_mb: 50,
            transcode_timeout_secs: 60,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: Option<String>,
    pub json: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("invalid setting {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl Settings {
    /// Layers `appsettings.{environment}` (optional) under `APP_`-prefixed
    /// environment variables, e.g. `APP_AUDIO__TEMPERATURE=2.0`. The bare
    /// `PORT` and `FRONTEND_URL` variables are also honored.
    pub fn load(environment: Environment) -> Result<Self, SettingsError> {
        let mut settings = Self::from_sources(environment, None)?;

        if let Some(port) = std::env::var("PORT").ok().and_then(|p| p.parse().ok()) {
            settings.server.port = port;
        }
        if let Ok(url) = std::env::var("FRONTEND_URL") {
            settings.cors.frontend_url = Some(url);
        }

        settings.validate()?;
        Ok(settings)
    }

    /// Reads the settings file and `APP_` variables without overrides or
    /// validation. `vars` replaces the process environment when given.
    /// List values such as `APP_VIDEO__ALLOWED_SEQUENCE_LENGTHS=10,20,40`
    /// are split on commas.
    pub fn from_sources(
        environment: Environment,
        vars: Option<config::Map<String, String>>,
    ) -> Result<Self, SettingsError> {
        let configuration = Config::builder()
            .add_source(
                File::with_name(&environment.settings_file()).required(false),
            )
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("video.allowed_sequence_lengths")
                    .with_list_parse_key("cors.dev_origins")
                    .source(vars),
            )
            .build()?;

        Ok(configuration.try_deserialize()?)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.audio.temperature.is_finite() && self.audio.temperature > 0.0) {
            return Err(SettingsError::Invalid {
                key: "audio.temperature",
                reason: format!("must be positive, got {}", self.audio.temperature),
            });
        }
        if self.video.allowed_sequence_lengths.is_empty()
            || self.video.allowed_sequence_lengths.contains(&0)
        {
            return Err(SettingsError::Invalid {
                key: "video.allowed_sequence_lengths",
                reason: "must list at least one positive length".to_string(),
            });
        }
        if self.video.image_size == 0 {
            return Err(SettingsError::Invalid {
                key: "video.image_size",
                reason: "must be positive".to_string(),
            });
        }
        Ok(())
    }

    pub fn max_upload_bytes(&self) -> usize {
        (self.server.max_upload_mb as usize).saturating_mul(1024 * 1024)
    }
}
