mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    AudioSettings, CorsSettings, LoggingSettings, ServerSettings, Settings, SettingsError,
    VideoSettings,
};
