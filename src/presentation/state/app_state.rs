use std::sync::Arc;

use crate::application::services::{AudioDetectionService, VideoDetectionService};
use crate::presentation::config::Settings;

#[derive(Clone)]
pub struct AppState {
    pub video_service: Arc<VideoDetectionService>,
    pub audio_service: Arc<AudioDetectionService>,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(
        video_service: VideoDetectionService,
        audio_service: AudioDetectionService,
        settings: Settings,
    ) -> Self {
        Self {
            video_service: Arc::new(video_service),
            audio_service: Arc::new(audio_service),
            settings: Arc::new(settings),
        }
    }
}
