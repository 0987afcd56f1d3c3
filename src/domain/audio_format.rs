use std::path::Path;

const SUPPORTED_MIME_TYPES: [&str; 14] = [
    "audio/wav",
    "audio/x-wav",
    "audio/wave",
    "audio/mpeg",
    "audio/mp3",
    "audio/flac",
    "audio/x-flac",
    "audio/mp4",
    "audio/x-m4a",
    "audio/m4a",
    "audio/ogg",
    "audio/vorbis",
    "audio/x-ms-wma",
    "audio/aac",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioFormat {
    Wav,
    Mp3,
    Flac,
    M4a,
    Ogg,
    Wma,
    Aac,
}

impl AudioFormat {
    pub const ALL: [AudioFormat; 7] = [
        AudioFormat::Aac,
        AudioFormat::Flac,
        AudioFormat::M4a,
        AudioFormat::Mp3,
        AudioFormat::Ogg,
        AudioFormat::Wav,
        AudioFormat::Wma,
    ];

    /// Parses an extension with or without the leading dot, ignoring case.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "wav" => Some(Self::Wav),
            "mp3" => Some(Self::Mp3),
            "flac" => Some(Self::Flac),
            "m4a" => Some(Self::M4a),
            "ogg" => Some(Self::Ogg),
            "wma" => Some(Self::Wma),
            "aac" => Some(Self::Aac),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Wav => ".wav",
            Self::Mp3 => ".mp3",
            Self::Flac => ".flac",
            Self::M4a => ".m4a",
            Self::Ogg => ".ogg",
            Self::Wma => ".wma",
            Self::Aac => ".aac",
        }
    }

    /// Formats the decoder reads without a transcoding step.
    pub fn is_native(&self) -> bool {
        matches!(self, Self::Wav | Self::Flac | Self::Ogg)
    }

    pub fn supported_list() -> String {
        Self::ALL
            .iter()
            .map(|f| f.extension())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Accepts any `audio/*` type; parameters such as `; charset=` are ignored.
pub fn is_supported_audio_mime(content_type: &str) -> bool {
    let base = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    SUPPORTED_MIME_TYPES.contains(&base.as_str()) || base.starts_with("audio/")
}
