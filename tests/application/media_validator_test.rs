use std::io::Write;

use deepscan::application::services::{
    AudioValidationError, MediaValidator, VideoValidationError,
};
use deepscan::domain::AudioFormat;
use tempfile::NamedTempFile;

fn file_with(suffix: &str, bytes: &[u8]) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(bytes).unwrap();
    file
}

#[test]
fn given_mp3_file_when_validating_audio_then_returns_format() {
    let file = file_with(".mp3", b"ID3");
    let validator = MediaValidator::new(50, 500);

    let format = validator.validate_audio(file.path(), Some("audio/mpeg")).unwrap();

    assert_eq!(format, Some(AudioFormat::Mp3));
}

#[test]
fn given_file_without_extension_when_validating_audio_then_format_is_unknown() {
    let file = file_with("", b"data");
    let validator = MediaValidator::new(50, 500);

    assert_eq!(validator.validate_audio(file.path(), None).unwrap(), None);
}

#[test]
fn given_missing_file_when_validating_audio_then_not_found() {
    let validator = MediaValidator::new(50, 500);

    let err = validator
        .validate_audio(std::path::Path::new("/nonexistent/voice.wav"), None)
        .unwrap_err();

    assert_eq!(err, AudioValidationError::NotFound);
}

#[test]
fn given_empty_file_when_validating_audio_then_rejected_as_empty() {
    let file = file_with(".wav", b"");
    let validator = MediaValidator::new(50, 500);

    assert_eq!(
        validator.validate_audio(file.path(), None).unwrap_err(),
        AudioValidationError::Empty
    );
}

#[test]
fn given_file_over_limit_when_validating_audio_then_too_large() {
    let file = file_with(".wav", &vec![0u8; 1024 * 1024 + 1]);
    let validator = MediaValidator::new(1, 500);

    let err = validator.validate_audio(file.path(), None).unwrap_err();

    assert_eq!(err, AudioValidationError::TooLarge { max_mb: 1 });
    assert_eq!(err.to_string(), "Audio file too large (max 1MB)");
}

#[test]
fn given_unknown_extension_when_validating_audio_then_unsupported_format() {
    let file = file_with(".TXT", b"hello");
    let validator = MediaValidator::new(50, 500);

    let err = validator.validate_audio(file.path(), None).unwrap_err();

    assert!(matches!(
        err,
        AudioValidationError::UnsupportedFormat { ref extension, .. } if extension == ".txt"
    ));
}

#[test]
fn given_non_audio_content_type_when_validating_audio_then_invalid_content_type() {
    let file = file_with(".wav", b"RIFF");
    let validator = MediaValidator::new(50, 500);

    let err = validator
        .validate_audio(file.path(), Some("text/plain"))
        .unwrap_err();

    assert_eq!(
        err,
        AudioValidationError::InvalidContentType("text/plain".to_string())
    );
}

#[test]
fn given_video_content_type_when_validating_video_then_returns_size() {
    let file = file_with(".mp4", b"12345");
    let validator = MediaValidator::new(50, 500);

    assert_eq!(validator.validate_video(file.path(), Some("video/mp4")).unwrap(), 5);
}

#[test]
fn given_missing_or_wrong_content_type_when_validating_video_then_not_video() {
    let file = file_with(".mp4", b"12345");
    let validator = MediaValidator::new(50, 500);

    assert_eq!(
        validator.validate_video(file.path(), None).unwrap_err(),
        VideoValidationError::NotVideo
    );
    assert_eq!(
        validator
            .validate_video(file.path(), Some("image/png"))
            .unwrap_err(),
        VideoValidationError::NotVideo
    );
}
