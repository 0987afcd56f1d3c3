use std::path::Path;

use deepscan::domain::{AudioFormat, is_supported_audio_mime};

#[test]
fn given_extension_in_any_case_when_parsing_then_format_is_recognized() {
    assert_eq!(AudioFormat::from_extension("MP3"), Some(AudioFormat::Mp3));
    assert_eq!(AudioFormat::from_extension(".flac"), Some(AudioFormat::Flac));
    assert_eq!(AudioFormat::from_extension("txt"), None);
}

#[test]
fn given_path_when_detecting_format_then_uses_extension() {
    assert_eq!(
        AudioFormat::from_path(Path::new("/tmp/voice.M4A")),
        Some(AudioFormat::M4a)
    );
    assert_eq!(AudioFormat::from_path(Path::new("/tmp/voice")), None);
}

#[test]
fn given_formats_when_checking_native_support_then_only_wav_flac_ogg_skip_transcoding() {
    let native: Vec<AudioFormat> = AudioFormat::ALL
        .into_iter()
        .filter(AudioFormat::is_native)
        .collect();

    assert_eq!(
        native,
        vec![AudioFormat::Flac, AudioFormat::Ogg, AudioFormat::Wav]
    );
}

#[test]
fn given_supported_list_when_formatted_then_is_sorted_with_dots() {
    assert_eq!(
        AudioFormat::supported_list(),
        ".aac, .flac, .m4a, .mp3, .ogg, .wav, .wma"
    );
}

#[test]
fn given_content_types_when_checking_then_any_audio_type_passes() {
    assert!(is_supported_audio_mime("audio/mpeg"));
    assert!(is_supported_audio_mime("audio/x-wav; codecs=1"));
    assert!(is_supported_audio_mime("audio/opus"));
    assert!(!is_supported_audio_mime("video/mp4"));
    assert!(!is_supported_audio_mime("application/octet-stream"));
}
