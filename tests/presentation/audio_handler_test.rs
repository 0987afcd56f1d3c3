use deepscan::presentation::handlers::is_audio_content_type;

#[test]
fn given_blank_content_type_when_checking_audio_upload_then_accepted() {
    assert!(is_audio_content_type(Some("")));
    assert!(is_audio_content_type(Some("  ")));
    assert!(is_audio_content_type(None));
}

#[test]
fn given_content_type_when_checking_audio_upload_then_only_audio_family_accepted() {
    assert!(is_audio_content_type(Some("audio/mpeg")));
    assert!(!is_audio_content_type(Some("video/mp4")));
    assert!(!is_audio_content_type(Some("application/octet-stream")));
}
