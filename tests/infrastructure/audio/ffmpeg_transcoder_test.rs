use std::time::Duration;

use deepscan::application::ports::{AudioDecoder, AudioTranscoder, TranscodeError};
use deepscan::infrastructure::audio::{
    FfmpegTranscoder, SymphoniaDecoder, check_ffmpeg_binary, excerpt,
};

fn ffmpeg_available() -> bool {
    check_ffmpeg_binary("ffmpeg").is_ok()
}

#[test]
fn given_long_stderr_when_excerpting_then_truncates_by_characters() {
    assert_eq!(excerpt("héllo wörld", 4), "héll");
    assert_eq!(excerpt("short", 200), "short");
}

#[test]
fn given_missing_binary_when_checking_then_binary_not_found() {
    assert!(matches!(
        check_ffmpeg_binary("/nonexistent/ffmpeg"),
        Err(TranscodeError::BinaryNotFound)
    ));
}

#[tokio::test]
async fn given_missing_binary_when_transcoding_then_binary_not_found() {
    let input = tempfile::Builder::new().suffix(".mp3").tempfile().unwrap();
    let transcoder = FfmpegTranscoder::new("/nonexistent/ffmpeg", Duration::from_secs(5));

    let result = transcoder.to_wav(input.path()).await;

    assert!(matches!(result, Err(TranscodeError::BinaryNotFound)));
}

#[tokio::test]
async fn given_mp3_when_transcoding_then_wav_is_decodable_at_16khz() {
    if !ffmpeg_available() {
        return;
    }

    let dir = tempfile::tempdir().unwrap();
    let mp3 = dir.path().join("tone.mp3");
    let status = std::process::Command::new("ffmpeg")
        .args(["-y", "-loglevel", "error", "-f", "lavfi", "-i"])
        .arg("sine=frequency=440:duration=1")
        .arg(&mp3)
        .status()
        .unwrap();
    if !status.success() {
        return;
    }

    let wav = FfmpegTranscoder::default().to_wav(&mp3).await.unwrap();
    let samples = SymphoniaDecoder.decode(&wav).unwrap();
    std::fs::remove_file(&wav).unwrap();

    assert!(samples.len() > 15_000 && samples.len() < 17_500);
}

#[tokio::test]
async fn given_corrupt_input_when_transcoding_then_failed_and_no_output_left() {
    if !ffmpeg_available() {
        return;
    }

    let mut input = tempfile::Builder::new().suffix(".mp3").tempfile().unwrap();
    std::io::Write::write_all(&mut input, b"garbage").unwrap();

    let result = FfmpegTranscoder::default().to_wav(input.path()).await;

    assert!(matches!(result, Err(TranscodeError::Failed(_))));
}
