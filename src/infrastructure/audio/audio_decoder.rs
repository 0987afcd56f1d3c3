use std::fs::File;
use std::path::Path;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::application::ports::{AudioDecoder, AudioDecoderError};

pub const TARGET_SAMPLE_RATE: u32 = 16_000;

/// Decodes WAV, FLAC and Ogg Vorbis files into 16 kHz mono samples.
#[derive(Debug, Clone, Copy, Default)]
pub struct SymphoniaDecoder;

impl AudioDecoder for SymphoniaDecoder {
    fn decode(&self, path: &Path) -> Result<Vec<f32>, AudioDecoderError> {
        let file = File::open(path)?;
        let mss = MediaSourceStream::new(Box::new(file), Default::default());

        let mut hint = Hint::new();
        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            hint.with_extension(ext);
        }

        let probed = symphonia::default::get_probe()
            .format(
                &hint,
                mss,
                &FormatOptions::default(),
                &MetadataOptions::default(),
            )
            .map_err(|e| AudioDecoderError::DecodingFailed(format!("probe: {}", e)))?;

        let mut format = probed.format;

        let track = format
            .default_track()
            .ok_or_else(|| AudioDecoderError::DecodingFailed("no audio track found".to_string()))?;

        let track_id = track.id;
        let codec_params = track.codec_params.clone();
        let source_rate = codec_params
            .sample_rate
            .ok_or_else(|| AudioDecoderError::DecodingFailed("unknown sample rate".to_string()))?;
        let channels = codec_params.channels.map(|c| c.count()).unwrap_or(1);

        let mut decoder = symphonia::default::get_codecs()
            .make(&codec_params, &DecoderOptions::default())
            .map_err(|e| AudioDecoderError::DecodingFailed(format!("codec: {}", e)))?;

        let mut samples: Vec<f32> = Vec::new();

        loop {
            let packet = match format.next_packet() {
                Ok(p) => p,
                Err(symphonia::core::errors::Error::IoError(ref e))
                    if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    break;
                }
                Err(e) => {
                    return Err(AudioDecoderError::DecodingFailed(format!("packet: {}", e)));
                }
            };

            if packet.track_id() != track_id {
                continue;
            }

            let decoded = match decoder.decode(&packet) {
                Ok(d) => d,
                Err(symphonia::core::errors::Error::DecodeError(e)) => {
                    tracing::warn!(error = %e, "Skipping corrupt audio frame");
                    continue;
                }
                Err(e) => {
                    return Err(AudioDecoderError::DecodingFailed(format!("decode: {}", e)));
                }
            };

            let spec = *decoded.spec();
            let frames = decoded.frames();
            if frames == 0 {
                continue;
            }

            let mut buffer = SampleBuffer::<f32>::new(frames as u64, spec);
            buffer.copy_interleaved_ref(decoded);
            downmix_into(buffer.samples(), channels, &mut samples);
        }

        if samples.is_empty() {
            return Err(AudioDecoderError::DecodingFailed(
                "no audio samples decoded".to_string(),
            ));
        }

        if source_rate != TARGET_SAMPLE_RATE {
            samples = resample(&samples, source_rate, TARGET_SAMPLE_RATE)?;
        }

        tracing::debug!(
            samples = samples.len(),
            source_rate,
            channels,
            duration_secs = samples.len() as f32 / TARGET_SAMPLE_RATE as f32,
            "Audio decoded to 16kHz mono PCM"
        );

        Ok(samples)
    }
}

/// Averages interleaved channels into `out`.
pub fn downmix_into(interleaved: &[f32], channels: usize, out: &mut Vec<f32>) {
    if channels > 1 {
        for frame in interleaved.chunks(channels) {
            out.push(frame.iter().sum::<f32>() / channels as f32);
        }
    } else {
        out.extend_from_slice(interleaved);
    }
}

fn resample(samples: &[f32], from_rate: u32, to_rate: u32) -> Result<Vec<f32>, AudioDecoderError> {
    use rubato::{
        Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction,
    };

    let params = SincInterpolationParameters {
        sinc_len: 256,
        f_cutoff: 0.95,
        interpolation: SincInterpolationType::Linear,
        oversampling_factor: 256,
        window: WindowFunction::BlackmanHarris2,
    };

    let ratio = to_rate as f64 / from_rate as f64;
    let chunk_size = 1024;

    let mut resampler = SincFixedIn::<f32>::new(ratio, 2.0, params, chunk_size, 1)
        .map_err(|e| AudioDecoderError::DecodingFailed(format!("resampler init: {}", e)))?;

    let mut output = Vec::with_capacity((samples.len() as f64 * ratio) as usize + chunk_size);

    for chunk in samples.chunks(chunk_size) {
        let mut input = chunk.to_vec();
        input.resize(chunk_size, 0.0);

        let result = resampler
            .process(&[input], None)
            .map_err(|e| AudioDecoderError::DecodingFailed(format!("resample: {}", e)))?;

        if let Some(channel) = result.first() {
            output.extend_from_slice(channel);
        }
    }

    output.truncate((samples.len() as f64 * ratio) as usize);

    Ok(output)
}
