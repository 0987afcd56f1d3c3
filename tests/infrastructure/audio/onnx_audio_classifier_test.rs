use deepscan::infrastructure::audio::{labels_from_config, normalize_waveform, softmax};

#[test]
fn given_config_json_when_reading_labels_then_ordered_by_index() {
    let config = r#"{"id2label": {"1": "real", "0": "fake"}, "num_labels": 2}"#;

    let labels = labels_from_config(config).unwrap();

    assert_eq!(labels, vec!["fake".to_string(), "real".to_string()]);
}

#[test]
fn given_config_without_labels_when_reading_then_error() {
    assert!(labels_from_config(r#"{"num_labels": 2}"#).is_err());
    assert!(labels_from_config(r#"{"id2label": {"x": "real"}}"#).is_err());
}

#[test]
fn given_waveform_when_normalizing_then_zero_mean_unit_variance() {
    let samples: Vec<f32> = (0..1000).map(|i| (i as f32 * 0.01).sin() * 0.3 + 0.1).collect();

    let normalized = normalize_waveform(&samples);

    let n = normalized.len() as f32;
    let mean = normalized.iter().sum::<f32>() / n;
    let variance = normalized.iter().map(|s| (s - mean).powi(2)).sum::<f32>() / n;
    assert!(mean.abs() < 1e-4);
    assert!((variance - 1.0).abs() < 1e-3);
}

#[test]
fn given_silence_when_normalizing_then_stays_finite() {
    let normalized = normalize_waveform(&[0.0; 16]);

    assert!(normalized.iter().all(|s| s.is_finite() && *s == 0.0));
    assert!(normalize_waveform(&[]).is_empty());
}

#[test]
fn given_logits_when_applying_softmax_then_probabilities_sum_to_one() {
    let probabilities = softmax(&[2.0, 0.0]);

    assert!((probabilities.iter().sum::<f64>() - 1.0).abs() < 1e-9);
    assert!((probabilities[0] - 0.880_797).abs() < 1e-5);
}
