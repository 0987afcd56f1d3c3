use deepscan::domain::{CLAMP_MAX, CLAMP_MIN, Verdict, calibrate};

#[test]
fn given_confident_real_score_when_calibrating_then_probability_is_softened() {
    let scores = calibrate(Some(0.99), Some(0.01), 3.0);

    assert_eq!(scores.verdict, Verdict::Real);
    assert!(scores.real < 0.99);
    assert!(scores.real > 0.5);
    assert!((scores.real + scores.fake - 1.0).abs() < 1e-9);
}

#[test]
fn given_temperature_one_when_calibrating_then_normalized_scores_are_unchanged() {
    let scores = calibrate(Some(0.3), Some(0.7), 1.0);

    assert!((scores.real - 0.3).abs() < 1e-9);
    assert!((scores.fake - 0.7).abs() < 1e-9);
    assert_eq!(scores.verdict, Verdict::Fake);
}

#[test]
fn given_missing_labels_when_calibrating_then_defaults_to_even_split() {
    let scores = calibrate(None, None, 3.0);

    assert!((scores.real - 0.5).abs() < 1e-9);
    assert_eq!(scores.verdict, Verdict::Fake);
    assert!((scores.confidence() - 50.0).abs() < 1e-9);
}

#[test]
fn given_extreme_scores_when_calibrating_then_result_stays_finite() {
    let scores = calibrate(Some(1.0), Some(0.0), 3.0);

    assert!(scores.real.is_finite());
    assert!(scores.fake.is_finite());
    assert!(scores.fake > 0.0);
    assert_eq!(scores.verdict, Verdict::Real);
}

#[test]
fn given_raw_scores_when_calibrating_then_verdict_follows_raw_order() {
    let scores = calibrate(Some(0.51), Some(0.49), 3.0);

    assert_eq!(scores.verdict, Verdict::Real);
    assert!((scores.confidence() - scores.real * 100.0).abs() < 1e-9);
}

#[test]
fn given_temperatures_above_one_when_calibrating_then_scaled_winner_never_exceeds_raw_winner() {
    let pairs = [
        (0.99, 0.01),
        (0.6, 0.4),
        (0.5, 0.5),
        (0.3, 0.7),
        (0.0001, 0.9999),
        (1.0, 0.0),
        (0.0, 1.0),
    ];

    for temperature in [1.5, 2.0, 3.0, 5.0, 10.0] {
        for (real, fake) in pairs {
            let scores = calibrate(Some(real), Some(fake), temperature);
            let (raw_winner, scaled_winner) = match scores.verdict {
                Verdict::Real => (real, scores.real),
                Verdict::Fake => (fake, scores.fake),
            };
            let raw_winner = raw_winner.clamp(CLAMP_MIN, CLAMP_MAX);

            assert!(
                scaled_winner <= raw_winner + 1e-12,
                "T={temperature} real={real} fake={fake}: {scaled_winner} > {raw_winner}"
            );
            assert!(scaled_winner >= 0.5 - 1e-12);
            assert!((scores.real + scores.fake - 1.0).abs() < 1e-9);
        }
    }
}
