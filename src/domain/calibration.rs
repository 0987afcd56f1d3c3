use super::Verdict;

pub const CLAMP_MIN: f64 = 0.000_000_1;
pub const CLAMP_MAX: f64 = 0.999_999_9;

/// Raw classifier scores after temperature scaling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibratedScores {
    pub verdict: Verdict,
    pub real: f64,
    pub fake: f64,
}

impl CalibratedScores {
    /// Scaled probability of the decided label, as a percentage.
    pub fn confidence(&self) -> f64 {
        match self.verdict {
            Verdict::Real => self.real * 100.0,
            Verdict::Fake => self.fake * 100.0,
        }
    }
}

/// Softens overconfident probabilities: log-probabilities are divided by
/// `temperature` and renormalized with a softmax. The verdict is taken from
/// the clamped raw scores, not the scaled ones.
pub fn calibrate(raw_real: Option<f64>, raw_fake: Option<f64>, temperature: f64) -> CalibratedScores {
    let real = raw_real.unwrap_or(0.5).clamp(CLAMP_MIN, CLAMP_MAX);
    let fake = raw_fake.unwrap_or(0.5).clamp(CLAMP_MIN, CLAMP_MAX);

    let real_scaled = real.ln() / temperature;
    let fake_scaled = fake.ln() / temperature;

    let max_logit = real_scaled.max(fake_scaled);
    let real_exp = (real_scaled - max_logit).exp();
    let fake_exp = (fake_scaled - max_logit).exp();
    let total = real_exp + fake_exp;

    let verdict = if real > fake {
        Verdict::Real
    } else {
        Verdict::Fake
    };

    CalibratedScores {
        verdict,
        real: real_exp / total,
        fake: fake_exp / total,
    }
}
