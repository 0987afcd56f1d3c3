use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Real,
    Fake,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Real => "REAL",
            Verdict::Fake => "FAKE",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Softmax output of the video classifier. Index 0 is FAKE, index 1 is REAL.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassProbabilities {
    pub fake: f32,
    pub real: f32,
}

impl ClassProbabilities {
    pub fn new(fake: f32, real: f32) -> Self {
        Self { fake, real }
    }

    pub fn from_slice(values: &[f32]) -> Option<Self> {
        match values {
            [fake, real] => Some(Self::new(*fake, *real)),
            _ => None,
        }
    }

    /// Argmax over the two classes; a tie resolves to the first index (FAKE).
    pub fn verdict(&self) -> Verdict {
        if self.real > self.fake {
            Verdict::Real
        } else {
            Verdict::Fake
        }
    }

    /// Winning probability as a percentage.
    pub fn confidence(&self) -> f32 {
        match self.verdict() {
            Verdict::Real => self.real * 100.0,
            Verdict::Fake => self.fake * 100.0,
        }
    }
}
