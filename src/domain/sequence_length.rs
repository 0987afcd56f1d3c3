use std::fmt;

pub const DEFAULT_SEQUENCE_LENGTHS: [usize; 6] = [10, 20, 40, 60, 80, 100];

/// Number of frames sampled from a video. Only lengths with a trained model
/// are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SequenceLength(usize);

impl SequenceLength {
    pub fn parse(value: usize, allowed: &[usize]) -> Result<Self, InvalidSequenceLength> {
        if allowed.contains(&value) {
            Ok(Self(value))
        } else {
            Err(InvalidSequenceLength {
                value,
                allowed: allowed.to_vec(),
            })
        }
    }

    pub fn get(&self) -> usize {
        self.0
    }
}

impl fmt::Display for SequenceLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid sequence_length. Must be one of {allowed:?}")]
pub struct InvalidSequenceLength {
    pub value: usize,
    pub allowed: Vec<usize>,
}
