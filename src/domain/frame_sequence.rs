use std::sync::Arc;

/// One preprocessed frame in CHW layout, already normalized.
pub type NormalizedFrame = Arc<[f32]>;

/// Fixed-length input for the video classifier.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSequence {
    frames: Vec<NormalizedFrame>,
    real_frames: usize,
    frame_len: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("no frames to assemble into a sequence")]
pub struct EmptySequence;

impl FrameSequence {
    /// Truncates `frames` to `sequence_length`, or pads it by repeating the
    /// last frame until it is that long.
    pub fn assemble(
        mut frames: Vec<NormalizedFrame>,
        sequence_length: usize,
    ) -> Result<Self, EmptySequence> {
        let last = frames.last().cloned().ok_or(EmptySequence)?;
        let frame_len = last.len();

        frames.truncate(sequence_length);
        let real_frames = frames.len();
        frames.resize(sequence_length, last);

        Ok(Self {
            frames,
            real_frames,
            frame_len,
        })
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frames(&self) -> &[NormalizedFrame] {
        &self.frames
    }

    pub fn real_frames(&self) -> usize {
        self.real_frames
    }

    pub fn padded_frames(&self) -> usize {
        self.frames.len() - self.real_frames
    }

    pub fn frame_len(&self) -> usize {
        self.frame_len
    }

    /// Frames flattened in order, ready to become a `(1, S, C, H, W)` tensor.
    pub fn flatten(&self) -> Vec<f32> {
        let mut data = Vec::with_capacity(self.frames.len() * self.frame_len);
        for frame in &self.frames {
            data.extend_from_slice(frame);
        }
        data
    }
}
