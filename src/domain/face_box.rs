/// Pixel bounds of a detected face. `right` and `bottom` are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceBox {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl FaceBox {
    pub fn new(top: u32, right: u32, bottom: u32, left: u32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Grows the box by `margin` pixels on every side, clamped to a
    /// `width` x `height` frame.
    pub fn padded(&self, margin: u32, width: u32, height: u32) -> Self {
        Self {
            top: self.top.saturating_sub(margin),
            right: self.right.saturating_add(margin).min(width),
            bottom: self.bottom.saturating_add(margin).min(height),
            left: self.left.saturating_sub(margin),
        }
    }

    pub fn width(&self) -> u32 {
        self.right.saturating_sub(self.left)
    }

    pub fn height(&self) -> u32 {
        self.bottom.saturating_sub(self.top)
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}
