//! Text measurement module

mod measure;

pub use measure::{codepoint_bounds, text_bounds};

/// Pixel bounding box of rendered text.
///
/// Screen coordinates: Y grows downward. Bounds are inclusive of the pen
/// origin the measurement started from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextBounds {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl TextBounds {
    /// Zero-area box at a point
    pub fn at(x: i32, y: i32) -> Self {
        Self { min_x: x, min_y: y, max_x: x, max_y: y }
    }

    pub fn width(&self) -> i32 {
        self.max_x.saturating_sub(self.min_x)
    }

    pub fn height(&self) -> i32 {
        self.max_y.saturating_sub(self.min_y)
    }

    /// (width, height)
    pub fn size(&self) -> (i32, i32) {
        (self.width(), self.height())
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 && self.height() == 0
    }

    /// Same box moved by (dx, dy)
    pub fn translate(&self, dx: i32, dy: i32) -> Self {
        Self {
            min_x: self.min_x + dx,
            min_y: self.min_y + dy,
            max_x: self.max_x + dx,
            max_y: self.max_y + dy,
        }
    }

    /// Grow the box to cover the rectangle [x0, x1] x [y0, y1]
    pub fn include(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        self.min_x = self.min_x.min(x0);
        self.min_y = self.min_y.min(y0);
        self.max_x = self.max_x.max(x1);
        self.max_y = self.max_y.max(y1);
    }
}
