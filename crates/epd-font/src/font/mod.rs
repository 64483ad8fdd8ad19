//! Font data model, glyph lookup and the `BitmapFont` capability set

mod bitmap;
mod data;
mod ram;
pub mod resolver;

pub use bitmap::GlyphBitmap;
pub use data::FontData;
pub use ram::RamFont;

use crate::layout::{self, TextBounds};

/// Codepoint substituted for characters the font has no glyph for
pub const FALLBACK_CODEPOINT: u32 = '?' as u32;

/// Font-wide scalar metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FontMetrics {
    /// Distance from baseline to the top of the tallest glyphs
    pub ascender: i32,
    /// Distance from baseline to the bottom of descending glyphs (usually negative)
    pub descender: i32,
    /// Vertical distance between consecutive baselines
    pub line_advance: u8,
    /// Bitmap encodes 4 gray levels instead of 1-bit monochrome
    pub is_2bit: bool,
}

/// Metadata for one glyph in the shared bitmap buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GlyphRecord {
    /// Bitmap width in pixels
    pub width: u16,
    /// Bitmap height in pixels
    pub height: u16,
    /// Cursor delta after drawing
    pub advance_x: i16,
    /// Bitmap origin offset from the pen position
    pub left: i16,
    /// Offset from baseline to bitmap top, positive upward
    pub top: i16,
    /// Start of the glyph's bytes in the bitmap buffer
    pub data_offset: u32,
    /// Number of bitmap bytes
    pub data_length: u32,
}

impl GlyphRecord {
    /// Byte range of this glyph inside the shared bitmap buffer
    pub fn data_range(&self) -> std::ops::Range<usize> {
        let start = self.data_offset as usize;
        start..start.saturating_add(self.data_length as usize)
    }
}

/// Inclusive codepoint range with contiguous glyph coverage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CodepointInterval {
    pub first: u32,
    pub last: u32,
    /// Glyph index for `first`
    pub offset: u32,
}

impl CodepointInterval {
    pub fn new(first: u32, last: u32, offset: u32) -> Self {
        Self { first, last, offset }
    }

    /// Whether `codepoint` lies inside this interval
    pub fn contains(&self, codepoint: u32) -> bool {
        self.first <= codepoint && codepoint <= self.last
    }

    /// Number of codepoints covered (0 for a malformed `first > last`)
    pub fn len(&self) -> u32 {
        if self.first > self.last {
            0
        } else {
            self.last - self.first + 1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Capability set shared by every font backend.
///
/// Backends supply glyph lookup, bitmap access and scalar metrics; text
/// measurement is built on top of [`BitmapFont::glyph`] and shared by all of them.
pub trait BitmapFont {
    /// Look up the glyph for a Unicode codepoint
    fn glyph(&self, codepoint: u32) -> Option<&GlyphRecord>;

    /// Shared bitmap buffer (empty if the font carries none)
    fn bitmap_data(&self) -> &[u8] {
        &[]
    }

    /// Ascender (above baseline)
    fn ascent(&self) -> i32;

    /// Descender (below baseline, usually negative)
    fn descent(&self) -> i32;

    /// Distance between baselines
    fn line_height(&self) -> u8;

    /// Whether glyph bitmaps use 2 bits per pixel
    fn is_2bit(&self) -> bool;

    /// Bitmap bytes of a glyph, if its data range fits the buffer
    fn glyph_bitmap(&self, glyph: &GlyphRecord) -> Option<&[u8]> {
        self.bitmap_data().get(glyph.data_range())
    }

    /// Pixel bounds of `text` drawn with its pen starting at `(x, y)`
    fn text_bounds(&self, text: &str, x: i32, y: i32) -> TextBounds {
        layout::text_bounds(self, text, x, y)
    }

    /// Same as [`BitmapFont::text_bounds`] for an already decoded codepoint sequence
    fn codepoint_bounds(
        &self,
        codepoints: &mut dyn Iterator<Item = u32>,
        x: i32,
        y: i32,
    ) -> TextBounds {
        layout::codepoint_bounds(self, codepoints, x, y)
    }

    /// Width and height of the pixels `text` covers
    fn text_dimensions(&self, text: &str) -> (i32, i32) {
        self.text_bounds(text, 0, 0).size()
    }

    /// Whether `text` renders any visible pixels
    fn has_printable_chars(&self, text: &str) -> bool {
        let (w, h) = self.text_dimensions(text);
        w > 0 || h > 0
    }
}
