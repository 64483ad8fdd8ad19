//! Packed glyph bitmap decoding
//!
//! Glyph pixels are stored row-major and packed continuously across rows:
//! 8 pixels per byte (MSB first) for 1-bit fonts, 4 pixels per byte
//! (high bits first) for 2-bit fonts.

use super::GlyphRecord;

/// View over one glyph's packed pixels
#[derive(Debug, Clone, Copy)]
pub struct GlyphBitmap<'a> {
    data: &'a [u8],
    width: u16,
    height: u16,
    is_2bit: bool,
}

impl<'a> GlyphBitmap<'a> {
    pub fn new(glyph: &GlyphRecord, data: &'a [u8], is_2bit: bool) -> Self {
        Self { data, width: glyph.width, height: glyph.height, is_2bit }
    }

    /// Bytes needed to pack a `width` x `height` bitmap
    pub fn packed_len(width: u16, height: u16, is_2bit: bool) -> usize {
        let pixels = width as usize * height as usize;
        let per_byte = if is_2bit { 4 } else { 8 };
        pixels.div_ceil(per_byte)
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Highest value [`GlyphBitmap::pixel`] can return
    pub fn max_level(&self) -> u8 {
        if self.is_2bit { 3 } else { 1 }
    }

    /// Pixel value at (x, y): 0..=1 for 1-bit, 0..=3 for 2-bit.
    ///
    /// Coordinates outside the glyph, or past the end of the data, read as 0.
    pub fn pixel(&self, x: u16, y: u16) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }

        let index = y as usize * self.width as usize + x as usize;
        if self.is_2bit {
            let Some(&byte) = self.data.get(index / 4) else { return 0 };
            let shift = (3 - (index % 4)) * 2;
            (byte >> shift) & 0x3
        } else {
            let Some(&byte) = self.data.get(index / 8) else { return 0 };
            let shift = 7 - (index % 8);
            (byte >> shift) & 0x1
        }
    }

    /// Iterate `(x, y, value)` for every non-zero pixel
    pub fn lit_pixels(&self) -> impl Iterator<Item = (u16, u16, u8)> + '_ {
        (0..self.height).flat_map(move |y| {
            (0..self.width).filter_map(move |x| {
                let value = self.pixel(x, y);
                (value != 0).then_some((x, y, value))
            })
        })
    }
}
