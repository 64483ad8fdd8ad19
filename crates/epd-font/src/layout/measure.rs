//! Bounding box measurement over resolved glyphs

use super::TextBounds;
use crate::font::{BitmapFont, GlyphRecord, FALLBACK_CODEPOINT};

/// Pixel bounds of `text` with the pen starting at `(x, y)` on the baseline.
///
/// A NUL character ends the text.
pub fn text_bounds<F: BitmapFont + ?Sized>(font: &F, text: &str, x: i32, y: i32) -> TextBounds {
    codepoint_bounds(font, text.chars().map(u32::from), x, y)
}

/// Pixel bounds of a codepoint sequence with the pen starting at `(x, y)`.
///
/// Codepoints without a glyph are drawn as `'?'`; when the font lacks that
/// too they are skipped without advancing the pen. Coordinates saturate at
/// the `i32` limits.
pub fn codepoint_bounds<F, I>(font: &F, codepoints: I, x: i32, y: i32) -> TextBounds
where
    F: BitmapFont + ?Sized,
    I: IntoIterator<Item = u32>,
{
    let mut bounds = TextBounds::at(x, y);
    let mut cursor_x = x;
    let baseline = y;

    for codepoint in codepoints.into_iter().take_while(|&cp| cp != 0) {
        let Some(glyph) = glyph_or_fallback(font, codepoint) else {
            continue;
        };

        let left = cursor_x.saturating_add(glyph.left.into());
        let top = baseline.saturating_add(glyph.top.into());
        bounds.include(
            left,
            top.saturating_sub(glyph.height.into()),
            left.saturating_add(glyph.width.into()),
            top,
        );
        cursor_x = cursor_x.saturating_add(glyph.advance_x.into());
    }

    bounds
}

fn glyph_or_fallback<F: BitmapFont + ?Sized>(font: &F, codepoint: u32) -> Option<&GlyphRecord> {
    font.glyph(codepoint).or_else(|| font.glyph(FALLBACK_CODEPOINT))
}
