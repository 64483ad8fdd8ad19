//! Font families: style-indexed sets of fonts

use crate::font::{BitmapFont, GlyphRecord};
use crate::layout::TextBounds;

/// Style selector, a {bold, italic} bit pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Style {
    #[default]
    Regular = 0,
    Bold = 1,
    Italic = 2,
    BoldItalic = 3,
}

impl Style {
    pub const ALL: [Style; 4] = [Style::Regular, Style::Bold, Style::Italic, Style::BoldItalic];

    /// Compose a style from its flags
    pub fn from_flags(bold: bool, italic: bool) -> Self {
        match (bold, italic) {
            (false, false) => Style::Regular,
            (true, false) => Style::Bold,
            (false, true) => Style::Italic,
            (true, true) => Style::BoldItalic,
        }
    }

    pub fn is_bold(self) -> bool {
        self as u8 & 1 != 0
    }

    pub fn is_italic(self) -> bool {
        self as u8 & 2 != 0
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl From<u8> for Style {
    /// Only the low two bits are significant
    fn from(bits: u8) -> Self {
        Style::from_flags(bits & 1 != 0, bits & 2 != 0)
    }
}

/// Up to four fonts selected by style.
///
/// Missing styles fall back to the regular font, never to another style.
#[derive(Clone, Copy)]
pub struct FontFamily<'a> {
    regular: &'a dyn BitmapFont,
    styles: [Option<&'a dyn BitmapFont>; 4],
}

impl<'a> FontFamily<'a> {
    /// Family with only a regular font
    pub fn new(regular: &'a dyn BitmapFont) -> Self {
        Self { regular, styles: [Some(regular), None, None, None] }
    }

    /// Family with every slot given explicitly
    pub fn with_styles(
        regular: &'a dyn BitmapFont,
        bold: Option<&'a dyn BitmapFont>,
        italic: Option<&'a dyn BitmapFont>,
        bold_italic: Option<&'a dyn BitmapFont>,
    ) -> Self {
        Self { regular, styles: [Some(regular), bold, italic, bold_italic] }
    }

    pub fn with_bold(mut self, font: &'a dyn BitmapFont) -> Self {
        self.styles[Style::Bold.index()] = Some(font);
        self
    }

    pub fn with_italic(mut self, font: &'a dyn BitmapFont) -> Self {
        self.styles[Style::Italic.index()] = Some(font);
        self
    }

    pub fn with_bold_italic(mut self, font: &'a dyn BitmapFont) -> Self {
        self.styles[Style::BoldItalic.index()] = Some(font);
        self
    }

    /// Whether a dedicated font is present for `style`
    pub fn has_style(&self, style: Style) -> bool {
        self.styles[style.index()].is_some()
    }

    /// Font used for `style`
    pub fn font(&self, style: Style) -> &'a dyn BitmapFont {
        self.styles[style.index()].unwrap_or(self.regular)
    }

    pub fn glyph(&self, codepoint: u32, style: Style) -> Option<&'a GlyphRecord> {
        self.font(style).glyph(codepoint)
    }

    pub fn bitmap_data(&self, style: Style) -> &'a [u8] {
        self.font(style).bitmap_data()
    }

    pub fn ascent(&self, style: Style) -> i32 {
        self.font(style).ascent()
    }

    pub fn descent(&self, style: Style) -> i32 {
        self.font(style).descent()
    }

    pub fn line_height(&self, style: Style) -> u8 {
        self.font(style).line_height()
    }

    pub fn is_2bit(&self, style: Style) -> bool {
        self.font(style).is_2bit()
    }

    pub fn text_bounds(&self, text: &str, x: i32, y: i32, style: Style) -> TextBounds {
        self.font(style).text_bounds(text, x, y)
    }

    pub fn text_dimensions(&self, text: &str, style: Style) -> (i32, i32) {
        self.font(style).text_dimensions(text)
    }

    pub fn has_printable_chars(&self, text: &str, style: Style) -> bool {
        self.font(style).has_printable_chars(text)
    }
}

impl std::fmt::Debug for FontFamily<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFamily")
            .field("bold", &self.has_style(Style::Bold))
            .field("italic", &self.has_style(Style::Italic))
            .field("bold_italic", &self.has_style(Style::BoldItalic))
            .finish()
    }
}
