//! RAM-resident font backend

use std::sync::Arc;

use super::{BitmapFont, FontData, GlyphRecord};

/// Font whose data store lives entirely in memory
#[derive(Debug, Clone)]
pub struct RamFont {
    data: Arc<FontData>,
}

impl RamFont {
    /// Take ownership of a data store
    pub fn new(data: FontData) -> Self {
        Self { data: Arc::new(data) }
    }

    /// Use a data store that other fonts may also read
    pub fn shared(data: Arc<FontData>) -> Self {
        Self { data }
    }

    /// Underlying data store
    pub fn data(&self) -> &FontData {
        &self.data
    }
}

impl From<FontData> for RamFont {
    fn from(data: FontData) -> Self {
        Self::new(data)
    }
}

impl BitmapFont for RamFont {
    fn glyph(&self, codepoint: u32) -> Option<&GlyphRecord> {
        self.data.glyph(codepoint)
    }

    fn bitmap_data(&self) -> &[u8] {
        self.data.bitmap()
    }

    fn ascent(&self) -> i32 {
        self.data.metrics().ascender
    }

    fn descent(&self) -> i32 {
        self.data.metrics().descender
    }

    fn line_height(&self) -> u8 {
        self.data.metrics().line_advance
    }

    fn is_2bit(&self) -> bool {
        self.data.metrics().is_2bit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::{CodepointInterval, FontMetrics};

    fn font() -> RamFont {
        let glyphs = vec![
            GlyphRecord {
                width: 2,
                height: 2,
                data_offset: 0,
                data_length: 1,
                ..Default::default()
            },
            GlyphRecord {
                width: 3,
                height: 2,
                data_offset: 1,
                data_length: 1,
                ..Default::default()
            },
        ];
        let metrics = FontMetrics { ascender: 14, descender: -4, line_advance: 20, is_2bit: true };
        RamFont::new(FontData::new(
            vec![0xF0, 0x0F],
            glyphs,
            vec![CodepointInterval::new('a' as u32, 'b' as u32, 0)],
            metrics,
        ))
    }

    #[test]
    fn test_metrics_accessors() {
        let font = font();
        assert_eq!(font.ascent(), 14);
        assert_eq!(font.descent(), -4);
        assert_eq!(font.line_height(), 20);
        assert!(font.is_2bit());
        assert_eq!(font.bitmap_data(), &[0xF0, 0x0F]);
    }

    #[test]
    fn test_glyph_bitmap_slice() {
        let font = font();
        let glyph = *font.glyph('b' as u32).unwrap();
        assert_eq!(font.glyph_bitmap(&glyph), Some(&[0x0F][..]));

        let outside = GlyphRecord { data_offset: 1, data_length: 5, ..Default::default() };
        assert!(font.glyph_bitmap(&outside).is_none());
    }

    #[test]
    fn test_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RamFont>();
        assert_send_sync::<FontData>();
    }

    #[test]
    fn test_shared_store() {
        let data = Arc::new(font().data().clone());
        let a = RamFont::shared(Arc::clone(&data));
        let b = RamFont::shared(data);
        assert_eq!(a.glyph('a' as u32), b.glyph('a' as u32));
    }
}
