//! Font asset builder
//!
//! Collects per-codepoint glyph bitmaps and produces a [`FontData`] whose
//! interval index is sorted and non-overlapping by construction.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use crate::font::{CodepointInterval, FontData, FontMetrics, GlyphBitmap, GlyphRecord};

/// Placement metrics of a glyph, without its bitmap location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GlyphMetrics {
    pub width: u16,
    pub height: u16,
    pub advance_x: i16,
    pub left: i16,
    pub top: i16,
}

/// Incremental font builder
#[derive(Debug, Clone, Default)]
pub struct FontBuilder {
    metrics: FontMetrics,
    glyphs: BTreeMap<u32, (GlyphMetrics, Vec<u8>)>,
}

impl FontBuilder {
    pub fn new(metrics: FontMetrics) -> Self {
        Self { metrics, glyphs: BTreeMap::new() }
    }

    /// Add or replace the glyph for `codepoint`
    pub fn add_glyph(
        &mut self,
        codepoint: u32,
        metrics: GlyphMetrics,
        bitmap: impl Into<Vec<u8>>,
    ) -> &mut Self {
        let bitmap = bitmap.into();
        let expected = GlyphBitmap::packed_len(metrics.width, metrics.height, self.metrics.is_2bit);
        if bitmap.len() != expected {
            tracing::warn!(
                "Glyph {:#x}: {} bitmap bytes, {}x{} needs {}",
                codepoint,
                bitmap.len(),
                metrics.width,
                metrics.height,
                expected
            );
        }
        self.glyphs.insert(codepoint, (metrics, bitmap));
        self
    }

    /// Whether a glyph was added for `codepoint`
    pub fn contains(&self, codepoint: u32) -> bool {
        self.glyphs.contains_key(&codepoint)
    }

    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    /// Codepoints inside `ranges` that have no glyph
    pub fn missing(&self, ranges: &[RangeInclusive<u32>]) -> Vec<u32> {
        merge_ranges(ranges)
            .into_iter()
            .flatten()
            .filter(|cp| !self.contains(*cp))
            .collect()
    }

    /// Lay out glyphs in codepoint order and build the interval index
    pub fn build(&self) -> FontData {
        let mut bitmap = Vec::new();
        let mut glyphs = Vec::with_capacity(self.glyphs.len());
        let mut intervals: Vec<CodepointInterval> = Vec::new();

        for (&codepoint, (metrics, data)) in &self.glyphs {
            match intervals.last_mut() {
                Some(last) if last.last.checked_add(1) == Some(codepoint) => last.last = codepoint,
                _ => {
                    let offset = glyphs.len() as u32;
                    intervals.push(CodepointInterval::new(codepoint, codepoint, offset));
                }
            }

            glyphs.push(GlyphRecord {
                width: metrics.width,
                height: metrics.height,
                advance_x: metrics.advance_x,
                left: metrics.left,
                top: metrics.top,
                data_offset: bitmap.len() as u32,
                data_length: data.len() as u32,
            });
            bitmap.extend_from_slice(data);
        }

        tracing::debug!(
            "Built font: {} glyphs, {} intervals, {} bitmap bytes",
            glyphs.len(),
            intervals.len(),
            bitmap.len()
        );
        FontData::new(bitmap, glyphs, intervals, self.metrics)
    }
}

/// Sort inclusive codepoint ranges and merge overlapping or adjacent ones
pub fn merge_ranges(ranges: &[RangeInclusive<u32>]) -> Vec<RangeInclusive<u32>> {
    let mut sorted: Vec<_> = ranges.iter().filter(|r| !r.is_empty()).cloned().collect();
    sorted.sort_by_key(|r| *r.start());

    let mut merged: Vec<RangeInclusive<u32>> = Vec::with_capacity(sorted.len());
    for range in sorted {
        match merged.last_mut() {
            Some(last) if *range.start() <= last.end().saturating_add(1) => {
                let end = (*last.end()).max(*range.end());
                *last = *last.start()..=end;
            }
            _ => merged.push(range),
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::resolver;

    fn metrics(width: u16) -> GlyphMetrics {
        GlyphMetrics { width, height: 1, advance_x: width as i16, left: 0, top: 1 }
    }

    #[test]
    fn test_contiguous_runs_become_intervals() {
        let mut builder = FontBuilder::new(FontMetrics::default());
        for cp in ['a', 'b', 'c', 'x', 'z'] {
            builder.add_glyph(cp as u32, metrics(8), vec![0xFF]);
        }
        let data = builder.build();

        assert_eq!(
            data.intervals(),
            &[
                CodepointInterval::new('a' as u32, 'c' as u32, 0),
                CodepointInterval::new('x' as u32, 'x' as u32, 3),
                CodepointInterval::new('z' as u32, 'z' as u32, 4),
            ]
        );
        assert!(data.validate().is_ok());
        assert_eq!(resolver::glyph_index(data.intervals(), 'z' as u32), Some(4));
    }

    #[test]
    fn test_bitmap_offsets_follow_codepoint_order() {
        let mut builder = FontBuilder::new(FontMetrics::default());
        builder.add_glyph(66, metrics(16), vec![2, 2]);
        builder.add_glyph(65, metrics(8), vec![1]);
        let data = builder.build();

        assert_eq!(data.bitmap(), &[1, 2, 2]);
        assert_eq!(data.glyph(66).map(|g| (g.data_offset, g.data_length)), Some((1, 2)));
    }

    #[test]
    fn test_replace_glyph() {
        let mut builder = FontBuilder::new(FontMetrics::default());
        builder.add_glyph(65, metrics(8), vec![1]);
        builder.add_glyph(65, metrics(16), vec![3, 3]);
        let data = builder.build();
        assert_eq!(builder.glyph_count(), 1);
        assert_eq!(data.glyph(65).map(|g| g.width), Some(16));
    }

    #[test]
    fn test_merge_ranges() {
        let merged = merge_ranges(&[
            0x100..=0x17F,
            0x00..=0x7F,
            0x2010..=0x203A,
            0x2000..=0x206F,
            0x80..=0xFF,
        ]);
        assert_eq!(merged, vec![0x00..=0x17F, 0x2000..=0x206F]);
    }

    #[test]
    fn test_missing_codepoints() {
        let mut builder = FontBuilder::new(FontMetrics::default());
        builder.add_glyph(1, metrics(8), vec![0]);
        builder.add_glyph(3, metrics(8), vec![0]);
        assert_eq!(builder.missing(&[0..=3]), vec![0, 2]);
    }
}
