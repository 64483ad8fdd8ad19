//! Immutable font data store

use super::{resolver, CodepointInterval, FontMetrics, GlyphRecord};
use crate::{FontError, Result};

/// Flat, owned font arrays plus scalar metrics.
///
/// Each array is a single allocation owned by the store; nothing is mutated
/// after construction, so a store can be shared freely between readers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontData {
    bitmap: Box<[u8]>,
    glyphs: Box<[GlyphRecord]>,
    intervals: Box<[CodepointInterval]>,
    metrics: FontMetrics,
}

impl FontData {
    /// Assemble a store from already prepared arrays
    pub fn new(
        bitmap: impl Into<Box<[u8]>>,
        glyphs: impl Into<Box<[GlyphRecord]>>,
        intervals: impl Into<Box<[CodepointInterval]>>,
        metrics: FontMetrics,
    ) -> Self {
        Self {
            bitmap: bitmap.into(),
            glyphs: glyphs.into(),
            intervals: intervals.into(),
            metrics,
        }
    }

    /// Shared glyph bitmap bytes
    pub fn bitmap(&self) -> &[u8] {
        &self.bitmap
    }

    /// Glyph records in interval order
    pub fn glyphs(&self) -> &[GlyphRecord] {
        &self.glyphs
    }

    /// Sorted codepoint intervals
    pub fn intervals(&self) -> &[CodepointInterval] {
        &self.intervals
    }

    pub fn interval_count(&self) -> usize {
        self.intervals.len()
    }

    pub fn metrics(&self) -> &FontMetrics {
        &self.metrics
    }

    /// Resolve a codepoint through the interval index
    pub fn glyph(&self, codepoint: u32) -> Option<&GlyphRecord> {
        resolver::resolve(&self.intervals, &self.glyphs, codepoint)
    }

    /// Check the structural invariants the resolver relies on.
    ///
    /// Intervals must be well-formed, ascending and non-overlapping, point
    /// inside the glyph table, and every glyph must point inside the bitmap.
    pub fn validate(&self) -> Result<()> {
        let glyph_count = self.glyphs.len() as u64;
        let mut previous: Option<&CodepointInterval> = None;

        for (i, interval) in self.intervals.iter().enumerate() {
            if interval.first > interval.last {
                return Err(FontError::InvalidData(format!(
                    "interval {i} is reversed: {:#x}..={:#x}",
                    interval.first, interval.last
                )));
            }
            if let Some(prev) = previous {
                if interval.first <= prev.last {
                    return Err(FontError::InvalidData(format!(
                        "interval {i} ({:#x}) overlaps or precedes {:#x}",
                        interval.first, prev.last
                    )));
                }
            }
            let end = interval.offset as u64 + interval.len() as u64;
            if end > glyph_count {
                return Err(FontError::InvalidData(format!(
                    "interval {i} needs glyphs up to {end}, font has {glyph_count}"
                )));
            }
            previous = Some(interval);
        }

        let bitmap_len = self.bitmap.len() as u64;
        for (i, glyph) in self.glyphs.iter().enumerate() {
            let end = glyph.data_offset as u64 + glyph.data_length as u64;
            if end > bitmap_len {
                return Err(FontError::InvalidData(format!(
                    "glyph {i} data ends at {end}, bitmap has {bitmap_len} bytes"
                )));
            }
        }

        Ok(())
    }
}
