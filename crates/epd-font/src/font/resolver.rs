//! Codepoint to glyph mapping over the interval index

use super::{CodepointInterval, GlyphRecord};

/// Find the interval covering `codepoint`.
///
/// `intervals` must be sorted by `first` and pairwise non-overlapping; this
/// is a precondition of the font asset and is not checked here.
pub fn find_interval(
    intervals: &[CodepointInterval],
    codepoint: u32,
) -> Option<&CodepointInterval> {
    // Binary search: large CJK/Hangul fonts carry thousands of intervals
    let mut lo = 0usize;
    let mut hi = intervals.len();

    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        let interval = &intervals[mid];

        if codepoint < interval.first {
            hi = mid;
        } else if codepoint > interval.last {
            lo = mid + 1;
        } else {
            return Some(interval);
        }
    }

    None
}

/// Glyph index for `codepoint`, if an interval covers it
pub fn glyph_index(intervals: &[CodepointInterval], codepoint: u32) -> Option<usize> {
    let interval = find_interval(intervals, codepoint)?;
    let index = interval.offset as u64 + (codepoint - interval.first) as u64;
    usize::try_from(index).ok()
}

/// Look up the glyph record for `codepoint`.
///
/// An interval pointing past the end of `glyphs` resolves to nothing.
pub fn resolve<'a>(
    intervals: &[CodepointInterval],
    glyphs: &'a [GlyphRecord],
    codepoint: u32,
) -> Option<&'a GlyphRecord> {
    glyph_index(intervals, codepoint).and_then(|index| glyphs.get(index))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glyphs(n: usize) -> Vec<GlyphRecord> {
        (0..n)
            .map(|i| GlyphRecord { width: i as u16, ..Default::default() })
            .collect()
    }

    fn linear_scan(intervals: &[CodepointInterval], codepoint: u32) -> Option<usize> {
        intervals
            .iter()
            .find(|i| i.contains(codepoint))
            .map(|i| (i.offset + (codepoint - i.first)) as usize)
    }

    #[test]
    fn test_empty_index() {
        let glyphs = glyphs(4);
        assert!(resolve(&[], &glyphs, 'A' as u32).is_none());
        assert!(resolve(&[], &glyphs, 0).is_none());
    }

    #[test]
    fn test_single_interval() {
        let intervals = [CodepointInterval::new(65, 90, 0)];
        let glyphs = glyphs(26);

        assert_eq!(resolve(&intervals, &glyphs, 65).map(|g| g.width), Some(0));
        assert_eq!(resolve(&intervals, &glyphs, 77).map(|g| g.width), Some(12));
        assert_eq!(resolve(&intervals, &glyphs, 90).map(|g| g.width), Some(25));
        assert!(resolve(&intervals, &glyphs, 64).is_none());
        assert!(resolve(&intervals, &glyphs, 91).is_none());
    }

    #[test]
    fn test_sparse_intervals_match_linear_scan() {
        let intervals = [
            CodepointInterval::new(0x20, 0x7E, 0),
            CodepointInterval::new(0xA0, 0xFF, 95),
            CodepointInterval::new(0x2010, 0x2027, 191),
            CodepointInterval::new(0x3000, 0x3000, 215),
            CodepointInterval::new(0xAC00, 0xAC10, 216),
            CodepointInterval::new(0x1F600, 0x1F602, 233),
        ];
        let glyphs = glyphs(236);

        for cp in (0..0x2100).chain(0x2FF0..0x3010).chain(0xABF0..0xAC20).chain(0x1F5F0..0x1F610) {
            let expected = linear_scan(&intervals, cp);
            assert_eq!(glyph_index(&intervals, cp), expected, "codepoint {cp:#x}");
            assert_eq!(
                resolve(&intervals, &glyphs, cp).map(|g| g.width as usize),
                expected,
                "codepoint {cp:#x}"
            );
        }
    }

    #[test]
    fn test_gap_between_intervals() {
        let intervals = [CodepointInterval::new(10, 20, 0), CodepointInterval::new(30, 40, 11)];
        assert!(find_interval(&intervals, 25).is_none());
        assert_eq!(find_interval(&intervals, 30), Some(&intervals[1]));
    }

    #[test]
    fn test_offset_past_glyphs() {
        let intervals = [CodepointInterval::new(65, 90, 20)];
        let glyphs = glyphs(26);
        assert!(resolve(&intervals, &glyphs, 65).is_some());
        assert!(resolve(&intervals, &glyphs, 75).is_none());
    }

    #[test]
    fn test_max_codepoint() {
        let intervals = [CodepointInterval::new(u32::MAX - 1, u32::MAX, 0)];
        let glyphs = glyphs(2);
        assert_eq!(resolve(&intervals, &glyphs, u32::MAX).map(|g| g.width), Some(1));
    }
}
