//! `EpdFont` FlatBuffers writer
//!
//! Layout: root offset, vtable, root table, then the vectors, each 4-byte
//! aligned. Empty vectors are left out of the table.

use super::schema::{slot, vtable_entry, GLYPH_SIZE, INTERVAL_SIZE};
use crate::font::FontData;

const VTABLE_POS: usize = 4;
const VTABLE_LEN: usize = 4 + 2 * slot::COUNT as usize;

// Root table body: soffset, three vector offsets, two i32s, two u8s, padding
const TABLE_LEN: usize = 28;
const BITMAP_FIELD: usize = 4;
const GLYPH_FIELD: usize = 8;
const INTERVALS_FIELD: usize = 12;
const ASCENDER_FIELD: usize = 16;
const DESCENDER_FIELD: usize = 20;
const ADVANCE_Y_FIELD: usize = 24;
const IS_2BIT_FIELD: usize = 25;

/// Serialize a font data store into the `EpdFont` binary format
pub fn serialize(font: &FontData) -> Vec<u8> {
    let table_pos = align4(VTABLE_POS + VTABLE_LEN);
    let glyph_bytes = font.glyphs().len() * GLYPH_SIZE;
    let interval_bytes = font.intervals().len() * INTERVAL_SIZE;
    let mut output = Vec::with_capacity(
        table_pos + TABLE_LEN + 12 + align4(font.bitmap().len()) + glyph_bytes + interval_bytes,
    );

    output.extend_from_slice(&(table_pos as u32).to_le_bytes());

    let present = |empty: bool, field: usize| if empty { 0 } else { field as u16 };
    let mut fields = [0u16; slot::COUNT as usize];
    fields[slot::BITMAP as usize] = present(font.bitmap().is_empty(), BITMAP_FIELD);
    fields[slot::GLYPH as usize] = present(font.glyphs().is_empty(), GLYPH_FIELD);
    fields[slot::INTERVALS as usize] = present(font.intervals().is_empty(), INTERVALS_FIELD);
    fields[slot::ADVANCE_Y as usize] = ADVANCE_Y_FIELD as u16;
    fields[slot::ASCENDER as usize] = ASCENDER_FIELD as u16;
    fields[slot::DESCENDER as usize] = DESCENDER_FIELD as u16;
    fields[slot::IS_2BIT as usize] = IS_2BIT_FIELD as u16;

    output.extend_from_slice(&(VTABLE_LEN as u16).to_le_bytes());
    output.extend_from_slice(&(TABLE_LEN as u16).to_le_bytes());
    for (i, field) in fields.iter().enumerate() {
        debug_assert_eq!(output.len(), VTABLE_POS + vtable_entry(i as u16));
        output.extend_from_slice(&field.to_le_bytes());
    }
    pad4(&mut output);

    // Root table; vector offsets are patched once the vectors are placed
    let metrics = font.metrics();
    output.extend_from_slice(&((table_pos - VTABLE_POS) as i32).to_le_bytes());
    output.extend_from_slice(&[0u8; 12]);
    output.extend_from_slice(&metrics.ascender.to_le_bytes());
    output.extend_from_slice(&metrics.descender.to_le_bytes());
    output.push(metrics.line_advance);
    output.push(metrics.is_2bit as u8);
    pad4(&mut output);

    if !font.bitmap().is_empty() {
        let pos = begin_vector(&mut output, table_pos + BITMAP_FIELD, font.bitmap().len());
        output.extend_from_slice(font.bitmap());
        debug_assert_eq!(output.len(), pos + 4 + font.bitmap().len());
        pad4(&mut output);
    }

    if !font.glyphs().is_empty() {
        begin_vector(&mut output, table_pos + GLYPH_FIELD, font.glyphs().len());
        for glyph in font.glyphs() {
            output.extend_from_slice(&glyph.width.to_le_bytes());
            output.extend_from_slice(&glyph.height.to_le_bytes());
            output.extend_from_slice(&glyph.advance_x.to_le_bytes());
            output.extend_from_slice(&glyph.left.to_le_bytes());
            output.extend_from_slice(&glyph.top.to_le_bytes());
            output.extend_from_slice(&[0u8; 2]);
            output.extend_from_slice(&glyph.data_length.to_le_bytes());
            output.extend_from_slice(&glyph.data_offset.to_le_bytes());
        }
    }

    if !font.intervals().is_empty() {
        begin_vector(&mut output, table_pos + INTERVALS_FIELD, font.intervals().len());
        for interval in font.intervals() {
            output.extend_from_slice(&interval.first.to_le_bytes());
            output.extend_from_slice(&interval.last.to_le_bytes());
            output.extend_from_slice(&interval.offset.to_le_bytes());
        }
    }

    output
}

/// Write a vector length prefix and point `field_pos` at it
fn begin_vector(output: &mut Vec<u8>, field_pos: usize, len: usize) -> usize {
    pad4(output);
    let pos = output.len();
    output[field_pos..field_pos + 4].copy_from_slice(&((pos - field_pos) as u32).to_le_bytes());
    output.extend_from_slice(&(len as u32).to_le_bytes());
    pos
}

fn align4(n: usize) -> usize {
    (n + 3) & !3
}

fn pad4(output: &mut Vec<u8>) {
    output.resize(align4(output.len()), 0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::{CodepointInterval, FontMetrics, GlyphRecord};
    use crate::loader::schema::Table;

    #[test]
    fn test_empty_font_layout() {
        let bytes = serialize(&FontData::default());
        // root offset + vtable (18, padded to 20) + table
        assert_eq!(bytes.len(), 24 + TABLE_LEN);
        let table = Table::root(&bytes).unwrap();
        assert!(table.vector(slot::BITMAP, 1).unwrap().is_none());
        assert!(table.vector(slot::GLYPH, GLYPH_SIZE).unwrap().is_none());
        assert!(!table.read_bool(slot::IS_2BIT, true).unwrap());
    }

    #[test]
    fn test_vectors_are_aligned() {
        let font = FontData::new(
            vec![1u8, 2, 3],
            vec![GlyphRecord { width: 3, data_length: 3, ..Default::default() }],
            vec![CodepointInterval::new(33, 33, 0)],
            FontMetrics { ascender: 9, descender: -3, line_advance: 14, is_2bit: false },
        );
        let bytes = serialize(&font);
        assert_eq!(bytes.len() % 4, 0);

        let table = Table::root(&bytes).unwrap();
        assert_eq!(table.vector(slot::BITMAP, 1).unwrap().unwrap().bytes(), &[1, 2, 3]);
        assert_eq!(table.vector(slot::GLYPH, GLYPH_SIZE).unwrap().unwrap().len(), 1);
        assert_eq!(table.vector(slot::INTERVALS, INTERVAL_SIZE).unwrap().unwrap().len(), 1);
        assert_eq!(table.read_u8(slot::ADVANCE_Y, 0).unwrap(), 14);
        assert_eq!(table.read_i32(slot::DESCENDER, 0).unwrap(), -3);
    }
}
