//! `EpdFont` FlatBuffers schema access
//!
//! ```text
//! struct EpdGlyph { width: ushort; height: ushort; advance_x: short; left: short;
//!                   top: short; data_length: uint; data_offset: uint; }
//! struct EpdUnicodeInterval { first: uint; last: uint; offset: uint; }
//! table EpdFont { bitmap: [ubyte]; glyph: [EpdGlyph]; intervals: [EpdUnicodeInterval];
//!                 advance_y: ubyte; ascender: int; descender: int; is_2bit: bool; }
//! root_type EpdFont;
//! ```

use super::reader::FontReader;
use super::ParseError;
use crate::font::{CodepointInterval, GlyphRecord};

/// Root table field slots
pub mod slot {
    pub const BITMAP: u16 = 0;
    pub const GLYPH: u16 = 1;
    pub const INTERVALS: u16 = 2;
    pub const ADVANCE_Y: u16 = 3;
    pub const ASCENDER: u16 = 4;
    pub const DESCENDER: u16 = 5;
    pub const IS_2BIT: u16 = 6;

    pub const COUNT: u16 = 7;
}

/// Serialized size of `EpdGlyph` (two bytes of padding before `data_length`)
pub const GLYPH_SIZE: usize = 20;
/// Serialized size of `EpdUnicodeInterval`
pub const INTERVAL_SIZE: usize = 12;

/// Byte offset of a field's entry inside a vtable
pub fn vtable_entry(slot: u16) -> usize {
    4 + 2 * slot as usize
}

/// A verified table: the vtable and the table body both lie inside the buffer
pub struct Table<'a> {
    data: &'a [u8],
    pos: usize,
    vtable: usize,
    vtable_len: usize,
    table_len: usize,
}

impl<'a> Table<'a> {
    /// Locate and verify the root table
    pub fn root(data: &'a [u8]) -> Result<Self, ParseError> {
        let root = FontReader::new(data).read_u32()? as usize;
        Self::at(data, root)
    }

    fn at(data: &'a [u8], pos: usize) -> Result<Self, ParseError> {
        check_alignment(pos, 4, "table")?;
        let soffset = FontReader::at(data, pos).read_i32()?;
        let vtable = usize::try_from(pos as i64 - soffset as i64)
            .map_err(|_| ParseError::InvalidVTable(pos))?;
        check_alignment(vtable, 2, "vtable")?;

        let mut reader = FontReader::at(data, vtable);
        let vtable_len = reader.read_u16()? as usize;
        let table_len = reader.read_u16()? as usize;
        if vtable_len < 4 || vtable_len % 2 != 0 || table_len < 4 {
            return Err(ParseError::InvalidVTable(vtable));
        }
        // Both ranges must be fully readable
        FontReader::at(data, vtable).skip(vtable_len)?;
        FontReader::at(data, pos).skip(table_len)?;

        Ok(Self { data, pos, vtable, vtable_len, table_len })
    }

    /// Absolute position of a present field of `size` bytes
    fn field(&self, slot: u16, size: usize) -> Result<Option<usize>, ParseError> {
        let entry = vtable_entry(slot);
        if entry + 2 > self.vtable_len {
            return Ok(None);
        }
        let offset = FontReader::at(self.data, self.vtable + entry).read_u16()? as usize;
        if offset == 0 {
            return Ok(None);
        }
        if offset < 4 || offset + size > self.table_len {
            return Err(ParseError::InvalidField(slot));
        }
        let pos = self.pos + offset;
        check_alignment(pos, size, "field")?;
        Ok(Some(pos))
    }

    pub fn read_u8(&self, slot: u16, default: u8) -> Result<u8, ParseError> {
        match self.field(slot, 1)? {
            Some(pos) => FontReader::at(self.data, pos).read_u8(),
            None => Ok(default),
        }
    }

    pub fn read_bool(&self, slot: u16, default: bool) -> Result<bool, ParseError> {
        Ok(self.read_u8(slot, default as u8)? != 0)
    }

    pub fn read_i32(&self, slot: u16, default: i32) -> Result<i32, ParseError> {
        match self.field(slot, 4)? {
            Some(pos) => FontReader::at(self.data, pos).read_i32(),
            None => Ok(default),
        }
    }

    /// Vector of `elem_size`-byte elements, `None` when the field is absent
    pub fn vector(&self, slot: u16, elem_size: usize) -> Result<Option<Vector<'a>>, ParseError> {
        let Some(pos) = self.field(slot, 4)? else {
            return Ok(None);
        };
        let uoffset = FontReader::at(self.data, pos).read_u32()? as usize;
        let target = pos
            .checked_add(uoffset)
            .ok_or(ParseError::OutOfBounds { offset: pos, len: uoffset })?;
        check_alignment(target, 4, "vector")?;

        let mut reader = FontReader::at(self.data, target);
        let len = reader.read_u32()? as usize;
        let byte_len = len
            .checked_mul(elem_size)
            .ok_or(ParseError::OutOfBounds { offset: target, len: usize::MAX })?;
        let bytes = reader.read_bytes(byte_len)?;

        Ok(Some(Vector { bytes, len, elem_size }))
    }
}

/// Verified vector body
pub struct Vector<'a> {
    bytes: &'a [u8],
    len: usize,
    elem_size: usize,
}

impl<'a> Vector<'a> {
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Raw element bytes
    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Reader over element `index`
    fn element(&self, index: usize) -> FontReader<'a> {
        FontReader::at(self.bytes, index * self.elem_size)
    }
}

/// Decode an `EpdGlyph` struct vector
pub fn read_glyphs(vector: &Vector<'_>) -> Result<Vec<GlyphRecord>, ParseError> {
    (0..vector.len())
        .map(|i| {
            let mut r = vector.element(i);
            let width = r.read_u16()?;
            let height = r.read_u16()?;
            let advance_x = r.read_i16()?;
            let left = r.read_i16()?;
            let top = r.read_i16()?;
            r.skip(2)?;
            let data_length = r.read_u32()?;
            let data_offset = r.read_u32()?;
            Ok(GlyphRecord { width, height, advance_x, left, top, data_offset, data_length })
        })
        .collect()
}

/// Decode an `EpdUnicodeInterval` struct vector
pub fn read_intervals(vector: &Vector<'_>) -> Result<Vec<CodepointInterval>, ParseError> {
    (0..vector.len())
        .map(|i| {
            let mut r = vector.element(i);
            Ok(CodepointInterval {
                first: r.read_u32()?,
                last: r.read_u32()?,
                offset: r.read_u32()?,
            })
        })
        .collect()
}

fn check_alignment(pos: usize, align: usize, what: &'static str) -> Result<(), ParseError> {
    if pos % align == 0 {
        Ok(())
    } else {
        Err(ParseError::Misaligned { what, offset: pos })
    }
}
