//! Font Loader
//!
//! Deserializes `EpdFont` FlatBuffers blobs into owned font data. Every
//! offset is bounds- and alignment-checked before it is followed; the
//! sections are copied out so the input buffer can be dropped afterwards.

pub mod reader;
mod schema;
mod writer;

pub use reader::FontReader;
pub use schema::{GLYPH_SIZE, INTERVAL_SIZE};
pub use writer::serialize;

use schema::{slot, Table};

use crate::font::{FontData, FontMetrics, RamFont};
use crate::storage::{ByteSource, FontStorage};
use crate::{FontError, Result};

/// Serialized font parsing error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("read of {len} bytes at offset {offset} is out of bounds")]
    OutOfBounds { offset: usize, len: usize },

    #[error("misaligned {what} at offset {offset}")]
    Misaligned { what: &'static str, offset: usize },

    #[error("invalid vtable for table at offset {0}")]
    InvalidVTable(usize),

    #[error("invalid field in slot {0}")]
    InvalidField(u16),
}

/// Loader configuration
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Largest font blob accepted from storage (bytes)
    pub max_font_bytes: usize,

    /// Check interval ordering and glyph/bitmap ranges after parsing
    pub validate: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            max_font_bytes: 4 * 1024 * 1024, // 4MB
            validate: false,
        }
    }
}

/// Font loader
#[derive(Debug, Clone, Default)]
pub struct Loader {
    config: LoaderConfig,
}

impl Loader {
    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Load a font from a serialized blob
    pub fn load(&self, bytes: &[u8]) -> Result<RamFont> {
        self.load_data(bytes).map(RamFont::new)
    }

    /// Parse a serialized blob into a data store
    pub fn load_data(&self, bytes: &[u8]) -> Result<FontData> {
        if bytes.is_empty() {
            tracing::warn!("Refusing to load font from empty buffer");
            return Err(FontError::EmptyBuffer);
        }

        tracing::debug!("Loading font from flatbuffer, size: {}", bytes.len());
        let data = parse(bytes).inspect_err(|e| tracing::warn!("Font parse failed: {}", e))?;

        if self.config.validate {
            data.validate()
                .inspect_err(|e| tracing::warn!("Font validation failed: {}", e))?;
        }

        tracing::info!(
            "Loaded font: {} glyphs, {} intervals, {} bitmap bytes",
            data.glyphs().len(),
            data.interval_count(),
            data.bitmap().len()
        );
        Ok(data)
    }

    /// Read a font blob from storage and load it
    pub fn load_from_storage<S: FontStorage>(&self, storage: &S, path: &str) -> Result<RamFont> {
        let mut source = storage
            .open(path)
            .inspect_err(|e| tracing::warn!("Failed to open font {}: {}", path, e))?;

        let size = source.size();
        if size == 0 {
            tracing::warn!("Font file is empty: {}", path);
            return Err(FontError::EmptyBuffer);
        }
        if size > self.config.max_font_bytes {
            tracing::warn!("Font file too large: {} ({} bytes)", path, size);
            return Err(FontError::TooLarge { size, limit: self.config.max_font_bytes });
        }

        let bytes = source
            .read_all()
            .inspect_err(|e| tracing::warn!("Failed to read font {}: {}", path, e))?;
        if bytes.len() < size {
            tracing::warn!("Short read on font {}: {} of {} bytes", path, bytes.len(), size);
            return Err(FontError::ShortRead { expected: size, actual: bytes.len() });
        }

        self.load(&bytes[..size])
    }
}

/// Load a font with the default configuration
pub fn load(bytes: &[u8]) -> Result<RamFont> {
    Loader::default().load(bytes)
}

fn parse(bytes: &[u8]) -> std::result::Result<FontData, ParseError> {
    let root = Table::root(bytes)?;

    let bitmap: Box<[u8]> = match root.vector(slot::BITMAP, 1)? {
        Some(vector) => {
            tracing::debug!("Loading bitmap: {} bytes", vector.len());
            vector.bytes().into()
        }
        None => Box::default(),
    };

    let glyphs = match root.vector(slot::GLYPH, GLYPH_SIZE)? {
        Some(vector) => {
            tracing::debug!("Loading glyphs: {}", vector.len());
            schema::read_glyphs(&vector)?
        }
        None => Vec::new(),
    };

    let intervals = match root.vector(slot::INTERVALS, INTERVAL_SIZE)? {
        Some(vector) => {
            tracing::debug!("Loading intervals: {}", vector.len());
            schema::read_intervals(&vector)?
        }
        None => Vec::new(),
    };

    let metrics = FontMetrics {
        line_advance: root.read_u8(slot::ADVANCE_Y, 0)?,
        ascender: root.read_i32(slot::ASCENDER, 0)?,
        descender: root.read_i32(slot::DESCENDER, 0)?,
        is_2bit: root.read_bool(slot::IS_2BIT, false)?,
    };

    Ok(FontData::new(bitmap, glyphs, intervals, metrics))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::{BitmapFont, CodepointInterval, GlyphRecord};
    use crate::storage::MemoryStorage;

    fn sample() -> FontData {
        let glyphs = vec![
            GlyphRecord {
                width: 4,
                height: 6,
                advance_x: 5,
                left: 0,
                top: 6,
                data_offset: 0,
                data_length: 3,
            },
            GlyphRecord {
                width: 5,
                height: 7,
                advance_x: 6,
                left: -1,
                top: 7,
                data_offset: 3,
                data_length: 5,
            },
        ];
        FontData::new(
            vec![0xAA; 8],
            glyphs,
            vec![CodepointInterval::new(0x41, 0x41, 0), CodepointInterval::new(0x3F, 0x3F, 1)],
            FontMetrics { ascender: 12, descender: -4, line_advance: 18, is_2bit: true },
        )
    }

    #[test]
    fn test_round_trip() {
        let data = sample();
        let loaded = Loader::default().load_data(&serialize(&data)).unwrap();
        assert_eq!(loaded, data);
    }

    #[test]
    fn test_empty_buffer() {
        assert!(matches!(load(&[]), Err(FontError::EmptyBuffer)));
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(matches!(load(&[0xFF; 16]), Err(FontError::Parse(_))));
        assert!(matches!(load(&[1, 2]), Err(FontError::Parse(_))));
    }

    #[test]
    fn test_validation_is_opt_in() {
        // unsorted intervals still load by default
        let bytes = serialize(&sample());
        assert!(load(&bytes).is_ok());

        let strict = Loader::new(LoaderConfig { validate: true, ..Default::default() });
        assert!(matches!(strict.load(&bytes), Err(FontError::InvalidData(_))));
    }

    #[test]
    fn test_load_from_storage() {
        let mut storage = MemoryStorage::new();
        storage.insert("fonts/small.epd_fb", serialize(&sample()));

        let font = Loader::default().load_from_storage(&storage, "fonts/small.epd_fb").unwrap();
        assert_eq!(font.ascent(), 12);
        assert!(matches!(
            Loader::default().load_from_storage(&storage, "fonts/missing.epd_fb"),
            Err(FontError::FontNotFound(_))
        ));
    }

    #[test]
    fn test_storage_size_limit() {
        let mut storage = MemoryStorage::new();
        storage.insert("big", serialize(&sample()));
        let loader = Loader::new(LoaderConfig { max_font_bytes: 16, ..Default::default() });
        assert!(matches!(
            loader.load_from_storage(&storage, "big"),
            Err(FontError::TooLarge { .. })
        ));
    }

    /// Source that announces more bytes than it delivers
    struct Truncated(Vec<u8>);

    impl ByteSource for Truncated {
        fn size(&self) -> usize {
            self.0.len() + 8
        }

        fn read_all(&mut self) -> std::io::Result<Vec<u8>> {
            Ok(self.0.clone())
        }
    }

    struct TruncatedStorage(Vec<u8>);

    impl FontStorage for TruncatedStorage {
        type Source = Truncated;

        fn open(&self, _path: &str) -> Result<Truncated> {
            Ok(Truncated(self.0.clone()))
        }
    }

    #[test]
    fn test_storage_short_read() {
        let bytes = serialize(&sample());
        let len = bytes.len();
        let storage = TruncatedStorage(bytes);

        match Loader::default().load_from_storage(&storage, "short") {
            Err(FontError::ShortRead { expected, actual }) => {
                assert_eq!(expected, len + 8);
                assert_eq!(actual, len);
            }
            other => panic!("expected short read, got {:?}", other.map(|_| ())),
        }
    }
}
