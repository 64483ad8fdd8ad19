//! epd-font - Bitmap Font Engine
//!
//! Font data engine for e-paper and other constrained displays:
//! - Glyph lookup over a sparse, sorted codepoint interval index
//! - Text measurement (bounding boxes, dimensions, printable content)
//! - Font families with regular/bold/italic/bold-italic fallback
//! - Loading fonts from the serialized FlatBuffers font format
//! - Building and serializing font assets

pub mod builder;
pub mod family;
pub mod font;
pub mod layout;
pub mod loader;
pub mod storage;

pub use builder::{FontBuilder, GlyphMetrics};
pub use family::{FontFamily, Style};
pub use font::{
    BitmapFont, CodepointInterval, FontData, FontMetrics, GlyphBitmap, GlyphRecord, RamFont,
};
pub use layout::TextBounds;
pub use loader::{load, serialize, Loader, LoaderConfig, ParseError};
pub use storage::{ByteSource, FontStorage, MemoryStorage};
#[cfg(feature = "std-fs")]
pub use storage::{FileSource, FsStorage};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Font engine error types
#[derive(Debug, thiserror::Error)]
pub enum FontError {
    #[error("Font not found: {0}")]
    FontNotFound(String),

    #[error("Font buffer is empty")]
    EmptyBuffer,

    #[error("Font too large: {size} bytes (limit {limit})")]
    TooLarge { size: usize, limit: usize },

    #[error("Short read: expected {expected} bytes, got {actual}")]
    ShortRead { expected: usize, actual: usize },

    #[error("Failed to parse font: {0}")]
    Parse(#[from] ParseError),

    #[error("Invalid font data: {0}")]
    InvalidData(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FontError>;
