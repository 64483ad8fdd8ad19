//! Example: inspect a serialized font and measure text with it
//!
//! Usage: cargo run --example font_info -- [FONT.epd_fb] [TEXT]
//! Without a font path a small built-in font is used.

use anyhow::Context;
use epd_font::{
    BitmapFont, FontBuilder, FontMetrics, FsStorage, GlyphBitmap, GlyphMetrics, Loader, RamFont,
};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let path = args.next();
    let text = args.next().unwrap_or_else(|| "Hello, e-paper!".to_string());

    let font = match &path {
        Some(path) => {
            let storage = FsStorage::new(".");
            Loader::default()
                .load_from_storage(&storage, path)
                .with_context(|| format!("loading {path}"))?
        }
        None => demo_font(),
    };

    println!("epd-font v{}", epd_font::VERSION);
    println!(
        "ascent {}  descent {}  line height {}",
        font.ascent(),
        font.descent(),
        font.line_height()
    );
    println!("bit depth: {}", if font.is_2bit() { 2 } else { 1 });
    println!(
        "{} glyphs in {} intervals, {} bitmap bytes",
        font.data().glyphs().len(),
        font.data().interval_count(),
        font.bitmap_data().len()
    );

    let bounds = font.text_bounds(&text, 0, 0);
    let (w, h) = bounds.size();
    let printable = font.has_printable_chars(&text);
    println!("{text:?}: {w}x{h} px, bounds {bounds:?}, printable: {printable}");

    if let Some(first) = text.chars().next() {
        if let Some(glyph) = font.glyph(first as u32) {
            let data = font.glyph_bitmap(glyph).unwrap_or_default();
            let bitmap = GlyphBitmap::new(glyph, data, font.is_2bit());
            for y in 0..bitmap.height() {
                let row: String = (0..bitmap.width())
                    .map(|x| match bitmap.pixel(x, y) {
                        0 => '.',
                        1 if bitmap.max_level() > 1 => '+',
                        _ => '#',
                    })
                    .collect();
                println!("{row}");
            }
        }
    }

    Ok(())
}

/// Block glyphs for printable ASCII
fn demo_font() -> RamFont {
    let mut builder = FontBuilder::new(FontMetrics {
        ascender: 8,
        descender: -2,
        line_advance: 11,
        is_2bit: false,
    });
    for cp in 0x21..=0x7E {
        let metrics = GlyphMetrics { width: 5, height: 8, advance_x: 6, left: 0, top: 8 };
        builder.add_glyph(cp, metrics, vec![0xFF; GlyphBitmap::packed_len(5, 8, false)]);
    }
    let space = GlyphMetrics { advance_x: 6, ..Default::default() };
    builder.add_glyph(' ' as u32, space, Vec::<u8>::new());
    RamFont::new(builder.build())
}
