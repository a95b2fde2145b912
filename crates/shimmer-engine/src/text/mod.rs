//! Single-line text rasterization into alpha coverage masks.
//!
//! Two backends share the [`GlyphSource`] trait: [`FontFace`] renders
//! TrueType/OpenType faces through fontdue, and [`BlockFont`] is a built-in
//! 5×7 bitmap font that is always available.

mod block_font;
mod coverage;
mod font_face;

pub use block_font::BlockFont;
pub use coverage::Coverage;
pub use font_face::{FontFace, FontLoadError};

/// Rasterizes one line of text at a pixel size into a tight coverage mask.
pub trait GlyphSource {
    fn rasterize(&self, text: &str, px: f32) -> Coverage;
}

/// Loads a font face from `bytes`, or falls back to the block font.
///
/// A parse failure is logged and never surfaced.
pub fn glyph_source_or_block(bytes: Option<&[u8]>) -> Box<dyn GlyphSource> {
    match bytes.map(FontFace::from_bytes) {
        Some(Ok(face)) => Box::new(face),
        Some(Err(e)) => {
            log::warn!("{e}; using built-in block font");
            Box::new(BlockFont)
        }
        None => Box::new(BlockFont),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_font_bytes_fall_back_to_block_font() {
        let src = glyph_source_or_block(Some(b"definitely not a font"));
        let cov = src.rasterize("A", 16.0);
        assert!(!cov.is_empty());
    }
}
