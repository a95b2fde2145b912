use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle};

use super::{Coverage, GlyphSource};

/// Error returned by [`FontFace::from_bytes`].
#[derive(Debug, Clone, thiserror::Error)]
#[error("font load error: {0}")]
pub struct FontLoadError(pub String);

/// A parsed TrueType or OpenType face.
pub struct FontFace {
    font: fontdue::Font,
}

impl FontFace {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, FontLoadError> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| FontLoadError(e.to_string()))?;
        Ok(Self { font })
    }
}

impl GlyphSource for FontFace {
    fn rasterize(&self, text: &str, px: f32) -> Coverage {
        let px = px.max(1.0);

        let mut layout: Layout<()> = Layout::new(CoordinateSystem::PositiveYDown);
        layout.reset(&LayoutSettings::default());
        layout.append(&[&self.font], &TextStyle::new(text, px, 0));

        let glyphs = layout.glyphs();
        if glyphs.is_empty() {
            return Coverage::default();
        }

        // Pen extent rather than bitmap extent, so trailing advances are kept
        // and the line centres the same way the font's own metrics would.
        let width = glyphs
            .iter()
            .map(|g| {
                let m = self.font.metrics_indexed(g.key.glyph_index, px);
                (g.x - m.xmin as f32 + m.advance_width).max(g.x + g.width as f32)
            })
            .fold(0.0f32, f32::max)
            .ceil() as usize;
        let height = glyphs
            .iter()
            .map(|g| g.y + g.height as f32)
            .fold(layout.height(), f32::max)
            .ceil() as usize;

        let mut cov = Coverage::new(width, height);
        for g in glyphs {
            if g.width == 0 || g.height == 0 {
                continue;
            }
            let (_, bitmap) = self.font.rasterize_config(g.key);
            cov.stamp(g.x.round() as i32, g.y.round() as i32, g.width, &bitmap);
        }
        cov
    }
}
