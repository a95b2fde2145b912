use super::{Coverage, GlyphSource};

const GLYPH_COLS: usize = 5;
const GLYPH_ROWS: usize = 7;
/// Horizontal advance per character, in cells.
const ADVANCE: usize = 6;
/// Line height in cells; one cell of leading under the glyph rows.
const LINE: usize = 8;

/// Built-in 5×7 bitmap font.
///
/// Covers `A`–`Z`, `0`–`9`, space and `. , ! ? - ' : ;`. Lowercase letters are
/// drawn as uppercase; anything else renders as `?`. Each glyph cell is
/// `px / 8` pixels square, so a line is `px` pixels tall.
#[derive(Debug, Copy, Clone, Default)]
pub struct BlockFont;

impl BlockFont {
    fn cell(px: f32) -> usize {
        ((px / LINE as f32).round() as usize).max(1)
    }
}

impl GlyphSource for BlockFont {
    fn rasterize(&self, text: &str, px: f32) -> Coverage {
        let count = text.chars().count();
        if count == 0 {
            return Coverage::default();
        }

        let cell = Self::cell(px);
        let width = (count * ADVANCE - (ADVANCE - GLYPH_COLS)) * cell;
        let height = GLYPH_ROWS * cell;
        let mut cov = Coverage::new(width, height);

        for (i, ch) in text.chars().enumerate() {
            let rows = glyph(ch);
            let x0 = i * ADVANCE * cell;
            for (r, bits) in rows.iter().enumerate() {
                for c in 0..GLYPH_COLS {
                    if bits & (1 << (GLYPH_COLS - 1 - c)) == 0 {
                        continue;
                    }
                    for dy in 0..cell {
                        let y = r * cell + dy;
                        let row = y * width;
                        let x = x0 + c * cell;
                        cov.data[row + x..row + x + cell].fill(255);
                    }
                }
            }
        }
        cov
    }
}

fn glyph(ch: char) -> [u8; GLYPH_ROWS] {
    match ch.to_ascii_uppercase() {
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
        'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => [0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'F' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111],
        'H' => [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'I' => [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'J' => [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100],
        'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
        'N' => [0b10001, 0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'Q' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'W' => [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010],
        'X' => [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
        'Y' => [0b10001, 0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100],
        'Z' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        ' ' => [0; GLYPH_ROWS],
        '.' => [0, 0, 0, 0, 0, 0b01100, 0b01100],
        ',' => [0, 0, 0, 0, 0b01100, 0b00100, 0b01000],
        '!' => [0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0, 0b00100],
        '-' => [0, 0, 0, 0b11111, 0, 0, 0],
        '\'' => [0b00100, 0b00100, 0b01000, 0, 0, 0, 0],
        ':' => [0, 0b01100, 0b01100, 0, 0b01100, 0b01100, 0],
        ';' => [0, 0b01100, 0b01100, 0, 0b01100, 0b00100, 0b01000],
        _ => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0, 0b00100],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_size_follows_pixel_size() {
        let cov = BlockFont.rasterize("AB", 16.0);
        // cell = 2px; two glyphs + one gap column.
        assert_eq!(cov.width, 11 * 2);
        assert_eq!(cov.height, 7 * 2);
    }

    #[test]
    fn letter_i_has_a_solid_stem() {
        let cov = BlockFont.rasterize("I", 8.0);
        for y in 1..6 {
            assert_eq!(cov.alpha(2, y), 255, "row {y}");
            assert_eq!(cov.alpha(0, y), 0);
        }
    }

    #[test]
    fn lowercase_matches_uppercase() {
        assert_eq!(BlockFont.rasterize("shimmer", 24.0), BlockFont.rasterize("SHIMMER", 24.0));
    }

    #[test]
    fn space_is_blank_and_unknown_is_not() {
        assert_eq!(BlockFont.rasterize(" ", 8.0).count_above(0), 0);
        assert!(BlockFont.rasterize("@", 8.0).count_above(0) > 0);
    }

    #[test]
    fn empty_text_is_empty() {
        assert!(BlockFont.rasterize("", 32.0).is_empty());
    }
}
