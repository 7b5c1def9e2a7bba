//! Glyph generation for proof rendering.
//!
//! Uses the Spleen bitmap font family. All three font families share the
//! same bitmaps; only the size changes the face.

use spleen_font::{FONT_6X12, FONT_8X16, FONT_12X24, PSF2Font};

use crate::template::FontSize;

/// Cell size for each text size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontMetrics {
    pub char_width: usize,
    pub char_height: usize,
}

impl FontMetrics {
    pub const SMALL: FontMetrics = FontMetrics {
        char_width: 6,
        char_height: 12,
    };

    pub const MEDIUM: FontMetrics = FontMetrics {
        char_width: 8,
        char_height: 16,
    };

    pub const LARGE: FontMetrics = FontMetrics {
        char_width: 12,
        char_height: 24,
    };

    pub fn for_size(size: FontSize) -> FontMetrics {
        match size {
            FontSize::Small => Self::SMALL,
            FontSize::Medium => Self::MEDIUM,
            FontSize::Large => Self::LARGE,
        }
    }
}

/// A glyph bitmap, row-major, `true` = black.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    pub width: usize,
    pub height: usize,
    pub bits: Vec<bool>,
}

impl Glyph {
    pub fn is_set(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.bits[y * self.width + x]
    }
}

/// Generate the glyph for a character. Characters missing from the font
/// render as an outlined box.
pub fn generate_glyph(size: FontSize, ch: char) -> Glyph {
    let metrics = FontMetrics::for_size(size);
    let mut glyph = Glyph {
        width: metrics.char_width,
        height: metrics.char_height,
        bits: vec![false; metrics.char_width * metrics.char_height],
    };

    let data = match size {
        FontSize::Small => FONT_6X12,
        FontSize::Medium => FONT_8X16,
        FontSize::Large => FONT_12X24,
    };

    let Ok(mut spleen) = PSF2Font::new(data) else {
        draw_box(&mut glyph);
        return glyph;
    };

    let utf8_bytes = ch.to_string();
    if let Some(spleen_glyph) = spleen.glyph_for_utf8(utf8_bytes.as_bytes()) {
        for (row_y, row) in spleen_glyph.enumerate() {
            for (col_x, on) in row.enumerate() {
                if row_y < glyph.height && col_x < glyph.width {
                    glyph.bits[row_y * glyph.width + col_x] = on;
                }
            }
        }
    } else {
        draw_box(&mut glyph);
    }

    glyph
}

/// Outline a box inset by one pixel.
fn draw_box(glyph: &mut Glyph) {
    let (w, h) = (glyph.width, glyph.height);
    for x in 1..w - 1 {
        glyph.bits[w + x] = true;
        glyph.bits[(h - 2) * w + x] = true;
    }
    for y in 1..h - 1 {
        glyph.bits[y * w + 1] = true;
        glyph.bits[y * w + w - 2] = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyph_sizes() {
        for size in [FontSize::Small, FontSize::Medium, FontSize::Large] {
            let metrics = FontMetrics::for_size(size);
            let glyph = generate_glyph(size, 'A');
            assert_eq!(glyph.width, metrics.char_width);
            assert_eq!(glyph.height, metrics.char_height);
            assert_eq!(glyph.bits.len(), metrics.char_width * metrics.char_height);
        }
    }

    #[test]
    fn test_letter_has_ink_and_space_has_none() {
        let a = generate_glyph(FontSize::Medium, 'A');
        assert!(a.bits.iter().any(|&b| b));

        let space = generate_glyph(FontSize::Medium, ' ');
        assert!(space.bits.iter().all(|&b| !b));
    }

    #[test]
    fn test_draw_box_outline() {
        let mut glyph = Glyph {
            width: 6,
            height: 12,
            bits: vec![false; 72],
        };
        draw_box(&mut glyph);
        assert!(glyph.is_set(1, 1));
        assert!(glyph.is_set(4, 10));
        assert!(!glyph.is_set(0, 0));
        assert!(!glyph.is_set(3, 5));
    }
}
