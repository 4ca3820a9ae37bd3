//! Custom-character patterns and the bitmap rasterizer.
//!
//! Rasterization is a pure function: downsample an arbitrary RGBA bitmap to
//! the 5x8 pixel grid the display expects and threshold each sample to one
//! bit. A pixel is lit when it is mostly opaque and dark, which matches how
//! sprite art is drawn (dark ink on a transparent or light background).

use crate::sprite::assets::Bitmap;
use crate::types::{GLYPH_HEIGHT, GLYPH_WIDTH};

/// One custom character: 8 rows, low 5 bits used per row, bit 4 is the
/// leftmost pixel. This is the exact byte layout CGRAM expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GlyphPattern(pub [u8; GLYPH_HEIGHT as usize]);

impl GlyphPattern {
    pub fn rows(&self) -> &[u8; GLYPH_HEIGHT as usize] {
        &self.0
    }

    /// Number of lit pixels, used by the emulator to pick a shade.
    pub fn lit_pixels(&self) -> u32 {
        self.0.iter().map(|row| row.count_ones()).sum()
    }

    pub fn is_blank(&self) -> bool {
        self.0.iter().all(|&row| row == 0)
    }
}

/// Downsample and threshold a bitmap into a glyph pattern.
///
/// Nearest-neighbor sampling; a sample is lit when alpha > 128 and the RGB
/// average is below 128.
pub fn rasterize(bitmap: &Bitmap) -> GlyphPattern {
    let mut rows = [0u8; GLYPH_HEIGHT as usize];

    for y in 0..GLYPH_HEIGHT {
        let sy = (y * bitmap.height + bitmap.height / 2) / GLYPH_HEIGHT;
        let mut row = 0u8;
        for x in 0..GLYPH_WIDTH {
            let sx = (x * bitmap.width + bitmap.width / 2) / GLYPH_WIDTH;
            let [r, g, b, a] = bitmap.pixel(sx.min(bitmap.width - 1), sy.min(bitmap.height - 1));
            let luma = (r as u32 + g as u32 + b as u32) / 3;
            if a > 128 && luma < 128 {
                row |= 1 << (GLYPH_WIDTH - 1 - x);
            }
        }
        rows[y as usize] = row;
    }

    GlyphPattern(rows)
}
