//
// Copyright 2022-Present (c) Raja Lehtihet & Wael El Oraiby
//
// Redistribution and use in source and binary forms, with or without
// modification, are permitted provided that the following conditions are met:
//
// 1. Redistributions of source code must retain the above copyright notice,
// this list of conditions and the following disclaimer.
//
// 2. Redistributions in binary form must reproduce the above copyright notice,
// this list of conditions and the following disclaimer in the documentation
// and/or other materials provided with the distribution.
//
// 3. Neither the name of the copyright holder nor the names of its contributors
// may be used to endorse or promote products derived from this software without
// specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
// AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE
// ARE DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE
// LIABLE FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR
// CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF
// SUBSTITUTE GOODS OR SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS
// INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN
// CONTRACT, STRICT LIABILITY, OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE)
// ARISING IN ANY WAY OUT OF THE USE OF THIS SOFTWARE, EVEN IF ADVISED OF THE
// POSSIBILITY OF SUCH DAMAGE.
//
//! Fixed-cell bitmap fonts.
//!
//! A font is a glyph grid stored in a [`Bitmap`]: every glyph occupies one `cell.width x cell.height` cell, laid
//! out left to right, top to bottom, starting at `' '`. Glyphs are scaled to the requested pixel height at
//! draw time, keeping the cell aspect ratio.

use std::rc::Rc;

use rs_math3d::{Dimensioni, Recti};

use crate::{Bitmap, dim, rect};
#[cfg(feature = "builder")]
use crate::{Color, Error, Result};

/// First character stored in the glyph grid.
pub const FIRST_GLYPH: char = ' ';

/// Glyph-grid font.
#[derive(Clone, Debug)]
pub struct BitmapFont {
    bitmap: Rc<Bitmap>,
    cell: Dimensioni,
    columns: usize,
}

impl BitmapFont {
    /// Wraps a glyph grid with `columns` glyphs per row.
    ///
    /// # Panics
    /// Panics if a cell dimension or the column count is zero.
    #[track_caller]
    pub fn new(bitmap: Rc<Bitmap>, cell_width: i32, cell_height: i32, columns: usize) -> Self {
        assert!(cell_width > 0 && cell_height > 0, "font cell must not be empty ({}x{})", cell_width, cell_height);
        assert!(columns > 0, "font needs at least one glyph column");
        Self { bitmap, cell: dim(cell_width, cell_height), columns }
    }

    /// Bakes the printable ASCII range of a TrueType/OpenType font into a 16 column glyph grid whose cells are
    /// `cell_height` pixels high. Coverage is stored in the alpha channel over white.
    #[cfg(feature = "builder")]
    pub fn rasterize(font_data: &[u8], cell_height: usize) -> Result<Self> {
        use fontdue::{Font, FontSettings};

        const COLUMNS: usize = 16;
        let font = Font::from_bytes(font_data, FontSettings::default()).map_err(|e| Error::Font(e.to_string()))?;
        let size = cell_height as f32;
        let glyphs: Vec<_> = (32u8..127).map(|c| font.rasterize(c as char, size)).collect();
        let cell_width = glyphs.iter().map(|(m, _)| m.advance_width.ceil() as usize).max().unwrap_or(0).max(1);
        let ascent = font.horizontal_line_metrics(size).map(|m| m.ascent.round() as i32).unwrap_or(cell_height as i32);

        let rows = glyphs.len().div_ceil(COLUMNS);
        let mut bitmap = Bitmap::new(cell_width * COLUMNS, cell_height * rows, Color::TRANSPARENT);
        for (i, (metrics, coverage)) in glyphs.iter().enumerate() {
            let cell_x = ((i % COLUMNS) * cell_width) as i32;
            let cell_y = ((i / COLUMNS) * cell_height) as i32;
            let left = metrics.xmin.max(0);
            let top = ascent - metrics.ymin - metrics.height as i32;
            for y in 0..metrics.height {
                for x in 0..metrics.width {
                    let (px, py) = (left + x as i32, top + y as i32);
                    if px < 0 || py < 0 || px >= cell_width as i32 || py >= cell_height as i32 {
                        continue;
                    }
                    let a = coverage[y * metrics.width + x];
                    bitmap.set_pixel(cell_x + px, cell_y + py, Color::WHITE.with_alpha(a).to_argb());
                }
            }
        }
        tracing::debug!(cell_width, cell_height, "font rasterized");
        Ok(Self::new(Rc::new(bitmap), cell_width as i32, cell_height as i32, COLUMNS))
    }

    /// Glyph grid.
    pub fn bitmap(&self) -> &Rc<Bitmap> { &self.bitmap }

    /// Size of one glyph cell in the grid.
    pub fn cell(&self) -> Dimensioni { self.cell }

    /// Number of glyphs stored in the grid.
    pub fn glyph_count(&self) -> usize {
        let rows = self.bitmap.height() / self.cell.height as usize;
        rows * self.columns
    }

    /// Source rectangle of `ch` in the glyph grid, or `None` if the font does not store it.
    pub fn glyph_rect(&self, ch: char) -> Option<Recti> {
        let index = (ch as u32).checked_sub(FIRST_GLYPH as u32)? as usize;
        if index >= self.glyph_count() {
            return None;
        }
        let x = (index % self.columns) as i32 * self.cell.width;
        let y = (index / self.columns) as i32 * self.cell.height;
        Some(rect(x, y, self.cell.width, self.cell.height))
    }

    /// Horizontal advance of every glyph when drawn `height` pixels high.
    pub fn advance(&self, height: i32) -> i32 {
        let ratio = self.cell.width as f32 / self.cell.height as f32;
        (ratio * height as f32 + 0.5) as i32
    }

    /// Width of `text` drawn `height` pixels high.
    pub fn text_width(&self, text: &str, height: i32) -> i32 { self.advance(height) * text.chars().count() as i32 }

    /// Size of `text` drawn `height` pixels high.
    pub fn text_size(&self, text: &str, height: i32) -> Dimensioni { dim(self.text_width(text, height), height) }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::{Color, dim_eq, rect_eq};

    /// 4x6 cells, 16 columns, 6 rows: covers `' '..='\x7f'`. Every glyph is an opaque white box.
    pub(crate) fn test_font() -> BitmapFont {
        let bitmap = Bitmap::new(4 * 16, 6 * 6, Color::WHITE);
        BitmapFont::new(Rc::new(bitmap), 4, 6, 16)
    }

    #[test]
    fn glyph_rects_follow_grid() {
        let font = test_font();
        assert!(font.glyph_rect(' ').is_some_and(|r| rect_eq(r, rect(0, 0, 4, 6))));
        assert!(font.glyph_rect('!').is_some_and(|r| rect_eq(r, rect(4, 0, 4, 6))));
        // '0' is index 16: second row
        assert!(font.glyph_rect('0').is_some_and(|r| rect_eq(r, rect(0, 6, 4, 6))));
        assert!(font.glyph_rect('\n').is_none());
        assert!(font.glyph_rect('é').is_none());
    }

    #[test]
    fn advance_scales_with_height() {
        let font = test_font();
        assert_eq!(font.advance(6), 4);
        assert_eq!(font.advance(9), 6);
        assert_eq!(font.text_width("OK", 9), 12);
        assert!(dim_eq(font.text_size("abc", 9), dim(18, 9)));
    }

    #[test]
    #[should_panic]
    fn zero_cell_panics() { BitmapFont::new(Rc::new(Bitmap::new(1, 1, Color::WHITE)), 0, 6, 1); }
}
