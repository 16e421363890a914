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
//! Owned ARGB pixel buffers used both as render targets and as blit sources.

#[cfg(feature = "png_source")]
use png::{BitDepth, ColorType, Decoder, Transformations};
#[cfg(feature = "png_source")]
use std::io::Cursor;

use rs_math3d::{Dimensioni, Recti};

use crate::{Color, Error, Result, dim, rect};

/// Row-major image with one packed `0xAARRGGBB` word per pixel. The row pitch is `width * 4` bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
}

impl Bitmap {
    /// Creates a bitmap filled with `color`.
    pub fn new(width: usize, height: usize, color: Color) -> Self { Self { width, height, pixels: vec![color.to_argb(); width * height] } }

    /// Wraps packed ARGB pixels. The pixel count must match the dimensions.
    pub fn from_argb(width: usize, height: usize, pixels: Vec<u32>) -> Result<Self> {
        if pixels.len() != width * height {
            return Err(Error::InvalidBitmap(format!("expected {} pixels for {}x{}, found {}", width * height, width, height, pixels.len())));
        }
        Ok(Self { width, height, pixels })
    }

    /// Converts little-endian BGRA rows as stored by 32-bit BMP files. `bottom_up` flips the row order so the
    /// first row of the result is the top of the image.
    pub fn from_bgra_bytes(width: usize, height: usize, bits_per_pixel: u32, bytes: &[u8], bottom_up: bool) -> Result<Self> {
        if bits_per_pixel != 32 {
            return Err(Error::UnsupportedBitmap { bits_per_pixel });
        }
        let expected = width * height * 4;
        if bytes.len() < expected {
            return Err(Error::InvalidBitmap(format!("expected {} bytes for {}x{}, found {}", expected, width, height, bytes.len())));
        }
        let mut pixels = Vec::with_capacity(width * height);
        for y in 0..height {
            let src_y = if bottom_up { height - 1 - y } else { y };
            let row = &bytes[src_y * width * 4..(src_y + 1) * width * 4];
            pixels.extend(row.chunks_exact(4).map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]])));
        }
        Ok(Self { width, height, pixels })
    }

    /// Decodes a PNG image. Grayscale and RGB inputs become opaque.
    #[cfg(feature = "png_source")]
    pub fn from_png(bytes: &[u8]) -> Result<Self> {
        let mut decoder = Decoder::new(Cursor::new(bytes));
        decoder.set_transformations(Transformations::normalize_to_color8());
        let mut reader = decoder.read_info().map_err(|e| Error::Decode(e.to_string()))?;
        let buf_size = reader.output_buffer_size().ok_or_else(|| Error::Decode("decoder did not report output size".into()))?;
        let mut data = vec![0; buf_size];
        let info = reader.next_frame(&mut data).map_err(|e| Error::Decode(e.to_string()))?;

        if info.bit_depth != BitDepth::Eight {
            return Err(Error::Decode(format!("unsupported bit depth: {:?}", info.bit_depth)));
        }

        let pixel_size = match info.color_type {
            ColorType::Grayscale => 1,
            ColorType::GrayscaleAlpha => 2,
            ColorType::Rgb => 3,
            ColorType::Rgba => 4,
            ColorType::Indexed => return Err(Error::Decode("indexed images are not supported".into())),
        };

        let width = info.width as usize;
        let height = info.height as usize;
        let mut pixels = Vec::with_capacity(width * height);
        for y in 0..height {
            let line = &data[y * info.line_size..(y + 1) * info.line_size];
            for x in 0..width {
                let p = &line[x * pixel_size..(x + 1) * pixel_size];
                let c = match info.color_type {
                    ColorType::Grayscale => Color { r: p[0], g: p[0], b: p[0], a: 0xFF },
                    ColorType::GrayscaleAlpha => Color { r: p[0], g: p[0], b: p[0], a: p[1] },
                    ColorType::Rgb => Color { r: p[0], g: p[1], b: p[2], a: 0xFF },
                    _ => Color { r: p[0], g: p[1], b: p[2], a: p[3] },
                };
                pixels.push(c.to_argb());
            }
        }
        Ok(Self { width, height, pixels })
    }

    /// Width in pixels.
    pub fn width(&self) -> usize { self.width }

    /// Height in pixels.
    pub fn height(&self) -> usize { self.height }

    /// Size as a [`Dimensioni`].
    pub fn dimension(&self) -> Dimensioni { dim(self.width as i32, self.height as i32) }

    /// Rectangle covering the whole bitmap.
    pub fn bounds(&self) -> Recti { rect(0, 0, self.width as i32, self.height as i32) }

    /// Packed pixels.
    pub fn pixels(&self) -> &[u32] { &self.pixels }

    /// Packed pixels, mutably.
    pub fn pixels_mut(&mut self) -> &mut [u32] { &mut self.pixels }

    /// Pixel at `(x, y)` or `None` when outside.
    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(self.pixels[y as usize * self.width + x as usize])
    }

    /// Writes the pixel at `(x, y)`; out-of-range coordinates are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, argb: u32) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        self.pixels[y as usize * self.width + x as usize] = argb;
    }

    /// Fills every pixel with `color`.
    pub fn clear(&mut self, color: Color) { self.pixels.fill(color.to_argb()) }

    /// Reallocates to the new size, cleared to transparent black.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize(width * height, 0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_argb_checks_size() {
        assert!(Bitmap::from_argb(2, 2, vec![0; 4]).is_ok());
        assert!(matches!(Bitmap::from_argb(2, 2, vec![0; 3]), Err(Error::InvalidBitmap(_))));
    }

    #[test]
    fn bgra_rows_are_flipped_when_bottom_up() {
        // 1x2 image: bottom row blue, top row red
        let bytes = [0xFF, 0x00, 0x00, 0xFF, 0x00, 0x00, 0xFF, 0xFF];
        let bmp = Bitmap::from_bgra_bytes(1, 2, 32, &bytes, true).unwrap();
        assert_eq!(bmp.pixel(0, 0), Some(0xFFFF0000));
        assert_eq!(bmp.pixel(0, 1), Some(0xFF0000FF));
        let bmp = Bitmap::from_bgra_bytes(1, 2, 32, &bytes, false).unwrap();
        assert_eq!(bmp.pixel(0, 0), Some(0xFF0000FF));
    }

    #[test]
    fn non_32bpp_is_rejected() {
        assert_eq!(Bitmap::from_bgra_bytes(1, 1, 24, &[0, 0, 0], false), Err(Error::UnsupportedBitmap { bits_per_pixel: 24 }));
    }

    #[test]
    fn pixel_access_is_bounds_checked() {
        let mut bmp = Bitmap::new(3, 3, Color::BLACK);
        bmp.set_pixel(-1, 0, 5);
        bmp.set_pixel(2, 2, 5);
        assert_eq!(bmp.pixel(2, 2), Some(5));
        assert_eq!(bmp.pixel(3, 0), None);
        bmp.clear(Color::WHITE);
        assert!(bmp.pixels().iter().all(|p| *p == 0xFFFFFFFF));
    }
}
