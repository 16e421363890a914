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
//! Software rasterizer painting into an owned [`Bitmap`].
//!
//! Every primitive first intersects its destination with the clip rectangle it receives (and with the
//! backbuffer bounds), so nothing is ever written outside the active clip.

use rs_math3d::{Dimensioni, Recti, Vec2i};

use crate::{Bitmap, ClipRect, Color, Renderer, clip_rect, is_empty, length, point_inside, rect, vec2};

/// [`Renderer`] writing packed ARGB pixels into a memory buffer.
pub struct SoftwareRenderer {
    backbuffer: Bitmap,
}

impl SoftwareRenderer {
    /// Creates a renderer with a black `width x height` backbuffer.
    pub fn new(width: usize, height: usize) -> Self { Self { backbuffer: Bitmap::new(width, height, Color::TRANSPARENT.with_alpha(0xFF)) } }

    /// The frame painted so far.
    pub fn backbuffer(&self) -> &Bitmap { &self.backbuffer }

    /// The frame painted so far, mutably.
    pub fn backbuffer_mut(&mut self) -> &mut Bitmap { &mut self.backbuffer }

    /// Reallocates the backbuffer, e.g. after the platform window was resized.
    pub fn resize(&mut self, width: usize, height: usize) {
        tracing::debug!(width, height, "backbuffer resized");
        self.backbuffer.resize(width, height);
    }

    fn clip(&self, r: Recti, clip: Recti) -> Recti { clip_rect(clip_rect(self.backbuffer.bounds(), clip), r) }

    fn blend(&mut self, x: i32, y: i32, color: Color, coverage: f32) {
        let alpha = coverage * color.a as f32 / 255.0;
        if alpha >= 1.0 {
            self.backbuffer.set_pixel(x, y, color.with_alpha(0xFF).to_argb());
            return;
        }
        let Some(dst) = self.backbuffer.pixel(x, y) else { return };
        let dst = Color::from_argb(dst);
        let mix = |s: u8, d: u8| (s as f32 * alpha + d as f32 * (1.0 - alpha) + 0.5) as u8;
        let out = Color { r: mix(color.r, dst.r), g: mix(color.g, dst.g), b: mix(color.b, dst.b), a: 0xFF };
        self.backbuffer.set_pixel(x, y, out.to_argb());
    }
}

/// Corner of a rounded rectangle.
#[derive(Copy, Clone)]
enum Corner {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

/// Coverage of a pixel lying in a corner square, or `None` when the pixel is outside the arc.
fn corner_coverage(corner: Corner, mut pos: Vec2i, square: Recti, radius: i32) -> Option<f32> {
    let center = vec2(square.x + radius, square.y + radius);
    // sample at the pixel edge facing away from the center
    match corner {
        Corner::TopLeft => {}
        Corner::TopRight => pos.x += 1,
        Corner::BottomRight => {
            pos.x += 1;
            pos.y += 1;
        }
        Corner::BottomLeft => pos.y += 1,
    }
    let distance = length((pos.x - center.x) as f32, (pos.y - center.y) as f32);
    let distance_i = distance.floor() as i32;
    let (left, top) = match corner {
        Corner::TopLeft => (true, true),
        Corner::TopRight => (false, true),
        Corner::BottomRight => (false, false),
        Corner::BottomLeft => (true, false),
    };
    let outer_x = if left { pos.x <= center.x } else { pos.x >= center.x };
    let outer_y = if top { pos.y <= center.y } else { pos.y >= center.y };
    let strict_x = if left { pos.x < center.x } else { pos.x > center.x };
    let strict_y = if top { pos.y < center.y } else { pos.y > center.y };
    if strict_x && strict_y && distance_i > radius {
        return None;
    }
    if outer_x && outer_y && distance_i == radius {
        return Some(1.0 - (distance - distance_i as f32));
    }
    Some(1.0)
}

impl Renderer for SoftwareRenderer {
    fn dimension(&self) -> Dimensioni { self.backbuffer.dimension() }

    fn clear(&mut self, color: Color) { self.backbuffer.clear(color) }

    fn fill_rect(&mut self, r: Recti, clip: Recti, color: Color) {
        let r = self.clip(r, clip);
        if is_empty(r) {
            return;
        }
        for y in r.y..r.y + r.height {
            for x in r.x..r.x + r.width {
                self.blend(x, y, color, 1.0);
            }
        }
    }

    fn fill_rounded_rect(&mut self, r: Recti, radius: i32, clip: Recti, color: Color) {
        if is_empty(r) {
            return;
        }
        let radius = radius.clamp(0, r.width.min(r.height) / 2);
        let d = radius * 2;
        let (max_x, max_y) = (r.x + r.width, r.y + r.height);
        let corners = [
            (Corner::TopLeft, rect(r.x, r.y, d, d)),
            (Corner::TopRight, rect(max_x - d, r.y, d, d)),
            (Corner::BottomRight, rect(max_x - d, max_y - d, d, d)),
            (Corner::BottomLeft, rect(r.x, max_y - d, d, d)),
        ];
        let area = self.clip(r, clip);
        for y in area.y..area.y + area.height {
            for x in area.x..area.x + area.width {
                let pos = vec2(x, y);
                let coverage = match corners.iter().find(|(_, square)| point_inside(pos, *square)) {
                    Some((corner, square)) => corner_coverage(*corner, pos, *square, radius),
                    None => Some(1.0),
                };
                if let Some(coverage) = coverage {
                    self.blend(x, y, color, coverage);
                }
            }
        }
    }

    fn fill_circle(&mut self, center: Vec2i, radius: i32, clip: Recti, color: Color) {
        let radius = radius.max(0);
        let area = self.clip(rect(center.x - radius, center.y - radius, radius * 2, radius * 2), clip);
        for y in area.y..area.y + area.height {
            for x in area.x..area.x + area.width {
                let px = if x > center.x { x + 1 } else { x };
                let py = if y > center.y { y + 1 } else { y };
                let distance = length((px - center.x) as f32, (py - center.y) as f32);
                let distance_i = distance.floor() as i32;
                if distance_i > radius {
                    continue;
                }
                let coverage = if distance_i == radius { 1.0 - (distance - distance_i as f32) } else { 1.0 };
                self.blend(x, y, color, coverage);
            }
        }
    }

    fn blit(&mut self, bitmap: &Bitmap, src: Recti, dst: Recti, clip: Recti, tint: Option<Color>) {
        let src = clip_rect(bitmap.bounds(), src);
        let visible = ClipRect::new(clip_rect(self.backbuffer.bounds(), clip), dst);
        let area = visible.rect;
        if is_empty(src) || is_empty(area) {
            return;
        }
        let src_max_x = src.x + src.width - 1;
        let src_max_y = src.y + src.height - 1;
        for row in 0..area.height {
            let ratio_y = (visible.offset.y + row) as f32 / dst.height as f32;
            let sy = (src.y + (src.height as f32 * ratio_y + 0.5) as i32).min(src_max_y);
            let y = area.y + row;
            for col in 0..area.width {
                let x = area.x + col;
                let ratio_x = (visible.offset.x + col) as f32 / dst.width as f32;
                let sx = (src.x + (src.width as f32 * ratio_x + 0.5) as i32).min(src_max_x);
                let Some(argb) = bitmap.pixel(sx, sy) else { continue };
                if (argb >> 24) & 0xFF <= 128 {
                    continue;
                }
                let out = match tint {
                    Some(t) => Color { a: (argb >> 24) as u8, ..t }.to_argb(),
                    None => argb,
                };
                self.backbuffer.set_pixel(x, y, out);
            }
        }
    }
}
