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
use rs_math3d::{Recti, Vec2i};

use crate::{Bitmap, BitmapFont, ClipStack, Color, Command, Renderer, RendererHandle, rect};

/// Replays [`Command`]s against a renderer while tracking the clip stack.
pub struct Canvas<R: Renderer> {
    renderer: RendererHandle<R>,
    clip: ClipStack,
    font: BitmapFont,
    font_height: i32,
}

impl<R: Renderer> Canvas<R> {
    /// Creates a canvas drawing text with `font` at `font_height` pixels.
    pub fn from(renderer: RendererHandle<R>, font: BitmapFont, font_height: i32) -> Self {
        let dim = renderer.scope(|r| r.dimension());
        Self { renderer, clip: ClipStack::new(rect(0, 0, dim.width, dim.height)), font, font_height }
    }

    /// Resets the clip stack to the renderer's full surface. Called before replaying a frame.
    pub fn begin(&mut self) {
        let dim = self.renderer.scope(|r| r.dimension());
        if self.clip.depth() != 0 {
            tracing::warn!(depth = self.clip.depth(), "unbalanced clip stack at frame start");
        }
        self.clip.reset(rect(0, 0, dim.width, dim.height));
    }

    /// Replaces the font used by [`Command::Text`].
    pub fn set_font(&mut self, font: BitmapFont, font_height: i32) {
        self.font = font;
        self.font_height = font_height;
    }

    /// Returns the clip rectangle applied to the next primitive.
    pub fn current_clip_rect(&self) -> Recti { self.clip.top() }

    /// Returns a clone of the underlying renderer handle.
    pub fn renderer_handle(&self) -> RendererHandle<R> { self.renderer.clone() }

    /// Executes one command.
    pub fn execute(&mut self, command: &Command) {
        match command {
            Command::Clear { color } => self.renderer.scope_mut(|r| r.clear(*color)),
            Command::BeginClip { rect } => {
                self.clip.push(*rect);
            }
            Command::EndClip => {
                if self.clip.pop().is_none() {
                    tracing::warn!("end clip without matching begin clip");
                }
            }
            Command::Rect { rect, color } => self.draw_rect(*rect, *color),
            Command::RoundedRect { rect, radius, color } => self.draw_rounded_rect(*rect, *radius, *color),
            Command::Circle { center, radius, color } => self.draw_circle(*center, *radius, *color),
            Command::Bitmap { bitmap, src, dst } => self.draw_bitmap(bitmap, *src, *dst),
            Command::Text { pos, text, color } => self.draw_text(text, *pos, *color),
        }
    }

    /// Draws a solid rectangle.
    pub fn draw_rect(&mut self, r: Recti, color: Color) {
        let clip = self.clip.top();
        self.renderer.scope_mut(|rd| rd.fill_rect(r, clip, color));
    }

    /// Draws a rectangle with rounded corners.
    pub fn draw_rounded_rect(&mut self, r: Recti, radius: i32, color: Color) {
        let clip = self.clip.top();
        self.renderer.scope_mut(|rd| rd.fill_rounded_rect(r, radius, clip, color));
    }

    /// Draws a filled circle.
    pub fn draw_circle(&mut self, center: Vec2i, radius: i32, color: Color) {
        let clip = self.clip.top();
        self.renderer.scope_mut(|rd| rd.fill_circle(center, radius, clip, color));
    }

    /// Draws the `src` region of `bitmap` scaled into `dst`.
    pub fn draw_bitmap(&mut self, bitmap: &Bitmap, src: Recti, dst: Recti) {
        let clip = self.clip.top();
        self.renderer.scope_mut(|rd| rd.blit(bitmap, src, dst, clip, None));
    }

    /// Draws `text` one glyph cell at a time. Characters the font lacks leave a gap.
    pub fn draw_text(&mut self, text: &str, pos: Vec2i, color: Color) {
        let clip = self.clip.top();
        let advance = self.font.advance(self.font_height);
        let height = self.font_height;
        let font = &self.font;
        self.renderer.scope_mut(|rd| {
            let mut x = pos.x;
            for ch in text.chars() {
                if let Some(src) = font.glyph_rect(ch) {
                    rd.blit(font.bitmap(), src, rect(x, pos.y, advance, height), clip, Some(color));
                }
                x += advance;
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SoftwareRenderer, font::tests::test_font, rect_eq, vec2};

    fn canvas() -> (RendererHandle<SoftwareRenderer>, Canvas<SoftwareRenderer>) {
        let renderer = RendererHandle::new(SoftwareRenderer::new(64, 64));
        let canvas = Canvas::from(renderer.clone(), test_font(), 6);
        (renderer, canvas)
    }

    #[test]
    fn nested_clips_limit_primitives() {
        let (renderer, mut canvas) = canvas();
        canvas.execute(&Command::Clear { color: Color::BLACK });
        canvas.execute(&Command::BeginClip { rect: rect(0, 0, 10, 10) });
        canvas.execute(&Command::BeginClip { rect: rect(5, 5, 20, 20) });
        assert!(rect_eq(canvas.current_clip_rect(), rect(5, 5, 5, 5)));
        canvas.execute(&Command::Rect { rect: rect(0, 0, 64, 64), color: Color::RED });
        canvas.execute(&Command::EndClip);
        canvas.execute(&Command::EndClip);
        assert!(rect_eq(canvas.current_clip_rect(), rect(0, 0, 64, 64)));
        renderer.scope(|r| {
            let red = r.backbuffer().pixels().iter().filter(|p| **p == Color::RED.to_argb()).count();
            assert_eq!(red, 25);
            assert_eq!(r.backbuffer().pixel(4, 4), Some(Color::BLACK.to_argb()));
        });
    }

    #[test]
    fn text_advances_per_char_and_skips_unknown_glyphs() {
        let (renderer, mut canvas) = canvas();
        canvas.execute(&Command::Clear { color: Color::BLACK });
        canvas.execute(&Command::Text { pos: vec2(0, 0), text: "a\u{1}b".into(), color: Color::GREEN });
        renderer.scope(|r| {
            let bb = r.backbuffer();
            assert_eq!(bb.pixel(0, 0), Some(Color::GREEN.to_argb()));
            assert_eq!(bb.pixel(4, 0), Some(Color::BLACK.to_argb()));
            assert_eq!(bb.pixel(8, 0), Some(Color::GREEN.to_argb()));
            assert_eq!(bb.pixel(0, 6), Some(Color::BLACK.to_argb()));
        });
    }

    #[test]
    fn begin_resets_clip_stack() {
        let (_renderer, mut canvas) = canvas();
        canvas.execute(&Command::BeginClip { rect: rect(1, 1, 2, 2) });
        canvas.begin();
        assert!(rect_eq(canvas.current_clip_rect(), rect(0, 0, 64, 64)));
        canvas.execute(&Command::EndClip);
        assert!(rect_eq(canvas.current_clip_rect(), rect(0, 0, 64, 64)));
    }
}
