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

use crate::{clip_rect, vec2};

/// Entry of a [`ClipStack`].
#[derive(Copy, Clone, Debug)]
pub struct ClipRect {
    /// Effective clip rectangle.
    pub rect: Recti,
    /// How far the requested origin was moved to land inside the parent clip.
    pub offset: Vec2i,
}

impl ClipRect {
    /// Intersects `rect` with `clip` and records how far its origin moved. Sampling code adds `offset` to map a
    /// pixel of the clipped rect back to the requested one.
    pub fn new(clip: Recti, rect: Recti) -> Self {
        let clipped = clip_rect(clip, rect);
        Self { rect: clipped, offset: vec2(clipped.x - rect.x, clipped.y - rect.y) }
    }
}

/// Stack of nested clip rectangles. The base entry covers the whole destination and is never popped.
#[derive(Clone, Debug)]
pub struct ClipStack {
    stack: Vec<ClipRect>,
}

impl ClipStack {
    /// Creates a stack whose base clip is `base`.
    pub fn new(base: Recti) -> Self { Self { stack: vec![ClipRect { rect: base, offset: vec2(0, 0) }] } }

    /// Intersects `rect` with the current top and pushes the result.
    pub fn push(&mut self, rect: Recti) -> ClipRect {
        let entry = ClipRect::new(self.top(), rect);
        self.stack.push(entry);
        entry
    }

    /// Removes the top entry. The base clip stays.
    pub fn pop(&mut self) -> Option<ClipRect> {
        if self.stack.len() > 1 {
            self.stack.pop()
        } else {
            None
        }
    }

    /// Current clip rectangle.
    pub fn top(&self) -> Recti { self.stack[self.stack.len() - 1].rect }

    /// Number of pushed entries above the base.
    pub fn depth(&self) -> usize { self.stack.len() - 1 }

    /// Drops every pushed entry and replaces the base.
    pub fn reset(&mut self, base: Recti) {
        self.stack.clear();
        self.stack.push(ClipRect { rect: base, offset: vec2(0, 0) });
    }
}
