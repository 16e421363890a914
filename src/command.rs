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
use std::rc::Rc;

use rs_math3d::{Recti, Vec2i};

use crate::{Bitmap, BoundedQueue, Color};

/// Bounded FIFO of draw commands produced by one frame.
pub type CommandQueue = BoundedQueue<Command>;

/// Deferred rasterization operation produced by the render pass.
///
/// Commands are plain values; bitmap payloads are shared so cloning a command never copies pixels.
#[derive(Clone, Debug)]
pub enum Command {
    /// Fill the whole destination, ignoring the clip stack.
    Clear {
        /// Fill color.
        color: Color,
    },
    /// Push a clip rectangle, intersected with the current one.
    BeginClip {
        /// Requested clip in screen space.
        rect: Recti,
    },
    /// Pop the clip rectangle pushed by the matching [`Command::BeginClip`].
    EndClip,
    /// Solid rectangle.
    Rect {
        /// Destination in screen space.
        rect: Recti,
        /// Fill color.
        color: Color,
    },
    /// Rectangle with anti-aliased rounded corners.
    RoundedRect {
        /// Destination in screen space.
        rect: Recti,
        /// Corner radius in pixels.
        radius: i32,
        /// Fill color.
        color: Color,
    },
    /// Anti-aliased filled circle.
    Circle {
        /// Center in screen space.
        center: Vec2i,
        /// Radius in pixels.
        radius: i32,
        /// Fill color.
        color: Color,
    },
    /// Scaled copy of a bitmap region.
    Bitmap {
        /// Source image.
        bitmap: Rc<Bitmap>,
        /// Region of the source image.
        src: Recti,
        /// Destination in screen space.
        dst: Recti,
    },
    /// Text drawn with the context font at the style's font height.
    Text {
        /// Top-left corner of the first glyph.
        pos: Vec2i,
        /// Text to draw.
        text: String,
        /// Glyph color.
        color: Color,
    },
}
