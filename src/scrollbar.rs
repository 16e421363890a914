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
use rs_math3d::{Dimensioni, Recti, Vec2i};

use crate::rect;

/// Scrolling axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ScrollAxis {
    /// Left to right, scrollbar on the bottom edge.
    Horizontal,
    /// Top to bottom, scrollbar on the right edge.
    Vertical,
}

impl ScrollAxis {
    /// Both axes, in the index order of [`ScrollAxis::index`].
    pub const ALL: [ScrollAxis; 2] = [ScrollAxis::Horizontal, ScrollAxis::Vertical];

    /// Index of the axis in per-axis arrays.
    pub fn index(self) -> usize {
        match self {
            Self::Horizontal => 0,
            Self::Vertical => 1,
        }
    }

    /// Component of `v` along the axis.
    pub fn pick(self, v: Vec2i) -> i32 {
        match self {
            Self::Horizontal => v.x,
            Self::Vertical => v.y,
        }
    }

    /// Extent of `d` along the axis.
    pub fn extent(self, d: Dimensioni) -> i32 {
        match self {
            Self::Horizontal => d.width,
            Self::Vertical => d.height,
        }
    }

    fn len(self, r: Recti) -> i32 {
        match self {
            Self::Horizontal => r.width,
            Self::Vertical => r.height,
        }
    }
}

/// Scrollbar state of one axis of a container. Rectangles are relative to the container origin.
#[derive(Copy, Clone, Debug, Default)]
pub struct ScrollBar {
    /// Scroll position in `[0, 1]`.
    pub ratio: f32,
    /// Draggable grip.
    pub grip: Recti,
    /// Strip the grip travels in.
    pub track: Recti,
    /// The grip is being dragged.
    pub grabbed: bool,
}

impl ScrollBar {
    /// Pixels the grip can travel.
    pub fn travel(&self, axis: ScrollAxis) -> i32 { (axis.len(self.track) - axis.len(self.grip)).max(0) }
}

pub(crate) fn scrollbar_track(axis: ScrollAxis, viewport: Dimensioni, scrollbar_size: i32) -> Recti {
    match axis {
        ScrollAxis::Vertical => rect(viewport.width, 0, scrollbar_size, viewport.height),
        ScrollAxis::Horizontal => rect(0, viewport.height, viewport.width, scrollbar_size),
    }
}

pub(crate) fn scrollbar_max_scroll(content_len: i32, view_len: i32) -> i32 { (content_len - view_len).max(0) }

/// Pixel offset of the content for a scroll ratio.
pub(crate) fn scroll_offset(ratio: f32, content_len: i32, view_len: i32) -> i32 { (ratio * scrollbar_max_scroll(content_len, view_len) as f32).round() as i32 }

pub(crate) fn scrollbar_grip(axis: ScrollAxis, track: Recti, view_len: i32, content_len: i32, ratio: f32, min_grip: i32) -> Recti {
    let track_len = axis.len(track);
    let mut grip_len = if content_len > view_len && content_len > 0 {
        (track_len as i64 * view_len as i64 / content_len as i64) as i32
    } else {
        track_len
    };
    grip_len = grip_len.max(min_grip).min(track_len).max(0);
    let offset = (ratio * (track_len - grip_len) as f32).round() as i32;
    let mut grip = track;
    match axis {
        ScrollAxis::Vertical => {
            grip.y += offset;
            grip.height = grip_len;
        }
        ScrollAxis::Horizontal => {
            grip.x += offset;
            grip.width = grip_len;
        }
    }
    grip
}

/// Ratio change produced by dragging a grip by `delta` pixels.
pub(crate) fn scrollbar_drag_delta(axis: ScrollAxis, delta: Vec2i, bar: &ScrollBar) -> f32 {
    let travel = bar.travel(axis);
    if travel <= 0 {
        return 0.0;
    }
    axis.pick(delta) as f32 / travel as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{dim, rect_eq, vec2};

    #[test]
    fn grip_is_proportional_and_travels_with_ratio() {
        let track = scrollbar_track(ScrollAxis::Vertical, dim(100, 200), 10);
        assert!(rect_eq(track, rect(100, 0, 10, 200)));
        let grip = scrollbar_grip(ScrollAxis::Vertical, track, 200, 500, 0.0, 10);
        assert!(rect_eq(grip, rect(100, 0, 10, 80)));
        let grip = scrollbar_grip(ScrollAxis::Vertical, track, 200, 500, 1.0, 10);
        assert!(rect_eq(grip, rect(100, 120, 10, 80)));
    }

    #[test]
    fn grip_is_clamped() {
        let track = scrollbar_track(ScrollAxis::Horizontal, dim(100, 50), 10);
        assert_eq!(scrollbar_grip(ScrollAxis::Horizontal, track, 100, 100_000, 0.0, 10).width, 10);
        assert_eq!(scrollbar_grip(ScrollAxis::Horizontal, track, 100, 50, 0.5, 10).width, 100);
    }

    #[test]
    fn drag_delta_normalized_by_travel() {
        let track = scrollbar_track(ScrollAxis::Vertical, dim(100, 200), 10);
        let bar = ScrollBar { ratio: 0.0, grip: scrollbar_grip(ScrollAxis::Vertical, track, 200, 500, 0.0, 10), track, grabbed: true };
        assert_eq!(bar.travel(ScrollAxis::Vertical), 120);
        assert_eq!(scrollbar_drag_delta(ScrollAxis::Vertical, vec2(40, 60), &bar), 0.5);
        assert_eq!(scroll_offset(0.5, 500, 200), 150);
        assert_eq!(scroll_offset(1.0, 100, 200), 0);
    }
}
