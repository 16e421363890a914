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
//! Integer rectangle helpers. Every rectangle is half-open: a rect covers `x..x + width` and `y..y + height`.

use rs_math3d::{Dimensioni, Recti, Vec2i};

/// Convenience constructor for [`Vec2i`].
pub fn vec2(x: i32, y: i32) -> Vec2i { Vec2i { x, y } }

/// Convenience constructor for [`Recti`].
pub fn rect(x: i32, y: i32, w: i32, h: i32) -> Recti { Recti { x, y, width: w, height: h } }

/// Convenience constructor for [`Dimensioni`].
pub fn dim(width: i32, height: i32) -> Dimensioni { Dimensioni { width, height } }

/// Field-wise equality of two rectangles.
pub fn rect_eq(a: Recti, b: Recti) -> bool { a.x == b.x && a.y == b.y && a.width == b.width && a.height == b.height }

/// Field-wise equality of two vectors.
pub fn vec2_eq(a: Vec2i, b: Vec2i) -> bool { a.x == b.x && a.y == b.y }

/// Field-wise equality of two dimensions.
pub fn dim_eq(a: Dimensioni, b: Dimensioni) -> bool { a.width == b.width && a.height == b.height }

/// Expands (or shrinks) a rectangle uniformly on all sides.
pub fn expand_rect(r: Recti, n: i32) -> Recti { rect(r.x - n, r.y - n, r.width + n * 2, r.height + n * 2) }

/// Moves a rectangle by `offset`.
pub fn offset_rect(r: Recti, offset: Vec2i) -> Recti { rect(r.x + offset.x, r.y + offset.y, r.width, r.height) }

/// Returns `true` if `p` lies inside `r`.
pub fn point_inside(p: Vec2i, r: Recti) -> bool { p.x >= r.x && p.x < r.x + r.width && p.y >= r.y && p.y < r.y + r.height }

/// Returns `true` if `r` covers no pixel.
pub fn is_empty(r: Recti) -> bool { r.width <= 0 || r.height <= 0 }

/// Returns `true` if every pixel of `inner` also belongs to `outer`. Empty rectangles are contained everywhere.
pub fn contains_rect(outer: Recti, inner: Recti) -> bool {
    is_empty(inner)
        || (inner.x >= outer.x && inner.y >= outer.y && inner.x + inner.width <= outer.x + outer.width && inner.y + inner.height <= outer.y + outer.height)
}

/// Intersects `r` with `clip`. A disjoint pair collapses to a zero-size rectangle placed inside `clip`, so the
/// result is always contained by `clip`.
pub fn clip_rect(clip: Recti, r: Recti) -> Recti {
    let cx1 = clip.x + clip.width.max(0);
    let cy1 = clip.y + clip.height.max(0);
    let x0 = r.x.max(clip.x).min(cx1);
    let y0 = r.y.max(clip.y).min(cy1);
    let x1 = (r.x + r.width).min(cx1).max(x0);
    let y1 = (r.y + r.height).min(cy1).max(y0);
    rect(x0, y0, x1 - x0, y1 - y0)
}

/// Smallest rectangle covering both inputs. Empty rectangles are ignored.
pub fn union_rect(a: Recti, b: Recti) -> Recti {
    if is_empty(a) {
        return b;
    }
    if is_empty(b) {
        return a;
    }
    let x0 = a.x.min(b.x);
    let y0 = a.y.min(b.y);
    let x1 = (a.x + a.width).max(b.x + b.width);
    let y1 = (a.y + a.height).max(b.y + b.height);
    rect(x0, y0, x1 - x0, y1 - y0)
}

/// Euclidean length of `(dx, dy)`.
pub fn length(dx: f32, dy: f32) -> f32 { (dx * dx + dy * dy).sqrt() }

/// Clamps `v` to `[0, 1]`.
pub fn clamp01(v: f32) -> f32 { v.clamp(0.0, 1.0) }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_inside_is_half_open() {
        let r = rect(10, 10, 5, 5);
        assert!(point_inside(vec2(10, 10), r));
        assert!(point_inside(vec2(14, 14), r));
        assert!(!point_inside(vec2(15, 10), r));
        assert!(!point_inside(vec2(10, 15), r));
        assert!(!point_inside(vec2(9, 12), r));
    }

    #[test]
    fn clip_rect_intersects() {
        let r = clip_rect(rect(0, 0, 800, 600), rect(-20, -20, 50, 50));
        assert_eq!((r.x, r.y, r.width, r.height), (0, 0, 30, 30));
    }

    #[test]
    fn clip_rect_disjoint_is_empty_inside_clip() {
        let clip = rect(0, 0, 10, 10);
        let r = clip_rect(clip, rect(50, -30, 5, 5));
        assert!(is_empty(r));
        assert!(contains_rect(clip, r));
        assert!(r.x >= 0 && r.x <= 10 && r.y >= 0 && r.y <= 10);
    }

    #[test]
    fn union_ignores_empty() {
        let a = rect(5, 5, 10, 10);
        let u = union_rect(a, rect(100, 100, 0, 0));
        assert_eq!((u.x, u.y, u.width, u.height), (5, 5, 10, 10));
        let u = union_rect(a, rect(0, 20, 3, 3));
        assert_eq!((u.x, u.y, u.width, u.height), (0, 5, 15, 18));
    }

    #[test]
    fn field_wise_equality() {
        assert!(rect_eq(rect(1, 2, 3, 4), rect(1, 2, 3, 4)));
        assert!(!rect_eq(rect(1, 2, 3, 4), rect(1, 2, 3, 5)));
        assert!(vec2_eq(vec2(-1, 7), vec2(-1, 7)));
        assert!(!vec2_eq(vec2(-1, 7), vec2(7, -1)));
        assert!(dim_eq(dim(3, 4), dim(3, 4)));
        assert!(!dim_eq(dim(3, 4), dim(4, 3)));
    }

    #[test]
    fn expand_and_offset() {
        let r = expand_rect(rect(2, 2, 4, 4), 1);
        assert_eq!((r.x, r.y, r.width, r.height), (1, 1, 6, 6));
        let r = offset_rect(r, vec2(3, -1));
        assert_eq!((r.x, r.y), (4, 0));
    }
}
