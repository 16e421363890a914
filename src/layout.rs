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
//! Container sizing and child placement.
//!
//! Sizes propagate bottom-up: a container measures its children, and a dynamic container takes the measured
//! size as its own, which may in turn resize every ancestor. Positions are assigned top-down afterwards.
//! Scrolling never rewrites child positions; it moves the container's content offset, which
//! [`Tree::absolute_position`] adds for every descendant.

use rs_math3d::{Dimensioni, Recti};

use crate::scrollbar::{scroll_offset, scrollbar_grip, scrollbar_track};
use crate::*;

/// How a container positions its children.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum LayoutKind {
    /// Children keep the positions they were given.
    #[default]
    None,
    /// Children are stacked top to bottom.
    Vertical,
    /// Children are stacked left to right.
    Horizontal,
}

/// Size of the content made of `children` (local rectangles) for the given layout.
///
/// Vertical: width = widest child + 2 × padding, height = Σ heights + padding × (count + 1). Horizontal is the
/// transpose. [`LayoutKind::None`] returns the bounding box of the children plus padding on the far sides.
pub fn measure_container<I: IntoIterator<Item = Recti>>(children: I, layout: LayoutKind, padding: i32) -> Dimensioni {
    let mut count = 0;
    let (mut sum_w, mut sum_h, mut max_w, mut max_h, mut far_x, mut far_y) = (0, 0, 0, 0, 0, 0);
    for r in children {
        count += 1;
        sum_w += r.width;
        sum_h += r.height;
        max_w = max_w.max(r.width);
        max_h = max_h.max(r.height);
        far_x = far_x.max(r.x + r.width);
        far_y = far_y.max(r.y + r.height);
    }
    match layout {
        LayoutKind::Vertical => dim(max_w + padding * 2, sum_h + padding * (count + 1)),
        LayoutKind::Horizontal => dim(sum_w + padding * (count + 1), max_h + padding * 2),
        LayoutKind::None => dim(far_x + padding, far_y + padding),
    }
}

/// Recomputes content, size, viewport and scrollbar geometry of container `h` from its children.
pub(crate) fn update_container_size(tree: &mut Tree, style: &Style, h: Handle) {
    let children: Vec<Recti> = tree.children(h).map(|c| tree.node(c).local_rect()).collect();
    let Widget { kind, size, .. } = tree.node_mut(h);
    let WidgetKind::Container(c) = kind else { return };

    c.content = measure_container(children, c.layout, c.padding);
    let strip_v = if c.options.has_vscroll() { style.scrollbar_size } else { 0 };
    let strip_h = if c.options.has_hscroll() { style.scrollbar_size } else { 0 };
    if c.options.is_dynamic() {
        *size = dim(c.content.width + strip_v, c.content.height + strip_h);
    }
    c.viewport = dim((size.width - strip_v).max(0), (size.height - strip_h).max(0));

    let mut offset = vec2(0, 0);
    for axis in ScrollAxis::ALL {
        if !c.scrolls(axis) {
            continue;
        }
        let view_len = axis.extent(c.viewport);
        let content_len = axis.extent(c.content);
        let bar = &mut c.scroll[axis.index()];
        bar.track = scrollbar_track(axis, c.viewport, style.scrollbar_size);
        bar.grip = scrollbar_grip(axis, bar.track, view_len, content_len, bar.ratio, style.min_grip);
        let o = -scroll_offset(bar.ratio, content_len, view_len);
        match axis {
            ScrollAxis::Horizontal => offset.x = o,
            ScrollAxis::Vertical => offset.y = o,
        }
    }
    c.offset = offset;
}

/// Stacks the children of container `h` along its layout axis.
pub(crate) fn place_children(tree: &mut Tree, h: Handle) {
    let (layout, padding) = match &tree.node(h).kind {
        WidgetKind::Container(c) => (c.layout, c.padding),
        _ => return,
    };
    if layout == LayoutKind::None {
        return;
    }
    let children: Vec<Handle> = tree.children(h).collect();
    let mut cursor = padding;
    for child in children {
        let w = tree.node_mut(child);
        match layout {
            LayoutKind::Vertical => {
                w.position = vec2(padding, cursor);
                cursor += w.size.height + padding;
            }
            LayoutKind::Horizontal => {
                w.position = vec2(cursor, padding);
                cursor += w.size.width + padding;
            }
            LayoutKind::None => {}
        }
    }
}

/// Re-derives layout after `widget` changed: sizes from its container up through every ancestor, then
/// positions top-down from its root.
pub(crate) fn relayout(tree: &mut Tree, style: &Style, widget: Handle) {
    let w = tree.node(widget);
    let mut cur = if w.is_container() { Some(widget) } else { w.links.parent };
    while let Some(c) = cur {
        update_container_size(tree, style, c);
        cur = tree.node(c).links.parent;
    }
    let root = tree.root_of(widget);
    let containers: Vec<Handle> = tree.traverse_from(root, Direction::BackToFront).pre_order().collect();
    for c in containers {
        place_children(tree, c);
    }
}

/// Full layout pass over the tree below `root`.
pub(crate) fn relayout_root(tree: &mut Tree, style: &Style, root: Handle) {
    let post: Vec<Handle> = tree.traverse_from(root, Direction::BackToFront).post_order().collect();
    for h in post {
        if tree.node(h).is_container() {
            place_children(tree, h);
            update_container_size(tree, style, h);
        }
    }
}
