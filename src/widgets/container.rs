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

use crate::scrollbar::scrollbar_drag_delta;
use crate::*;

use super::control_color;

#[derive(Clone, Debug)]
/// Widget owning children, laid out along an axis or placed freely.
pub struct Container {
    /// How children are positioned.
    pub layout: LayoutKind,
    /// Gap around and between children.
    pub padding: i32,
    /// Sizing and interaction options.
    pub options: ContainerOption,
    /// Draws the container body when set. Children are drawn either way.
    pub visible: bool,
    /// Area available to children: the size minus the scrollbar strips.
    pub viewport: Dimensioni,
    /// Total size of the children including padding.
    pub content: Dimensioni,
    /// Per-axis scrollbars, indexed by [`ScrollAxis::index`].
    pub scroll: [ScrollBar; 2],
    /// Offset applied to the children, derived from the scroll ratios.
    pub offset: Vec2i,
    /// The body is being dragged.
    pub grab: bool,
    /// Pointer is over the container or one of its parts.
    pub hot: bool,
    /// Container owns the current interaction.
    pub active: bool,
}

impl Container {
    /// Creates an empty container.
    pub fn new(layout: LayoutKind, visible: bool, padding: i32, options: ContainerOption) -> Self {
        Self {
            layout,
            padding,
            options,
            visible,
            viewport: Dimensioni::default(),
            content: Dimensioni::default(),
            scroll: [ScrollBar::default(); 2],
            offset: Vec2i::default(),
            grab: false,
            hot: false,
            active: false,
        }
    }

    /// Returns `true` if scrolling along `axis` is enabled.
    pub fn scrolls(&self, axis: ScrollAxis) -> bool {
        match axis {
            ScrollAxis::Horizontal => self.options.has_hscroll(),
            ScrollAxis::Vertical => self.options.has_vscroll(),
        }
    }

    /// Scrollbar of `axis`.
    pub fn scrollbar(&self, axis: ScrollAxis) -> &ScrollBar { &self.scroll[axis.index()] }

    /// Absolute rectangle children are clipped to.
    pub fn viewport_rect(&self, bounds: Recti) -> Recti { rect(bounds.x, bounds.y, self.viewport.width, self.viewport.height) }

    /// Absolute rectangle of the resize grip.
    pub fn resize_grip_rect(&self, bounds: Recti, style: &Style) -> Recti {
        let g = style.resize_grip;
        rect(bounds.x + bounds.width - g, bounds.y + bounds.height - g, g, g)
    }

    /// Part of the container's chrome under `p`, tested before the children.
    pub fn hit_part(&self, bounds: Recti, style: &Style, p: Vec2i) -> Option<Part> {
        if self.options.is_resizable() && !self.options.is_dynamic() && point_inside(p, self.resize_grip_rect(bounds, style)) {
            return Some(Part::ResizeGrip);
        }
        let origin = vec2(bounds.x, bounds.y);
        ScrollAxis::ALL
            .into_iter()
            .filter(|axis| self.scrolls(*axis))
            .find(|axis| point_inside(p, offset_rect(self.scroll[axis.index()].grip, origin)))
            .map(Part::Scrollbar)
    }

    /// Draws scrollbars and the resize grip on top of the children.
    pub fn render_overlay(&self, ctx: &WidgetCtx<'_>, draw: &mut CommandQueue) -> Result<()> {
        let style = ctx.style();
        let bounds = ctx.bounds();
        let origin = vec2(bounds.x, bounds.y);
        for axis in ScrollAxis::ALL {
            if !self.scrolls(axis) {
                continue;
            }
            let bar = &self.scroll[axis.index()];
            draw.push(Command::Rect { rect: offset_rect(bar.track, origin), color: style.track })?;
            let radius = style.corner_radius.min(style.scrollbar_size / 2);
            draw.push(Command::RoundedRect { rect: offset_rect(bar.grip, origin), radius, color: control_color(style, self.hot, bar.grabbed) })?;
        }
        if self.options.is_resizable() && !self.options.is_dynamic() {
            draw.push(Command::Rect { rect: self.resize_grip_rect(bounds, style), color: control_color(style, self.hot, self.active) })?;
        }
        Ok(())
    }
}

impl Control for Container {
    fn handle(&mut self, ctx: &mut WidgetCtx<'_>, control: &ControlState) -> ResourceState {
        self.hot = control.is_hot();
        self.active = control.is_active();
        let mut res = ResourceState::NONE;
        let input = ctx.input();
        // deltas only count once the grab survived a frame
        let dragging = self.active && input.mouse_is_down() && !input.mouse_down();
        let delta = input.mouse_delta();

        for axis in ScrollAxis::ALL {
            let bar = &mut self.scroll[axis.index()];
            bar.grabbed = control.active == Some(Part::Scrollbar(axis));
            if bar.grabbed && dragging {
                let ratio = clamp01(bar.ratio + scrollbar_drag_delta(axis, delta, bar));
                if ratio != bar.ratio {
                    bar.ratio = ratio;
                    res |= ResourceState::CHANGE;
                }
            }
        }

        self.grab = control.active == Some(Part::Body) && self.options.is_draggable();
        if self.grab && dragging && (delta.x != 0 || delta.y != 0) {
            ctx.move_by(delta);
            res |= ResourceState::ACTIVE;
        }

        if control.active == Some(Part::ResizeGrip) && dragging && (delta.x != 0 || delta.y != 0) {
            let min = (self.padding * 2).max(1);
            let size = ctx.size();
            ctx.resize_to(dim((size.width + delta.x).max(min), (size.height + delta.y).max(min)));
            res |= ResourceState::ACTIVE;
        }
        res
    }

    fn render(&self, ctx: &WidgetCtx<'_>, draw: &mut CommandQueue) -> Result<()> {
        let bounds = ctx.bounds();
        if self.visible {
            draw.push(Command::Rect { rect: bounds, color: ctx.style().panel })?;
        }
        draw.push(Command::BeginClip { rect: self.viewport_rect(bounds) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::tests::Harness;

    fn scrolling() -> Container {
        let mut c = Container::new(LayoutKind::Vertical, true, 0, ContainerOption::VSCROLL);
        c.viewport = dim(100, 200);
        c.content = dim(100, 500);
        let track = rect(100, 0, 10, 200);
        c.scroll[1] = ScrollBar { ratio: 0.0, grip: rect(100, 0, 10, 80), track, grabbed: false };
        c
    }

    #[test]
    fn grip_drag_is_clamped() {
        let mut h = Harness::new();
        let mut c = scrolling();
        let grab = ControlState { hot: Some(Part::Scrollbar(ScrollAxis::Vertical)), active: Some(Part::Scrollbar(ScrollAxis::Vertical)), focused: false };

        h.events(&[Event::MouseMove { x: 105, y: 10 }, Event::MouseDown]);
        c.handle(&mut h.ctx(rect(0, 0, 110, 200)), &grab);
        assert_eq!(c.scroll[1].ratio, 0.0);
        assert!(c.scroll[1].grabbed);

        h.events(&[Event::MouseMove { x: 105, y: 70 }]);
        assert!(c.handle(&mut h.ctx(rect(0, 0, 110, 200)), &grab).is_changed());
        assert_eq!(c.scroll[1].ratio, 0.5);

        h.events(&[Event::MouseMove { x: 105, y: 5000 }]);
        c.handle(&mut h.ctx(rect(0, 0, 110, 200)), &grab);
        assert_eq!(c.scroll[1].ratio, 1.0);

        h.events(&[Event::MouseMove { x: 105, y: -5000 }]);
        c.handle(&mut h.ctx(rect(0, 0, 110, 200)), &grab);
        assert_eq!(c.scroll[1].ratio, 0.0);
    }

    #[test]
    fn body_drag_moves_unclamped() {
        let mut h = Harness::new();
        let mut c = Container::new(LayoutKind::None, true, 2, ContainerOption::DRAGGABLE);
        let grab = ControlState { hot: Some(Part::Body), active: Some(Part::Body), focused: false };
        h.events(&[Event::MouseMove { x: 5, y: 5 }, Event::MouseDown]);
        let mut ctx = h.ctx(rect(0, 0, 50, 50));
        c.handle(&mut ctx, &grab);
        assert!(vec2_eq(ctx.position(), vec2(0, 0)));

        h.events(&[Event::MouseMove { x: -45, y: 25 }]);
        let mut ctx = h.ctx(rect(0, 0, 50, 50));
        assert!(c.handle(&mut ctx, &grab).is_active());
        assert!(vec2_eq(ctx.position(), vec2(-50, 20)));
    }

    #[test]
    fn resize_grip_keeps_minimum() {
        let mut h = Harness::new();
        let mut c = Container::new(LayoutKind::Vertical, true, 5, ContainerOption::RESIZABLE);
        let bounds = rect(0, 0, 60, 60);
        assert_eq!(c.hit_part(bounds, &h.style, vec2(58, 58)), Some(Part::ResizeGrip));
        let grab = ControlState { hot: Some(Part::ResizeGrip), active: Some(Part::ResizeGrip), focused: false };
        h.events(&[Event::MouseMove { x: 58, y: 58 }, Event::MouseDown]);
        c.handle(&mut h.ctx(bounds), &grab);
        h.events(&[Event::MouseMove { x: -100, y: 78 }]);
        let mut ctx = h.ctx(bounds);
        c.handle(&mut ctx, &grab);
        assert!(dim_eq(ctx.size(), dim(10, 80)));
    }

    #[test]
    fn hit_part_finds_grip() {
        let h = Harness::new();
        let c = scrolling();
        let bounds = rect(10, 10, 110, 200);
        assert_eq!(c.hit_part(bounds, &h.style, vec2(115, 20)), Some(Part::Scrollbar(ScrollAxis::Vertical)));
        assert_eq!(c.hit_part(bounds, &h.style, vec2(115, 150)), None);
        assert_eq!(c.hit_part(bounds, &h.style, vec2(50, 20)), None);
    }
}
