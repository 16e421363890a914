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
use rs_math3d::{Dimensioni, Recti};

use crate::*;

use super::control_color;

#[derive(Clone, Debug)]
/// Labelled two-state toggle. Only the square is clickable.
pub struct Checkbox {
    /// Text displayed right of the square.
    pub label: String,
    /// Measured size of the label.
    pub label_size: Dimensioni,
    /// Side of the square.
    pub box_size: i32,
    /// Pointer is over the square.
    pub hot: bool,
    /// Square is held down.
    pub active: bool,
    /// Current state.
    pub checked: bool,
}

impl Checkbox {
    /// Creates an unchecked checkbox.
    pub fn new(label: impl Into<String>, label_size: Dimensioni, box_size: i32) -> Self {
        Self { label: label.into(), label_size, box_size, hot: false, active: false, checked: false }
    }

    /// Size of the square plus its label.
    pub fn measure(&self, style: &Style) -> Dimensioni {
        dim(self.box_size + style.checkbox_spacing + self.label_size.width, self.box_size.max(self.label_size.height))
    }

    fn box_rect(&self, bounds: Recti) -> Recti { rect(bounds.x, bounds.y + (bounds.height - self.box_size) / 2, self.box_size, self.box_size) }
}

impl Control for Checkbox {
    fn hit_rect(&self, bounds: Recti) -> Recti { self.box_rect(bounds) }

    fn handle(&mut self, ctx: &mut WidgetCtx<'_>, control: &ControlState) -> ResourceState {
        self.hot = control.is_hot();
        self.active = control.is_active();
        let held = self.active && !ctx.input().mouse_down();
        if self.hot && held && ctx.input().mouse_up() {
            self.checked = !self.checked;
            return ResourceState::CHANGE;
        }
        if self.active { ResourceState::ACTIVE } else { ResourceState::NONE }
    }

    fn render(&self, ctx: &WidgetCtx<'_>, draw: &mut CommandQueue) -> Result<()> {
        let style = ctx.style();
        let bounds = ctx.bounds();
        let square = self.box_rect(bounds);
        draw.push(Command::RoundedRect { rect: square, radius: style.corner_radius, color: control_color(style, self.hot, self.active) })?;
        if self.checked {
            draw.push(Command::Rect { rect: expand_rect(square, -3), color: style.accent })?;
        }
        let pos = vec2(square.x + square.width + style.checkbox_spacing, bounds.y + (bounds.height - self.label_size.height) / 2);
        draw.push(Command::Text { pos, text: self.label.clone(), color: style.text })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::tests::Harness;

    #[test]
    fn toggles_on_release_edge() {
        let mut h = Harness::new();
        let mut cb = Checkbox::new("opt", dim(18, 9), 12);
        let state = ControlState { hot: Some(Part::Body), active: Some(Part::Body), focused: false };
        h.events(&[Event::MouseDown]);
        assert!(cb.handle(&mut h.ctx(rect(0, 0, 34, 12)), &state).is_active());
        assert!(!cb.checked);
        h.events(&[Event::MouseUp]);
        assert!(cb.handle(&mut h.ctx(rect(0, 0, 34, 12)), &state).is_changed());
        assert!(cb.checked);
        h.events(&[]);
        cb.handle(&mut h.ctx(rect(0, 0, 34, 12)), &ControlState { hot: Some(Part::Body), ..Default::default() });
        assert!(cb.checked);
    }

    #[test]
    fn click_within_one_frame_does_not_toggle() {
        let mut h = Harness::new();
        let mut cb = Checkbox::new("opt", dim(18, 9), 12);
        let state = ControlState { hot: Some(Part::Body), active: Some(Part::Body), focused: false };
        h.events(&[Event::MouseDown, Event::MouseUp]);
        assert!(!cb.handle(&mut h.ctx(rect(0, 0, 34, 12)), &state).is_changed());
        assert!(!cb.checked);
    }

    #[test]
    fn hit_rect_is_the_square() {
        let cb = Checkbox::new("opt", dim(18, 9), 12);
        assert!(rect_eq(cb.hit_rect(rect(5, 5, 34, 16)), rect(5, 7, 12, 12)));
        assert!(dim_eq(cb.measure(&Style::default()), dim(34, 12)));
    }

    #[test]
    fn checked_box_draws_mark() {
        let h = Harness::new();
        let mut cb = Checkbox::new("opt", dim(18, 9), 12);
        cb.checked = true;
        let mut draw = CommandQueue::with_capacity("draw", 8);
        cb.render(&h.ctx(rect(0, 0, 34, 12)), &mut draw).unwrap();
        assert_eq!(draw.len(), 3);
        assert!(draw.drain().any(|c| matches!(c, Command::Rect { rect: r, .. } if rect_eq(r, rect(3, 3, 6, 6)))));
    }
}
