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
use rs_math3d::Dimensioni;

use crate::*;

use super::control_color;

#[derive(Clone, Debug)]
/// Push button with a text label.
pub struct Button {
    /// Text displayed on the button.
    pub label: String,
    /// Measured size of the label.
    pub label_size: Dimensioni,
    /// Pointer is over the button.
    pub hot: bool,
    /// Button is held down.
    pub active: bool,
    /// Set for the single frame the button was clicked.
    pub pressed: bool,
}

impl Button {
    /// Creates a button whose label measures `label_size`.
    pub fn new(label: impl Into<String>, label_size: Dimensioni) -> Self {
        Self { label: label.into(), label_size, hot: false, active: false, pressed: false }
    }

    /// Size of a button fitting its label.
    pub fn measure(&self, style: &Style) -> Dimensioni {
        dim(self.label_size.width + style.button_padding * 2, self.label_size.height + style.button_padding * 2)
    }
}

impl Control for Button {
    fn handle(&mut self, ctx: &mut WidgetCtx<'_>, control: &ControlState) -> ResourceState {
        self.hot = control.is_hot();
        self.active = control.is_active();
        // the grab must predate this frame's mouse-down edge
        let held = self.active && !ctx.input().mouse_down();
        self.pressed = self.hot && held && ctx.input().mouse_up();
        if self.pressed {
            ResourceState::SUBMIT
        } else if self.active {
            ResourceState::ACTIVE
        } else {
            ResourceState::NONE
        }
    }

    fn render(&self, ctx: &WidgetCtx<'_>, draw: &mut CommandQueue) -> Result<()> {
        let style = ctx.style();
        let r = ctx.bounds();
        draw.push(Command::RoundedRect { rect: r, radius: style.corner_radius, color: control_color(style, self.hot, self.active) })?;
        let pos = vec2(r.x + (r.width - self.label_size.width) / 2, r.y + (r.height - self.label_size.height) / 2);
        draw.push(Command::Text { pos, text: self.label.clone(), color: style.text })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::tests::Harness;

    #[test]
    fn pressed_only_on_release_while_hot_and_active() {
        let mut h = Harness::new();
        let mut button = Button::new("OK", dim(12, 9));
        let hot_active = ControlState { hot: Some(Part::Body), active: Some(Part::Body), focused: false };

        h.events(&[Event::MouseDown]);
        button.handle(&mut h.ctx(rect(0, 0, 20, 17)), &hot_active);
        assert!(!button.pressed);

        h.events(&[Event::MouseUp]);
        let state = button.handle(&mut h.ctx(rect(0, 0, 20, 17)), &hot_active);
        assert!(button.pressed);
        assert!(state.is_submitted());

        h.events(&[]);
        button.handle(&mut h.ctx(rect(0, 0, 20, 17)), &ControlState { hot: Some(Part::Body), ..Default::default() });
        assert!(!button.pressed);
    }

    #[test]
    fn down_and_up_in_one_frame_does_not_press() {
        let mut h = Harness::new();
        let mut button = Button::new("OK", dim(12, 9));
        let hot_active = ControlState { hot: Some(Part::Body), active: Some(Part::Body), focused: false };
        h.events(&[Event::MouseDown, Event::MouseUp]);
        let state = button.handle(&mut h.ctx(rect(0, 0, 20, 17)), &hot_active);
        assert!(!button.pressed);
        assert!(!state.is_submitted());
    }

    #[test]
    fn release_outside_does_not_press() {
        let mut h = Harness::new();
        let mut button = Button::new("OK", dim(12, 9));
        h.events(&[Event::MouseDown]);
        h.events(&[Event::MouseUp]);
        button.handle(&mut h.ctx(rect(0, 0, 20, 17)), &ControlState { active: Some(Part::Body), ..Default::default() });
        assert!(!button.pressed);
    }

    #[test]
    fn renders_frame_then_centered_label() {
        let h = Harness::new();
        let button = Button::new("OK", dim(12, 9));
        let mut draw = CommandQueue::with_capacity("draw", 8);
        button.render(&h.ctx(rect(10, 10, 20, 17)), &mut draw).unwrap();
        let cmds: Vec<_> = draw.drain().collect();
        assert!(matches!(cmds[0], Command::RoundedRect { rect: r, .. } if rect_eq(r, rect(10, 10, 20, 17))));
        assert!(matches!(&cmds[1], Command::Text { pos, text, .. } if vec2_eq(*pos, vec2(14, 14)) && text == "OK"));
    }

    #[test]
    fn measure_adds_padding() {
        let button = Button::new("OK", dim(12, 9));
        assert!(dim_eq(button.measure(&Style::default()), dim(20, 17)));
    }
}
