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
//! Widget records stored in the tree and the per-kind interaction logic.
//!
//! Every widget shares a header ([`Widget`]) holding its tree links, size and local position; the payload
//! ([`WidgetKind`]) is a closed sum over the supported kinds. Leaf kinds implement [`Control`], which the
//! context drives once per frame: `handle` applies the frame's input and returns a [`ResourceState`], `render`
//! appends draw commands.

mod button;
mod checkbox;
mod container;
mod slider;
mod textbox;

pub use button::*;
pub use checkbox::*;
pub use container::*;
pub use slider::*;
pub use textbox::*;

use rs_math3d::{Dimensioni, Recti, Vec2i};

use crate::{BitmapFont, CommandQueue, Handle, Input, ResourceState, Result, ScrollAxis, Style, rect, vec2};

/// Tree links of a widget. Root widgets have no parent and are chained through `prev`/`next`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Links {
    /// Owning container.
    pub parent: Option<Handle>,
    /// First child (containers only).
    pub first_child: Option<Handle>,
    /// Last child (containers only).
    pub last_child: Option<Handle>,
    /// Next sibling.
    pub next: Option<Handle>,
    /// Previous sibling.
    pub prev: Option<Handle>,
}

/// Pooled widget record.
#[derive(Clone, Debug)]
pub struct Widget {
    /// Handle of this record in the pool.
    pub handle: Handle,
    /// Tree links.
    pub links: Links,
    /// Kind specific payload.
    pub kind: WidgetKind,
    /// Size in pixels.
    pub size: Dimensioni,
    /// Position relative to the parent's content origin.
    pub position: Vec2i,
}

impl Widget {
    /// Returns `true` for containers.
    pub fn is_container(&self) -> bool { matches!(self.kind, WidgetKind::Container(_)) }

    /// Rectangle relative to the parent's content origin.
    pub fn local_rect(&self) -> Recti { rect(self.position.x, self.position.y, self.size.width, self.size.height) }

    /// Offset applied to the children of this widget (the scroll offset of containers).
    pub fn content_offset(&self) -> Vec2i {
        match &self.kind {
            WidgetKind::Container(c) => c.offset,
            _ => vec2(0, 0),
        }
    }
}

/// Kind specific widget payload.
#[derive(Clone, Debug)]
pub enum WidgetKind {
    /// Layout node owning children.
    Container(Container),
    /// Push button.
    Button(Button),
    /// Two state toggle.
    Checkbox(Checkbox),
    /// Horizontal value picker.
    Slider(Slider),
    /// Multi-line text editor.
    Textbox(Textbox),
}

impl WidgetKind {
    /// Short name of the kind, used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Container(_) => "container",
            Self::Button(_) => "button",
            Self::Checkbox(_) => "checkbox",
            Self::Slider(_) => "slider",
            Self::Textbox(_) => "textbox",
        }
    }

    /// The interaction logic of the payload.
    pub fn control(&self) -> &dyn Control {
        match self {
            Self::Container(c) => c,
            Self::Button(b) => b,
            Self::Checkbox(c) => c,
            Self::Slider(s) => s,
            Self::Textbox(t) => t,
        }
    }

    /// The interaction logic of the payload, mutably.
    pub fn control_mut(&mut self) -> &mut dyn Control {
        match self {
            Self::Container(c) => c,
            Self::Button(b) => b,
            Self::Checkbox(c) => c,
            Self::Slider(s) => s,
            Self::Textbox(t) => t,
        }
    }

    /// Returns `true` while the widget owns an interaction.
    pub fn is_active(&self) -> bool {
        match self {
            Self::Container(c) => c.active,
            Self::Button(b) => b.active,
            Self::Checkbox(c) => c.active,
            Self::Slider(s) => s.active,
            Self::Textbox(t) => t.active,
        }
    }

    /// Drops the active flag after the owning interaction ended.
    pub fn clear_active(&mut self) {
        match self {
            Self::Container(c) => {
                c.active = false;
                c.grab = false;
                for bar in c.scroll.iter_mut() {
                    bar.grabbed = false;
                }
            }
            Self::Button(b) => b.active = false,
            Self::Checkbox(c) => c.active = false,
            Self::Slider(s) => s.active = false,
            Self::Textbox(t) => t.active = false,
        }
    }
}

/// Area of a widget that can be hit by the pointer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Part {
    /// The widget's hit rectangle.
    Body,
    /// A scrollbar grip of a container.
    Scrollbar(ScrollAxis),
    /// The resize grip of a container.
    ResizeGrip,
}

/// Interaction state the context hands to a widget for one frame.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ControlState {
    /// Part under the pointer, if the widget is the topmost hit.
    pub hot: Option<Part>,
    /// Part owning the in-progress interaction, if the widget is the active one.
    pub active: Option<Part>,
    /// The widget has keyboard focus.
    pub focused: bool,
}

impl ControlState {
    /// Returns `true` if any part of the widget is under the pointer.
    pub fn is_hot(&self) -> bool { self.hot.is_some() }

    /// Returns `true` if the widget owns the current interaction.
    pub fn is_active(&self) -> bool { self.active.is_some() }
}

/// Per-frame view handed to [`Control`] implementations.
pub struct WidgetCtx<'a> {
    input: &'a Input,
    style: &'a Style,
    font: &'a BitmapFont,
    bounds: Recti,
    position: Vec2i,
    size: Dimensioni,
}

impl<'a> WidgetCtx<'a> {
    pub(crate) fn new(input: &'a Input, style: &'a Style, font: &'a BitmapFont, bounds: Recti, position: Vec2i, size: Dimensioni) -> Self {
        Self { input, style, font, bounds, position, size }
    }

    /// Frame input.
    pub fn input(&self) -> &Input { self.input }

    /// Active style.
    pub fn style(&self) -> &Style { self.style }

    /// Active font.
    pub fn font(&self) -> &BitmapFont { self.font }

    /// Absolute rectangle of the widget.
    pub fn bounds(&self) -> Recti { self.bounds }

    /// Local position; written back to the widget after `handle`.
    pub fn position(&self) -> Vec2i { self.position }

    /// Size; written back to the widget after `handle`.
    pub fn size(&self) -> Dimensioni { self.size }

    /// Moves the widget by `delta`.
    pub fn move_by(&mut self, delta: Vec2i) {
        self.position.x += delta.x;
        self.position.y += delta.y;
        self.bounds.x += delta.x;
        self.bounds.y += delta.y;
    }

    /// Resizes the widget.
    pub fn resize_to(&mut self, size: Dimensioni) {
        self.size = size;
        self.bounds.width = size.width;
        self.bounds.height = size.height;
    }
}

/// Interaction and drawing logic of a widget kind.
pub trait Control {
    /// Rectangle tested against the pointer, given the widget's absolute bounds.
    fn hit_rect(&self, bounds: Recti) -> Recti { bounds }
    /// Applies the frame's input and returns what happened.
    fn handle(&mut self, ctx: &mut WidgetCtx<'_>, control: &ControlState) -> ResourceState;
    /// Appends the widget's draw commands.
    fn render(&self, ctx: &WidgetCtx<'_>, draw: &mut CommandQueue) -> Result<()>;
}

/// Picks the fill color of a control from its interaction flags.
pub(crate) fn control_color(style: &Style, hot: bool, active: bool) -> crate::Color {
    if active {
        style.control_active
    } else if hot {
        style.control_hot
    } else {
        style.control
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::{Event, dim, font::tests::test_font, rect_eq, vec2_eq};

    pub(crate) struct Harness {
        pub input: Input,
        pub style: Style,
        pub font: BitmapFont,
    }

    impl Harness {
        pub fn new() -> Self { Self { input: Input::default(), style: Style::default(), font: test_font() } }

        pub fn events(&mut self, events: &[Event]) {
            self.input.epilogue();
            for e in events {
                self.input.apply(*e);
            }
            self.input.prelude();
        }

        pub fn ctx(&self, bounds: Recti) -> WidgetCtx<'_> {
            WidgetCtx::new(&self.input, &self.style, &self.font, bounds, vec2(bounds.x, bounds.y), dim(bounds.width, bounds.height))
        }
    }

    #[test]
    fn ctx_move_and_resize_track_bounds() {
        let h = Harness::new();
        let mut ctx = h.ctx(rect(10, 10, 20, 20));
        ctx.move_by(vec2(5, -2));
        ctx.resize_to(dim(40, 30));
        assert!(vec2_eq(ctx.position(), vec2(15, 8)));
        assert!(rect_eq(ctx.bounds(), rect(15, 8, 40, 30)));
    }

    #[test]
    fn control_color_prefers_active() {
        let style = Style::default();
        assert_eq!(control_color(&style, true, true), style.control_active);
        assert_eq!(control_color(&style, true, false), style.control_hot);
        assert_eq!(control_color(&style, false, false), style.control);
    }
}
