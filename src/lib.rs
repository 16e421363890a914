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
#![deny(missing_docs)]
//! `softui` is a retained widget-tree GUI toolkit that renders through a software rasterizer.
//!
//! The toolkit keeps a tree of widgets (containers, buttons, checkboxes, sliders and text boxes) inside a
//! handle-based pool, updates their interaction state from a polled input event stream once per frame, and
//! emits a platform agnostic stream of draw commands. The commands are replayed by a [`Canvas`] against any
//! [`Renderer`]; [`SoftwareRenderer`] paints them into an in-memory ARGB pixel buffer that the platform layer
//! blits to the screen.
//!
//! ```no_run
//! use softui::*;
//!
//! # fn font() -> BitmapFont { unimplemented!() }
//! let renderer = RendererHandle::new(SoftwareRenderer::new(800, 600));
//! let mut ctx = Context::new(renderer.clone(), font());
//!
//! let panel = ctx.create_container(LayoutKind::Vertical, true, 5, ContainerOption::DYNAMIC);
//! let ok = ctx.create_button("OK");
//! ctx.add_widget(panel, ok);
//! ctx.set_root(panel);
//! ctx.set_position(panel, 10, 10);
//!
//! ctx.push_event(Event::MouseMove { x: 20, y: 20 }).unwrap();
//! ctx.update().unwrap();
//! ctx.drain_draw_commands();
//! renderer.scope(|r| {
//!     let _pixels = r.backbuffer().pixels();
//! });
//! ```

use std::{
    cell::RefCell,
    rc::Rc,
};

mod bitmap;
mod canvas;
mod clip;
mod command;
mod context;
mod error;
mod font;
mod geometry;
mod input;
mod layout;
mod pool;
mod queue;
mod raster;
mod scrollbar;
mod style;
mod tree;
mod widgets;

pub use bitmap::*;
pub use canvas::*;
pub use clip::*;
pub use command::*;
pub use context::{Context, Target};
pub use error::*;
pub use font::*;
pub use geometry::*;
pub use input::*;
pub use layout::{LayoutKind, measure_container};
pub use pool::*;
pub use queue::*;
pub use raster::*;
pub use rs_math3d::{Dimensioni, Recti, Vec2i};
pub use scrollbar::{ScrollAxis, ScrollBar};
pub use style::*;
pub use tree::*;
pub use widgets::*;

use bitflags::*;

#[derive(Default, Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "config-toml", derive(serde::Deserialize))]
/// Color stored with 8-bit components, packed as ARGB when written to a pixel buffer.
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Color {
    /// Opaque black used by the default palette.
    pub const BLACK: Color = Color::from_argb(0xFF323031);
    /// Opaque orange used by the default palette.
    pub const ORANGE: Color = Color::from_argb(0xFFF4AC45);
    /// Opaque red used by the default palette.
    pub const RED: Color = Color::from_argb(0xFFFF5154);
    /// Opaque grey used by the default palette.
    pub const GREY: Color = Color::from_argb(0xFF8896AB);
    /// Opaque green used by the default palette.
    pub const GREEN: Color = Color::from_argb(0xFFC4EBC8);
    /// Opaque white.
    pub const WHITE: Color = Color::from_argb(0xFFFFFFFF);
    /// Fully transparent black.
    pub const TRANSPARENT: Color = Color::from_argb(0x00000000);

    /// Unpacks a `0xAARRGGBB` value.
    pub const fn from_argb(argb: u32) -> Self {
        Self {
            a: (argb >> 24) as u8,
            r: (argb >> 16) as u8,
            g: (argb >> 8) as u8,
            b: argb as u8,
        }
    }

    /// Packs the color as `0xAARRGGBB`.
    pub const fn to_argb(self) -> u32 { (self.a as u32) << 24 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32 }

    /// Returns the same color with the alpha channel replaced.
    pub const fn with_alpha(self, a: u8) -> Self { Self { a, ..self } }
}

/// Convenience constructor for [`Color`].
pub fn color(r: u8, g: u8, b: u8, a: u8) -> Color { Color { r, g, b, a } }

/// Backend that executes rasterization primitives. Every primitive receives the active clip rectangle and must
/// not write outside of it.
pub trait Renderer {
    /// Returns the size of the destination pixel buffer.
    fn dimension(&self) -> Dimensioni;
    /// Fills the whole destination with `color`, ignoring clipping.
    fn clear(&mut self, color: Color);
    /// Fills `rect` with a solid color.
    fn fill_rect(&mut self, rect: Recti, clip: Recti, color: Color);
    /// Fills `rect` with anti-aliased corners of the given radius.
    fn fill_rounded_rect(&mut self, rect: Recti, radius: i32, clip: Recti, color: Color);
    /// Fills an anti-aliased circle.
    fn fill_circle(&mut self, center: Vec2i, radius: i32, clip: Recti, color: Color);
    /// Copies `src` from `bitmap` into `dst` with nearest-neighbor scaling. When `tint` is set, the RGB of every
    /// written pixel is replaced by the tint.
    fn blit(&mut self, bitmap: &Bitmap, src: Recti, dst: Recti, clip: Recti, tint: Option<Color>);
}

/// Shared handle to a [`Renderer`]. The platform layer keeps a clone to read the finished frame.
pub struct RendererHandle<R: Renderer> {
    handle: Rc<RefCell<R>>,
}

// derive(Clone) would require R: Clone
impl<R: Renderer> Clone for RendererHandle<R> {
    fn clone(&self) -> Self { Self { handle: self.handle.clone() } }
}

impl<R: Renderer> RendererHandle<R> {
    /// Wraps a renderer so it can be shared between the context and the platform layer.
    pub fn new(renderer: R) -> Self { Self { handle: Rc::new(RefCell::new(renderer)) } }

    /// Executes the provided closure with a shared reference to the renderer.
    pub fn scope<Res, F: FnOnce(&R) -> Res>(&self, f: F) -> Res { f(&self.handle.borrow()) }

    /// Executes the provided closure with a mutable reference to the renderer.
    pub fn scope_mut<Res, F: FnOnce(&mut R) -> Res>(&self, f: F) -> Res { f(&mut self.handle.borrow_mut()) }
}

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
    /// State bits returned by widget handlers to describe the interaction outcome of a frame.
    pub struct ResourceState : u32 {
        /// The widget's value changed.
        const CHANGE = 4;
        /// The widget was submitted (e.g. a button was clicked).
        const SUBMIT = 2;
        /// The widget is currently active.
        const ACTIVE = 1;
        /// No interaction.
        const NONE = 0;
    }
}

impl ResourceState {
    /// Returns `true` if the widget changed its value.
    pub fn is_changed(&self) -> bool { self.intersects(Self::CHANGE) }
    /// Returns `true` if the widget signaled submission.
    pub fn is_submitted(&self) -> bool { self.intersects(Self::SUBMIT) }
    /// Returns `true` if the widget is active.
    pub fn is_active(&self) -> bool { self.intersects(Self::ACTIVE) }
    /// Returns `true` if the state contains no flags.
    pub fn is_none(&self) -> bool { self.bits() == 0 }
}

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
    /// Options that control how a container sizes itself and reacts to input.
    pub struct ContainerOption : u32 {
        /// The container size is derived from its content instead of being fixed by the caller.
        const DYNAMIC = 1;
        /// Content can be scrolled vertically with a scrollbar on the right edge.
        const VSCROLL = 2;
        /// Content can be scrolled horizontally with a scrollbar on the bottom edge.
        const HSCROLL = 4;
        /// Dragging the container body moves it.
        const DRAGGABLE = 8;
        /// Dragging the bottom-right corner grip resizes the container.
        const RESIZABLE = 16;
        /// No special options.
        const NONE = 0;
    }
}

impl ContainerOption {
    /// Returns `true` if the container size follows its content.
    pub fn is_dynamic(&self) -> bool { self.intersects(Self::DYNAMIC) }
    /// Returns `true` if vertical scrolling is enabled.
    pub fn has_vscroll(&self) -> bool { self.intersects(Self::VSCROLL) }
    /// Returns `true` if horizontal scrolling is enabled.
    pub fn has_hscroll(&self) -> bool { self.intersects(Self::HSCROLL) }
    /// Returns `true` if scrolling along either axis is enabled.
    pub fn is_scrollable(&self) -> bool { self.intersects(Self::VSCROLL | Self::HSCROLL) }
    /// Returns `true` if the container can be dragged around.
    pub fn is_draggable(&self) -> bool { self.intersects(Self::DRAGGABLE) }
    /// Returns `true` if the container can be resized.
    pub fn is_resizable(&self) -> bool { self.intersects(Self::RESIZABLE) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_argb_roundtrip_matches_palette() {
        let c = Color::ORANGE;
        assert_eq!((c.a, c.r, c.g, c.b), (0xFF, 0xF4, 0xAC, 0x45));
        assert_eq!(c.to_argb(), 0xFFF4AC45);
        assert_eq!(color(1, 2, 3, 4).with_alpha(9).a, 9);
    }

    #[test]
    fn container_option_queries() {
        let opt = ContainerOption::VSCROLL | ContainerOption::DRAGGABLE;
        assert!(opt.has_vscroll());
        assert!(opt.is_scrollable());
        assert!(opt.is_draggable());
        assert!(!opt.is_dynamic());
        assert!(!opt.has_hscroll());
    }
}
