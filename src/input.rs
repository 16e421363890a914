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
//! Input events fed by the platform layer and the per-frame input state derived from them.

use rs_math3d::Vec2i;

use crate::{Handle, vec2};

/// Virtual key.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Backspace.
    Backspace,
    /// Forward delete.
    Delete,
    /// Return/Enter.
    Return,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Home.
    Home,
    /// End.
    End,
    /// Tab.
    Tab,
    /// Escape.
    Escape,
    /// Any other key, identified by the platform's virtual key code.
    Other(u32),
}

/// Input event pushed by the platform layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Pointer moved to `(x, y)` in backbuffer coordinates.
    MouseMove {
        /// Horizontal position.
        x: i32,
        /// Vertical position.
        y: i32,
    },
    /// Primary button went down.
    MouseDown,
    /// Primary button went up.
    MouseUp,
    /// A key was pressed.
    KeyDown(Key),
    /// A key was released.
    KeyUp(Key),
    /// A character was typed.
    Char(char),
}

/// Keyboard input relevant to text editing, kept in arrival order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum KeyInput {
    /// A printable character was typed.
    Char(char),
    /// A key was pressed, auto-repeat included.
    Key(Key),
}

/// Event synthesized by [`crate::Context::update`] for the application.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum UiEvent {
    /// A button was clicked.
    ButtonClicked(Handle),
    /// A checkbox changed state.
    CheckboxToggled {
        /// The checkbox.
        widget: Handle,
        /// Its new state.
        checked: bool,
    },
    /// A slider value changed.
    SliderChanged {
        /// The slider.
        widget: Handle,
        /// Its new value in `[0, 1]`.
        value: f32,
    },
    /// A container scrolled.
    ScrollChanged {
        /// The container.
        widget: Handle,
        /// Scroll ratios (horizontal, vertical) in `[0, 1]`.
        ratio: [f32; 2],
    },
    /// Keyboard focus moved.
    FocusChanged {
        /// Previously focused widget.
        from: Option<Handle>,
        /// Newly focused widget.
        to: Option<Handle>,
    },
    /// A textbox was edited.
    TextChanged(Handle),
}

/// Mouse and keyboard state for the current frame.
#[derive(Default, Clone, Debug)]
pub struct Input {
    mouse_pos: Vec2i,
    last_mouse_pos: Vec2i,
    mouse_delta: Vec2i,
    mouse_is_down: bool,
    mouse_down: bool,
    mouse_up: bool,
    keys_down: Vec<Key>,
    key_input: Vec<KeyInput>,
}

impl Input {
    /// Applies one event.
    pub fn apply(&mut self, event: Event) {
        match event {
            Event::MouseMove { x, y } => self.mouse_pos = vec2(x, y),
            Event::MouseDown => {
                if !self.mouse_is_down {
                    self.mouse_down = true;
                }
                self.mouse_is_down = true;
            }
            Event::MouseUp => {
                if self.mouse_is_down {
                    self.mouse_up = true;
                }
                self.mouse_is_down = false;
            }
            Event::KeyDown(key) => {
                if !self.keys_down.contains(&key) {
                    self.keys_down.push(key);
                }
                self.key_input.push(KeyInput::Key(key));
            }
            Event::KeyUp(key) => self.keys_down.retain(|k| *k != key),
            Event::Char(ch) => {
                if !ch.is_control() {
                    self.key_input.push(KeyInput::Char(ch))
                }
            }
        }
    }

    /// Pointer position.
    pub fn mouse_pos(&self) -> Vec2i { self.mouse_pos }

    /// Pointer position at the end of the previous frame.
    pub fn last_mouse_pos(&self) -> Vec2i { self.last_mouse_pos }

    /// Pointer movement since the previous frame.
    pub fn mouse_delta(&self) -> Vec2i { self.mouse_delta }

    /// `true` while the primary button is held.
    pub fn mouse_is_down(&self) -> bool { self.mouse_is_down }

    /// `true` on the frame the primary button went down.
    pub fn mouse_down(&self) -> bool { self.mouse_down }

    /// `true` on the frame the primary button went up.
    pub fn mouse_up(&self) -> bool { self.mouse_up }

    /// `true` while `key` is held.
    pub fn key_is_down(&self, key: Key) -> bool { self.keys_down.contains(&key) }

    /// Characters typed and keys pressed this frame, interleaved in arrival order.
    pub fn key_input(&self) -> &[KeyInput] { &self.key_input }

    pub(crate) fn prelude(&mut self) {
        self.mouse_delta.x = self.mouse_pos.x - self.last_mouse_pos.x;
        self.mouse_delta.y = self.mouse_pos.y - self.last_mouse_pos.y;
    }

    pub(crate) fn epilogue(&mut self) {
        self.key_input.clear();
        self.mouse_down = false;
        self.mouse_up = false;
        self.last_mouse_pos = self.mouse_pos;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vec2_eq;

    #[test]
    fn mouse_edges_last_one_frame() {
        let mut input = Input::default();
        input.apply(Event::MouseMove { x: 5, y: 7 });
        input.apply(Event::MouseDown);
        input.prelude();
        assert!(input.mouse_down());
        assert!(input.mouse_is_down());
        assert!(vec2_eq(input.mouse_delta(), vec2(5, 7)));
        input.epilogue();
        assert!(!input.mouse_down());
        assert!(input.mouse_is_down());
        input.apply(Event::MouseUp);
        input.prelude();
        assert!(input.mouse_up());
        assert!(vec2_eq(input.mouse_delta(), vec2(0, 0)));
    }

    #[test]
    fn key_input_keeps_arrival_order() {
        let mut input = Input::default();
        input.apply(Event::KeyDown(Key::Left));
        input.apply(Event::Char('x'));
        input.apply(Event::KeyDown(Key::Left));
        input.apply(Event::Char('\u{8}'));
        assert_eq!(input.key_input(), &[KeyInput::Key(Key::Left), KeyInput::Char('x'), KeyInput::Key(Key::Left)]);
        assert!(input.key_is_down(Key::Left));
        input.apply(Event::KeyUp(Key::Left));
        input.epilogue();
        assert!(!input.key_is_down(Key::Left));
        assert!(input.key_input().is_empty());
    }
}
