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
use crate::*;

#[derive(Clone, Debug)]
/// Multi-line plain text editor. Receives keyboard input while focused.
pub struct Textbox {
    /// Cursor as `(column, row)`.
    pub cursor: (usize, usize),
    /// Text, one character buffer per line. Never empty.
    pub lines: Vec<Vec<char>>,
    /// Gap between the frame and the text.
    pub margin: i32,
    /// Pointer is over the textbox.
    pub hot: bool,
    /// Textbox is being clicked.
    pub active: bool,
    /// Textbox owns keyboard focus.
    pub focused: bool,
}

impl Textbox {
    /// Creates an empty textbox.
    pub fn new(margin: i32) -> Self { Self { cursor: (0, 0), lines: vec![Vec::new()], margin, hot: false, active: false, focused: false } }

    /// Content with lines joined by `'\n'`.
    pub fn text(&self) -> String {
        let lines: Vec<String> = self.lines.iter().map(|l| l.iter().collect()).collect();
        lines.join("\n")
    }

    /// Replaces the content and moves the cursor to its end.
    pub fn set_text(&mut self, text: &str) {
        self.lines = text.split('\n').map(|l| l.chars().collect()).collect();
        let row = self.lines.len() - 1;
        self.cursor = (self.lines[row].len(), row);
    }

    fn insert(&mut self, ch: char) {
        let (col, row) = self.cursor;
        self.lines[row].insert(col, ch);
        self.cursor.0 += 1;
    }

    fn split_line(&mut self) {
        let (col, row) = self.cursor;
        let tail = self.lines[row].split_off(col);
        self.lines.insert(row + 1, tail);
        self.cursor = (0, row + 1);
    }

    fn backspace(&mut self) -> bool {
        let (col, row) = self.cursor;
        if col > 0 {
            self.lines[row].remove(col - 1);
            self.cursor.0 -= 1;
        } else if row > 0 {
            let line = self.lines.remove(row);
            let prev = &mut self.lines[row - 1];
            self.cursor = (prev.len(), row - 1);
            prev.extend(line);
        } else {
            return false;
        }
        true
    }

    fn delete(&mut self) -> bool {
        let (col, row) = self.cursor;
        if col < self.lines[row].len() {
            self.lines[row].remove(col);
        } else if row + 1 < self.lines.len() {
            let next = self.lines.remove(row + 1);
            self.lines[row].extend(next);
        } else {
            return false;
        }
        true
    }

    fn move_row(&mut self, row: usize) {
        let row = row.min(self.lines.len() - 1);
        self.cursor = (self.cursor.0.min(self.lines[row].len()), row);
    }

    /// Applies one key press. Returns `true` if the text changed.
    pub fn key(&mut self, key: Key) -> bool {
        let (col, row) = self.cursor;
        match key {
            Key::Return => {
                self.split_line();
                return true;
            }
            Key::Backspace => return self.backspace(),
            Key::Delete => return self.delete(),
            Key::Left if col > 0 => self.cursor.0 -= 1,
            Key::Left if row > 0 => self.cursor = (self.lines[row - 1].len(), row - 1),
            Key::Right if col < self.lines[row].len() => self.cursor.0 += 1,
            Key::Right if row + 1 < self.lines.len() => self.cursor = (0, row + 1),
            Key::Up if row > 0 => self.move_row(row - 1),
            Key::Down => self.move_row(row + 1),
            Key::Home => self.cursor.0 = 0,
            Key::End => self.cursor.0 = self.lines[row].len(),
            _ => {}
        }
        false
    }

    fn line_height(style: &Style) -> i32 { style.font_height + 1 }
}

impl Control for Textbox {
    fn handle(&mut self, ctx: &mut WidgetCtx<'_>, control: &ControlState) -> ResourceState {
        self.hot = control.is_hot();
        self.active = control.is_active();
        self.focused = control.focused;
        let input = ctx.input();
        let mut res = ResourceState::NONE;

        if self.hot && input.mouse_down() {
            let b = ctx.bounds();
            let advance = ctx.font().advance(ctx.style().font_height).max(1);
            let row = ((input.mouse_pos().y - b.y - self.margin) / Self::line_height(ctx.style())).max(0) as usize;
            self.move_row(row);
            let col = ((input.mouse_pos().x - b.x - self.margin + advance / 2) / advance).max(0) as usize;
            self.cursor.0 = col.min(self.lines[self.cursor.1].len());
        }

        if !self.focused {
            return res;
        }
        for item in input.key_input() {
            let changed = match *item {
                KeyInput::Char(ch) => {
                    self.insert(ch);
                    true
                }
                KeyInput::Key(key) => self.key(key),
            };
            if changed {
                res |= ResourceState::CHANGE;
            }
        }
        res
    }

    fn render(&self, ctx: &WidgetCtx<'_>, draw: &mut CommandQueue) -> Result<()> {
        let style = ctx.style();
        let r = ctx.bounds();
        let frame = if self.focused { style.control_active } else if self.hot { style.control_hot } else { style.control };
        draw.push(Command::Rect { rect: r, color: frame })?;
        draw.push(Command::Rect { rect: expand_rect(r, -1), color: style.field })?;

        let lh = Self::line_height(style);
        draw.push(Command::BeginClip { rect: expand_rect(r, -1) })?;
        for (row, line) in self.lines.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            let pos = vec2(r.x + self.margin, r.y + self.margin + row as i32 * lh);
            draw.push(Command::Text { pos, text: line.iter().collect(), color: style.text })?;
        }
        if self.focused {
            let advance = ctx.font().advance(style.font_height);
            let (col, row) = self.cursor;
            let bar = rect(r.x + self.margin + col as i32 * advance, r.y + self.margin + row as i32 * lh, 1, style.font_height);
            draw.push(Command::Rect { rect: bar, color: style.accent })?;
        }
        draw.push(Command::EndClip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::tests::Harness;

    #[test]
    fn editing_keys() {
        let mut tb = Textbox::new(4);
        tb.set_text("ab");
        assert!(tb.key(Key::Return));
        for ch in "cd".chars() {
            tb.insert(ch);
        }
        assert_eq!(tb.text(), "ab\ncd");
        assert_eq!(tb.cursor, (2, 1));

        tb.key(Key::Home);
        assert!(tb.key(Key::Backspace));
        assert_eq!(tb.text(), "abcd");
        assert_eq!(tb.cursor, (2, 0));

        tb.key(Key::End);
        assert!(!tb.key(Key::Delete));
        tb.key(Key::Left);
        assert!(tb.key(Key::Delete));
        assert_eq!(tb.text(), "abc");
    }

    #[test]
    fn vertical_moves_clamp_column() {
        let mut tb = Textbox::new(4);
        tb.set_text("a\nlonger");
        assert_eq!(tb.cursor, (6, 1));
        tb.key(Key::Up);
        assert_eq!(tb.cursor, (1, 0));
        tb.key(Key::Up);
        assert_eq!(tb.cursor, (1, 0));
        tb.key(Key::Down);
        tb.key(Key::Down);
        assert_eq!(tb.cursor, (1, 1));
        tb.key(Key::Right);
        tb.key(Key::Left);
        tb.key(Key::Home);
        tb.key(Key::Left);
        assert_eq!(tb.cursor, (1, 0));
        assert!(!tb.key(Key::Other(42)));
    }

    #[test]
    fn typing_requires_focus() {
        let mut h = Harness::new();
        let mut tb = Textbox::new(4);
        h.events(&[Event::Char('x')]);
        assert!(tb.handle(&mut h.ctx(rect(0, 0, 100, 40)), &ControlState::default()).is_none());
        assert_eq!(tb.text(), "");

        let focused = ControlState { focused: true, ..Default::default() };
        h.events(&[Event::Char('h'), Event::Char('i'), Event::KeyDown(Key::Return)]);
        assert!(tb.handle(&mut h.ctx(rect(0, 0, 100, 40)), &focused).is_changed());
        assert_eq!(tb.text(), "hi\n");
        assert_eq!(tb.cursor, (0, 1));
    }

    #[test]
    fn chars_and_keys_apply_in_arrival_order() {
        let mut h = Harness::new();
        let mut tb = Textbox::new(4);
        let focused = ControlState { focused: true, ..Default::default() };
        h.events(&[Event::Char('a'), Event::KeyDown(Key::Return), Event::Char('b'), Event::KeyDown(Key::Left), Event::Char('c')]);
        assert!(tb.handle(&mut h.ctx(rect(0, 0, 100, 40)), &focused).is_changed());
        assert_eq!(tb.text(), "a\ncb");
        assert_eq!(tb.cursor, (1, 1));
    }

    #[test]
    fn click_places_cursor() {
        let mut h = Harness::new();
        let mut tb = Textbox::new(4);
        tb.set_text("hello\nworld");
        // advance is 6 at height 9, line height 10
        h.events(&[Event::MouseMove { x: 4 + 13, y: 4 + 12 }, Event::MouseDown]);
        let state = ControlState { hot: Some(Part::Body), active: Some(Part::Body), focused: true };
        tb.handle(&mut h.ctx(rect(0, 0, 100, 40)), &state);
        assert_eq!(tb.cursor, (2, 1));
    }
}
