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

use super::control_color;

#[derive(Clone, Debug)]
/// Horizontal slider holding a ratio in `[0, 1]`. The whole track is clickable.
pub struct Slider {
    /// Pointer is over the slider.
    pub hot: bool,
    /// Slider is being dragged.
    pub active: bool,
    /// Current value.
    pub value: f32,
    /// Part of the track drawn filled, as a ratio of its width.
    pub fill: f32,
    /// Diameter of the grip.
    pub grip_size: i32,
}

impl Slider {
    /// Creates a slider at zero.
    pub fn new(grip_size: i32) -> Self { Self { hot: false, active: false, value: 0.0, fill: 0.0, grip_size } }
}

impl Control for Slider {
    fn handle(&mut self, ctx: &mut WidgetCtx<'_>, control: &ControlState) -> ResourceState {
        self.hot = control.is_hot();
        self.active = control.is_active();
        let mut res = ResourceState::NONE;
        let bounds = ctx.bounds();
        if self.active && ctx.input().mouse_is_down() && bounds.width > 0 {
            let v = clamp01((ctx.input().mouse_pos().x - bounds.x) as f32 / bounds.width as f32);
            if v != self.value {
                self.value = v;
                res |= ResourceState::CHANGE;
            }
            res |= ResourceState::ACTIVE;
        }
        self.fill = self.value;
        res
    }

    fn render(&self, ctx: &WidgetCtx<'_>, draw: &mut CommandQueue) -> Result<()> {
        let style = ctx.style();
        let r = ctx.bounds();
        let track_h = (r.height / 3).max(1);
        let track = rect(r.x, r.y + (r.height - track_h) / 2, r.width, track_h);
        draw.push(Command::Rect { rect: track, color: style.track })?;
        draw.push(Command::Rect { rect: rect(track.x, track.y, (self.fill * track.width as f32) as i32, track.height), color: style.accent })?;
        let radius = self.grip_size / 2;
        let x = r.x + (self.value * r.width as f32) as i32;
        let center = vec2(x.clamp(r.x + radius, (r.x + r.width - radius).max(r.x + radius)), r.y + r.height / 2);
        draw.push(Command::Circle { center, radius, color: control_color(style, self.hot, self.active) })
    }
}
