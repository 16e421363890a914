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
#[cfg(feature = "config-toml")]
use serde::Deserialize;

use crate::Color;
#[cfg(feature = "config-toml")]
use crate::{Error, Result};

/// Collection of visual constants that drive widget appearance.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "config-toml", derive(Deserialize), serde(default))]
pub struct Style {
    /// Pixel height text is drawn at.
    pub font_height: i32,
    /// Padding between a button's frame and its label.
    pub button_padding: i32,
    /// Side of the checkbox square.
    pub checkbox_size: i32,
    /// Gap between the checkbox square and its label.
    pub checkbox_spacing: i32,
    /// Default slider width.
    pub slider_width: i32,
    /// Default slider height.
    pub slider_height: i32,
    /// Diameter of the slider grip.
    pub slider_grip: i32,
    /// Thickness of scrollbars.
    pub scrollbar_size: i32,
    /// Shortest scrollbar grip.
    pub min_grip: i32,
    /// Side of the resize grip in the bottom-right corner of resizable containers.
    pub resize_grip: i32,
    /// Corner radius of rounded frames.
    pub corner_radius: i32,
    /// Default textbox width.
    pub textbox_width: i32,
    /// Default textbox height.
    pub textbox_height: i32,
    /// Margin between a textbox frame and its text.
    pub textbox_margin: i32,
    /// Color the backbuffer is cleared to.
    pub background: Color,
    /// Container body.
    pub panel: Color,
    /// Text on widgets.
    pub text: Color,
    /// Idle button, checkbox square and scrollbar grip.
    pub control: Color,
    /// Hovered control.
    pub control_hot: Color,
    /// Pressed or dragged control.
    pub control_active: Color,
    /// Slider and scrollbar tracks.
    pub track: Color,
    /// Checkbox mark and slider fill.
    pub accent: Color,
    /// Textbox body.
    pub field: Color,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            font_height: 9,
            button_padding: 4,
            checkbox_size: 12,
            checkbox_spacing: 4,
            slider_width: 200,
            slider_height: 12,
            slider_grip: 12,
            scrollbar_size: 10,
            min_grip: 10,
            resize_grip: 8,
            corner_radius: 3,
            textbox_width: 160,
            textbox_height: 60,
            textbox_margin: 4,
            background: Color::BLACK,
            panel: Color::GREY,
            text: Color::BLACK,
            control: Color::ORANGE,
            control_hot: Color::GREEN,
            control_active: Color::RED,
            track: Color::BLACK,
            accent: Color::RED,
            field: Color::WHITE,
        }
    }
}

/// Settings fixed when a [`crate::Context`] is created.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "config-toml", derive(Deserialize), serde(default))]
pub struct Config {
    /// Maximum number of input events queued between two updates.
    pub event_queue_capacity: usize,
    /// Maximum number of draw commands produced by one frame.
    pub draw_queue_capacity: usize,
    /// Widget slots allocated up front.
    pub initial_pool_capacity: usize,
    /// Visual constants.
    pub style: Style,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            event_queue_capacity: 128,
            draw_queue_capacity: 4096,
            initial_pool_capacity: 16,
            style: Style::default(),
        }
    }
}

impl Config {
    /// Parses a TOML document. Missing keys keep their default value.
    #[cfg(feature = "config-toml")]
    pub fn from_toml_str(source: &str) -> Result<Self> { toml::from_str(source).map_err(|e| Error::Config(e.to_string())) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_palette() {
        let style = Style::default();
        assert_eq!(style.font_height, 9);
        assert_eq!(style.background.to_argb(), 0xFF323031);
        assert_eq!(style.control.to_argb(), 0xFFF4AC45);
        let config = Config::default();
        assert_eq!(config.event_queue_capacity, 128);
        assert_eq!(config.style, style);
    }

    #[cfg(feature = "config-toml")]
    #[test]
    fn toml_overrides_keep_defaults() {
        let config = Config::from_toml_str("draw_queue_capacity = 64\n[style]\nfont_height = 12\n").unwrap();
        assert_eq!(config.draw_queue_capacity, 64);
        assert_eq!(config.event_queue_capacity, 128);
        assert_eq!(config.style.font_height, 12);
        assert_eq!(config.style.corner_radius, 3);
        assert!(matches!(Config::from_toml_str("event_queue_capacity = \"x\""), Err(Error::Config(_))));
    }
}
