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
//! Recoverable error conditions.
//!
//! Misuse of the widget tree (stale handles, wrong widget kinds, attaching to a non-container) is a programming
//! error and panics instead of surfacing here.

use thiserror::Error;

/// Result alias used by every fallible operation of the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by the toolkit.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A bounded queue refused an item because it reached its capacity.
    #[error("{queue} queue is full (capacity {capacity})")]
    QueueFull {
        /// Name of the queue that overflowed.
        queue: &'static str,
        /// Capacity of that queue.
        capacity: usize,
    },

    /// Pixel data uses a depth other than 32 bits per pixel.
    #[error("unsupported bitmap depth: {bits_per_pixel} bits per pixel")]
    UnsupportedBitmap {
        /// Depth found in the asset.
        bits_per_pixel: u32,
    },

    /// Pixel data does not match its declared dimensions.
    #[error("invalid bitmap: {0}")]
    InvalidBitmap(String),

    /// An image could not be decoded.
    #[error("image decode failed: {0}")]
    Decode(String),

    /// A font could not be loaded or rasterized.
    #[error("font error: {0}")]
    Font(String),

    /// A configuration document could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(String),
}
