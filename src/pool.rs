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
//! Slot arena addressed by generation-counted handles.
//!
//! Free slots form a singly linked list threaded through the storage itself. Freeing a slot bumps its
//! generation, so a handle kept past [`Pool::free`] resolves to `None` instead of aliasing whatever value
//! recycles the slot. Index 0 is never handed out which keeps [`Handle::NONE`] invalid forever.

use std::fmt;

/// Opaque reference to a value stored in a [`Pool`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct Handle {
    index: u32,
    generation: u32,
}

impl Handle {
    /// The reserved handle that never resolves.
    pub const NONE: Handle = Handle { index: 0, generation: 0 };

    /// Slot index of the handle.
    pub fn index(self) -> u32 { self.index }

    /// Generation the slot had when the handle was issued.
    pub fn generation(self) -> u32 { self.generation }

    /// Returns `true` for [`Handle::NONE`].
    pub fn is_none(self) -> bool { self.index == 0 }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "Handle({}v{})", self.index, self.generation) }
}

enum Slot<T> {
    Reserved,
    Occupied { generation: u32, value: T },
    Free { generation: u32, next_free: Option<u32> },
}

/// Growable arena with stable handles.
pub struct Pool<T> {
    slots: Vec<Slot<T>>,
    capacity: usize,
    free_head: Option<u32>,
    len: usize,
}

impl<T> Default for Pool<T> {
    fn default() -> Self { Self::with_capacity(16) }
}

impl<T> Pool<T> {
    /// Creates a pool able to hold `capacity - 1` values before growing (slot 0 is reserved).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(2);
        let mut slots = Vec::with_capacity(capacity);
        slots.push(Slot::Reserved);
        Self { slots, capacity, free_head: None, len: 0 }
    }

    /// Number of live values.
    pub fn len(&self) -> usize { self.len }

    /// Returns `true` when no value is stored.
    pub fn is_empty(&self) -> bool { self.len == 0 }

    /// Number of slots available before the next growth, the reserved slot included.
    pub fn capacity(&self) -> usize { self.capacity }

    /// Stores `value` and returns its handle.
    pub fn allocate(&mut self, value: T) -> Handle { self.allocate_with(|_| value) }

    /// Stores the value produced by `f`, which receives the handle the value will live under.
    pub fn allocate_with<F: FnOnce(Handle) -> T>(&mut self, f: F) -> Handle {
        match self.free_head {
            Some(index) => {
                let generation = match &self.slots[index as usize] {
                    Slot::Free { generation, next_free } => {
                        self.free_head = *next_free;
                        *generation
                    }
                    _ => unreachable!("free list points at a live slot"),
                };
                let handle = Handle { index, generation };
                self.slots[index as usize] = Slot::Occupied { generation, value: f(handle) };
                self.len += 1;
                handle
            }
            None => {
                if self.slots.len() >= self.capacity {
                    self.grow();
                }
                let handle = Handle { index: self.slots.len() as u32, generation: 1 };
                self.slots.push(Slot::Occupied { generation: handle.generation, value: f(handle) });
                self.len += 1;
                handle
            }
        }
    }

    fn grow(&mut self) {
        let new_capacity = self.capacity * 2;
        tracing::trace!(from = self.capacity, to = new_capacity, "pool grow");
        self.slots.reserve_exact(new_capacity - self.slots.len());
        self.capacity = new_capacity;
    }

    /// Releases the slot behind `handle` and returns its value. Stale handles return `None`.
    pub fn free(&mut self, handle: Handle) -> Option<T> {
        if !self.contains(handle) {
            return None;
        }
        let next = Slot::Free { generation: handle.generation.wrapping_add(1).max(1), next_free: self.free_head };
        let old = std::mem::replace(&mut self.slots[handle.index as usize], next);
        self.free_head = Some(handle.index);
        self.len -= 1;
        match old {
            Slot::Occupied { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Returns `true` if `handle` refers to a live value.
    pub fn contains(&self, handle: Handle) -> bool { self.get(handle).is_some() }

    /// Resolves `handle` to a shared reference.
    pub fn get(&self, handle: Handle) -> Option<&T> {
        match self.slots.get(handle.index as usize) {
            Some(Slot::Occupied { generation, value }) if *generation == handle.generation => Some(value),
            _ => None,
        }
    }

    /// Resolves `handle` to a mutable reference.
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        match self.slots.get_mut(handle.index as usize) {
            Some(Slot::Occupied { generation, value }) if *generation == handle.generation => Some(value),
            _ => None,
        }
    }

    /// Runs `f` on the value behind `handle`.
    pub fn with<Res, F: FnOnce(&T) -> Res>(&self, handle: Handle, f: F) -> Option<Res> { self.get(handle).map(f) }

    /// Runs `f` on the value behind `handle` mutably.
    pub fn with_mut<Res, F: FnOnce(&mut T) -> Res>(&mut self, handle: Handle, f: F) -> Option<Res> { self.get_mut(handle).map(f) }

    /// Iterates over the handles of every live value in slot order.
    pub fn handles(&self) -> impl Iterator<Item = Handle> + '_ {
        self.slots.iter().enumerate().filter_map(|(index, slot)| match slot {
            Slot::Occupied { generation, .. } => Some(Handle { index: index as u32, generation: *generation }),
            _ => None,
        })
    }
}
