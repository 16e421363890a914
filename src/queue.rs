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
use std::collections::VecDeque;

use crate::{Error, Result};

/// FIFO with a hard capacity. Pushing into a full queue is reported, never dropped silently.
#[derive(Debug, Clone)]
pub struct BoundedQueue<T> {
    name: &'static str,
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> BoundedQueue<T> {
    /// Creates an empty queue. `name` identifies the queue in [`Error::QueueFull`].
    pub fn with_capacity(name: &'static str, capacity: usize) -> Self {
        Self { name, items: VecDeque::with_capacity(capacity), capacity }
    }

    /// Appends `item` at the back.
    pub fn push(&mut self, item: T) -> Result<()> {
        if self.is_full() {
            tracing::warn!(queue = self.name, capacity = self.capacity, "queue full");
            return Err(Error::QueueFull { queue: self.name, capacity: self.capacity });
        }
        self.items.push_back(item);
        Ok(())
    }

    /// Removes the oldest item.
    pub fn pull(&mut self) -> Option<T> { self.items.pop_front() }

    /// Removes every item in arrival order.
    pub fn drain(&mut self) -> impl Iterator<Item = T> + '_ { self.items.drain(..) }

    /// Number of queued items.
    pub fn len(&self) -> usize { self.items.len() }

    /// Returns `true` if nothing is queued.
    pub fn is_empty(&self) -> bool { self.items.is_empty() }

    /// Returns `true` if the next push would fail.
    pub fn is_full(&self) -> bool { self.items.len() >= self.capacity }

    /// Maximum number of queued items.
    pub fn capacity(&self) -> usize { self.capacity }

    /// Drops every queued item.
    pub fn clear(&mut self) { self.items.clear() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifo_order() {
        let mut q = BoundedQueue::with_capacity("test", 4);
        for i in 0..3 {
            q.push(i).unwrap();
        }
        assert_eq!(q.pull(), Some(0));
        q.push(3).unwrap();
        assert_eq!(q.drain().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert!(q.is_empty());
    }

    #[test]
    fn overflow_is_reported() {
        let mut q = BoundedQueue::with_capacity("event", 2);
        q.push(1).unwrap();
        q.push(2).unwrap();
        assert!(q.is_full());
        assert_eq!(q.push(3), Err(Error::QueueFull { queue: "event", capacity: 2 }));
        assert_eq!(q.len(), 2);
        q.clear();
        assert!(q.push(3).is_ok());
    }
}
