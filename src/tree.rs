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
//! Parent/child/sibling structure over pooled widgets.
//!
//! Children of a container are a doubly linked sibling chain bracketed by the container's `first_child` and
//! `last_child`. Roots are chained the same way, with the chain ends held by the [`Tree`]. The last root is the
//! topmost one: it is drawn last and hit-tested first.

use rs_math3d::{Dimensioni, Recti, Vec2i};
use tracing::debug;

use crate::*;

/// Order in which a [`Traversal`] visits siblings.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    /// First to last child and first to last root. Drawing order.
    BackToFront,
    /// Last to first child and last to first root. Hit-testing order.
    FrontToBack,
}

/// Whether a [`Step`] enters or leaves a widget.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Visited before the widget's children.
    Enter,
    /// Visited after the widget's children.
    Leave,
}

/// One step of a depth first walk.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Step {
    /// Visited widget.
    pub handle: Handle,
    /// Enter or leave.
    pub phase: Phase,
}

/// Lazy depth first walk yielding every widget twice: once on the way down and once on the way up.
pub struct Traversal<'a> {
    tree: &'a Tree,
    next: Option<Step>,
    scope: Option<Handle>,
    direction: Direction,
}

impl<'a> Traversal<'a> {
    /// Handles in pre-order: parents before their children.
    pub fn pre_order(self) -> impl Iterator<Item = Handle> + 'a { self.filter(|s| s.phase == Phase::Enter).map(|s| s.handle) }

    /// Handles in post-order: children before their parents.
    pub fn post_order(self) -> impl Iterator<Item = Handle> + 'a { self.filter(|s| s.phase == Phase::Leave).map(|s| s.handle) }

    fn first_child(&self, links: &Links) -> Option<Handle> {
        match self.direction {
            Direction::BackToFront => links.first_child,
            Direction::FrontToBack => links.last_child,
        }
    }

    fn sibling(&self, links: &Links) -> Option<Handle> {
        match self.direction {
            Direction::BackToFront => links.next,
            Direction::FrontToBack => links.prev,
        }
    }

    fn advance(&self, step: Step) -> Option<Step> {
        let links = self.tree.get(step.handle)?.links;
        match step.phase {
            Phase::Enter => Some(match self.first_child(&links) {
                Some(child) => Step { handle: child, phase: Phase::Enter },
                None => Step { handle: step.handle, phase: Phase::Leave },
            }),
            Phase::Leave if self.scope == Some(step.handle) => None,
            Phase::Leave => match self.sibling(&links) {
                Some(s) => Some(Step { handle: s, phase: Phase::Enter }),
                None => links.parent.map(|p| Step { handle: p, phase: Phase::Leave }),
            },
        }
    }
}

impl Iterator for Traversal<'_> {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        let step = self.next?;
        self.next = self.advance(step);
        Some(step)
    }
}

/// Widget pool plus the root chain.
pub struct Tree {
    pool: Pool<Widget>,
    first_root: Option<Handle>,
    last_root: Option<Handle>,
}

impl Default for Tree {
    fn default() -> Self { Self::with_capacity(16) }
}

impl Tree {
    /// Creates an empty tree whose pool starts with `capacity` slots.
    pub fn with_capacity(capacity: usize) -> Self { Self { pool: Pool::with_capacity(capacity), first_root: None, last_root: None } }

    /// Number of live widgets.
    pub fn len(&self) -> usize { self.pool.len() }

    /// Returns `true` if the tree holds no widget.
    pub fn is_empty(&self) -> bool { self.pool.is_empty() }

    /// Stores a detached widget and returns its handle.
    pub fn insert(&mut self, kind: WidgetKind, size: Dimensioni) -> Handle {
        let name = kind.name();
        let handle = self.pool.allocate_with(|handle| Widget { handle, links: Links::default(), kind, size, position: Vec2i::default() });
        debug!(?handle, kind = name, "widget created");
        handle
    }

    /// Detaches `widget` and frees it together with its whole subtree. Returns the number of freed widgets.
    #[track_caller]
    pub fn remove(&mut self, widget: Handle) -> usize {
        let subtree: Vec<Handle> = self.traverse_from(widget, Direction::BackToFront).post_order().collect();
        self.detach(widget);
        for h in &subtree {
            self.pool.free(*h);
        }
        debug!(?widget, count = subtree.len(), "subtree destroyed");
        subtree.len()
    }

    /// Frees every widget, attached or not, and empties the root chain. Returns the number of freed widgets.
    pub fn clear(&mut self) -> usize {
        let live: Vec<Handle> = self.pool.handles().collect();
        for h in &live {
            self.pool.free(*h);
        }
        self.first_root = None;
        self.last_root = None;
        live.len()
    }

    /// Returns `true` if `widget` is live.
    pub fn contains(&self, widget: Handle) -> bool { self.pool.contains(widget) }

    /// Looks up a widget.
    pub fn get(&self, widget: Handle) -> Option<&Widget> { self.pool.get(widget) }

    /// Looks up a widget mutably.
    pub fn get_mut(&mut self, widget: Handle) -> Option<&mut Widget> { self.pool.get_mut(widget) }

    /// Looks up a widget that must be live.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or was never issued.
    #[track_caller]
    pub fn node(&self, widget: Handle) -> &Widget {
        match self.pool.get(widget) {
            Some(w) => w,
            None => panic!("invalid widget handle {:?}", widget),
        }
    }

    /// Mutable counterpart of [`Tree::node`].
    #[track_caller]
    pub fn node_mut(&mut self, widget: Handle) -> &mut Widget {
        match self.pool.get_mut(widget) {
            Some(w) => w,
            None => panic!("invalid widget handle {:?}", widget),
        }
    }

    /// Appends `child` to the children of `parent`, detaching it from wherever it was first.
    ///
    /// # Panics
    ///
    /// Panics if `parent` is not a container, or if `child` is `parent` or one of its ancestors.
    #[track_caller]
    pub fn attach(&mut self, parent: Handle, child: Handle) {
        let p = self.node(parent);
        assert!(p.is_container(), "cannot attach to a {} ({:?})", p.kind.name(), parent);
        assert!(parent != child, "cannot attach {:?} to itself", child);
        assert!(self.contains(child), "invalid widget handle {:?}", child);
        assert!(!self.ancestors(parent).any(|a| a == child), "attaching {:?} under {:?} would create a cycle", child, parent);
        self.detach(child);
        self.link_last(Some(parent), child);
    }

    /// Unlinks `widget` from its parent or from the root chain. A detached widget is left untouched.
    #[track_caller]
    pub fn detach(&mut self, widget: Handle) {
        if self.node(widget).links.parent.is_none() && !self.is_root(widget) {
            return;
        }
        self.unlink(widget);
    }

    /// Returns `true` if `widget` is in the root chain.
    pub fn is_root(&self, widget: Handle) -> bool {
        match self.get(widget) {
            Some(w) => w.links.parent.is_none() && (self.first_root == Some(widget) || w.links.prev.is_some()),
            None => false,
        }
    }

    /// Makes `widget` the topmost root, detaching it from its parent if needed.
    #[track_caller]
    pub fn push_root(&mut self, widget: Handle) {
        self.detach(widget);
        self.link_last(None, widget);
        debug!(?widget, "root pushed");
    }

    /// Removes `widget` from the root chain, leaving it alive and detached. Returns `false` for non-roots.
    pub fn remove_root(&mut self, widget: Handle) -> bool {
        if !self.is_root(widget) {
            return false;
        }
        self.unlink(widget);
        debug!(?widget, "root removed");
        true
    }

    /// Moves the root `widget` to the top of the stacking order. Returns `true` if the order changed.
    pub fn raise_root(&mut self, widget: Handle) -> bool {
        if !self.is_root(widget) || self.last_root == Some(widget) {
            return false;
        }
        self.unlink(widget);
        self.link_last(None, widget);
        debug!(?widget, "root raised");
        true
    }

    /// Children of `widget`, first to last.
    pub fn children(&self, widget: Handle) -> impl Iterator<Item = Handle> + '_ {
        let first = self.get(widget).and_then(|w| w.links.first_child);
        std::iter::successors(first, move |h| self.get(*h).and_then(|w| w.links.next))
    }

    /// Roots, bottom to top.
    pub fn roots(&self) -> impl Iterator<Item = Handle> + '_ { std::iter::successors(self.first_root, move |h| self.get(*h).and_then(|w| w.links.next)) }

    /// Parent, grandparent and so on up to the root. Excludes `widget` itself.
    pub fn ancestors(&self, widget: Handle) -> impl Iterator<Item = Handle> + '_ {
        let parent = self.get(widget).and_then(|w| w.links.parent);
        std::iter::successors(parent, move |h| self.get(*h).and_then(|w| w.links.parent))
    }

    /// Topmost ancestor of `widget`, or `widget` itself when it has no parent.
    pub fn root_of(&self, widget: Handle) -> Handle { self.ancestors(widget).last().unwrap_or(widget) }

    /// Position in screen space: local positions summed up to the root, plus the content offset of every
    /// ancestor container.
    #[track_caller]
    pub fn absolute_position(&self, widget: Handle) -> Vec2i {
        let w = self.node(widget);
        let mut pos = w.position;
        let mut cur = w.links.parent;
        while let Some(p) = cur {
            let pw = self.node(p);
            let offset = pw.content_offset();
            pos.x += pw.position.x + offset.x;
            pos.y += pw.position.y + offset.y;
            cur = pw.links.parent;
        }
        pos
    }

    /// Rectangle of `widget` in screen space.
    #[track_caller]
    pub fn absolute_rect(&self, widget: Handle) -> Recti {
        let p = self.absolute_position(widget);
        let s = self.node(widget).size;
        rect(p.x, p.y, s.width, s.height)
    }

    /// Walks every root and its subtree.
    pub fn traverse(&self, direction: Direction) -> Traversal<'_> {
        let start = match direction {
            Direction::BackToFront => self.first_root,
            Direction::FrontToBack => self.last_root,
        };
        Traversal { tree: self, next: start.map(|handle| Step { handle, phase: Phase::Enter }), scope: None, direction }
    }

    /// Walks the subtree below `widget`, `widget` included.
    pub fn traverse_from(&self, widget: Handle, direction: Direction) -> Traversal<'_> {
        let next = self.contains(widget).then_some(Step { handle: widget, phase: Phase::Enter });
        Traversal { tree: self, next, scope: Some(widget), direction }
    }

    fn set_first(&mut self, parent: Option<Handle>, h: Option<Handle>) {
        match parent {
            Some(p) => self.node_mut(p).links.first_child = h,
            None => self.first_root = h,
        }
    }

    fn set_last(&mut self, parent: Option<Handle>, h: Option<Handle>) {
        match parent {
            Some(p) => self.node_mut(p).links.last_child = h,
            None => self.last_root = h,
        }
    }

    fn unlink(&mut self, h: Handle) {
        let links = self.node(h).links;
        match links.prev {
            Some(prev) => self.node_mut(prev).links.next = links.next,
            None => self.set_first(links.parent, links.next),
        }
        match links.next {
            Some(next) => self.node_mut(next).links.prev = links.prev,
            None => self.set_last(links.parent, links.prev),
        }
        let l = &mut self.node_mut(h).links;
        l.parent = None;
        l.prev = None;
        l.next = None;
    }

    fn link_last(&mut self, parent: Option<Handle>, h: Handle) {
        let last = match parent {
            Some(p) => self.node(p).links.last_child,
            None => self.last_root,
        };
        let l = &mut self.node_mut(h).links;
        l.parent = parent;
        l.prev = last;
        l.next = None;
        match last {
            Some(last) => self.node_mut(last).links.next = Some(h),
            None => self.set_first(parent, Some(h)),
        }
        self.set_last(parent, Some(h));
    }
}
