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

use rs_math3d::{Recti, Vec2i};
use tracing::{debug, trace, warn};

use crate::layout::{relayout, relayout_root};
use crate::*;

/// Widget part owning the pointer: what is hot, or what is active.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Target {
    /// The widget.
    pub widget: Handle,
    /// The hit part of the widget.
    pub part: Part,
}

/// Toolkit state: the widget tree, the queues and the interaction state.
///
/// One context drives one display. Every frame the platform layer pushes input events with
/// [`Context::push_event`], calls [`Context::update`] and then [`Context::drain_draw_commands`], which paints
/// the frame through the renderer the context was created with.
pub struct Context<R: Renderer> {
    tree: Tree,
    style: Style,
    font: BitmapFont,
    canvas: Canvas<R>,
    events: BoundedQueue<Event>,
    draw: CommandQueue,
    ui_events: VecDeque<UiEvent>,
    input: Input,
    hot: Option<Target>,
    active: Option<Target>,
    focused: Option<Handle>,
    frame: usize,
}

impl<R: Renderer> Context<R> {
    /// Creates a context with the default [`Config`].
    pub fn new(renderer: RendererHandle<R>, font: BitmapFont) -> Self { Self::with_config(renderer, font, Config::default()) }

    /// Creates a context with explicit queue capacities and style.
    pub fn with_config(renderer: RendererHandle<R>, font: BitmapFont, config: Config) -> Self {
        let style = config.style;
        debug!(events = config.event_queue_capacity, draw = config.draw_queue_capacity, pool = config.initial_pool_capacity, "context created");
        Self {
            tree: Tree::with_capacity(config.initial_pool_capacity),
            canvas: Canvas::from(renderer, font.clone(), style.font_height),
            style,
            font,
            events: BoundedQueue::with_capacity("events", config.event_queue_capacity),
            draw: BoundedQueue::with_capacity("draw", config.draw_queue_capacity),
            ui_events: VecDeque::new(),
            input: Input::default(),
            hot: None,
            active: None,
            focused: None,
            frame: 0,
        }
    }

    /// Tears the context down, releasing every widget.
    pub fn terminate(mut self) {
        let freed = self.tree.clear();
        debug!(widgets = freed, frames = self.frame, "context terminated");
    }

    /// Queues one input event for the next [`Context::update`].
    pub fn push_event(&mut self, event: Event) -> Result<()> { self.events.push(event) }

    /// Queues a draw command after the ones produced by the last update.
    pub fn push_draw_command(&mut self, command: Command) -> Result<()> { self.draw.push(command) }

    /// Takes the oldest pending draw command.
    pub fn pull_draw_command(&mut self) -> Option<Command> { self.draw.pull() }

    /// Executes every pending draw command against the renderer.
    pub fn drain_draw_commands(&mut self) {
        self.canvas.begin();
        let mut count = 0;
        while let Some(command) = self.draw.pull() {
            self.canvas.execute(&command);
            count += 1;
        }
        trace!(frame = self.frame, commands = count, "draw commands drained");
    }

    /// Takes the oldest UI event produced by [`Context::update`].
    pub fn poll_ui_event(&mut self) -> Option<UiEvent> { self.ui_events.pop_front() }

    /// Runs one frame: consumes queued input, updates every widget and renders the tree into the draw queue.
    ///
    /// Fails with [`Error::QueueFull`] if the frame produced more draw commands than the draw queue holds. The
    /// input state is advanced either way.
    pub fn update(&mut self) -> Result<()> {
        let mut count = 0;
        while let Some(event) = self.events.pull() {
            self.input.apply(event);
            count += 1;
        }
        self.input.prelude();
        trace!(frame = self.frame, events = count, "update");

        let res = self.process_frame();
        self.input.epilogue();
        self.frame += 1;
        res
    }

    fn process_frame(&mut self) -> Result<()> {
        self.hot = self.hit_test(self.input.mouse_pos());
        if self.input.mouse_down() {
            self.activate();
        }
        self.handle_widgets();
        if self.input.mouse_up() {
            self.release();
        }
        let roots: Vec<Handle> = self.tree.roots().collect();
        for root in roots {
            relayout_root(&mut self.tree, &self.style, root);
        }
        self.render()
    }

    fn screen_rect(&self) -> Recti {
        let d = self.canvas.renderer_handle().scope(|r| r.dimension());
        rect(0, 0, d.width, d.height)
    }

    fn hit_test(&self, p: Vec2i) -> Option<Target> {
        let screen = self.screen_rect();
        let mut clips: Vec<Recti> = Vec::new();
        for step in self.tree.traverse(Direction::FrontToBack) {
            let widget = step.handle;
            let w = self.tree.node(widget);
            let bounds = self.tree.absolute_rect(widget);
            let clip = clips.last().copied().unwrap_or(screen);
            match (&w.kind, step.phase) {
                (WidgetKind::Container(c), Phase::Enter) => {
                    if point_inside(p, clip) {
                        if let Some(part) = c.hit_part(bounds, &self.style, p) {
                            return Some(Target { widget, part });
                        }
                    }
                    clips.push(clip_rect(clip, c.viewport_rect(bounds)));
                }
                (WidgetKind::Container(c), Phase::Leave) => {
                    clips.pop();
                    let clip = clips.last().copied().unwrap_or(screen);
                    if c.visible && point_inside(p, clip_rect(clip, bounds)) {
                        return Some(Target { widget, part: Part::Body });
                    }
                }
                (kind, Phase::Enter) => {
                    if point_inside(p, clip_rect(clip, kind.control().hit_rect(bounds))) {
                        return Some(Target { widget, part: Part::Body });
                    }
                }
                _ => {}
            }
        }
        None
    }

    fn activate(&mut self) {
        self.active = self.hot;
        if let Some(target) = self.hot {
            let root = self.tree.root_of(target.widget);
            self.tree.raise_root(root);
        }
        let focus = self.hot.map(|t| t.widget).filter(|h| matches!(self.tree.node(*h).kind, WidgetKind::Textbox(_)));
        if focus != self.focused {
            debug!(from = ?self.focused, to = ?focus, "focus changed");
            self.ui_events.push_back(UiEvent::FocusChanged { from: self.focused, to: focus });
            self.focused = focus;
        }
    }

    fn release(&mut self) {
        if let Some(target) = self.active.take() {
            if let Some(w) = self.tree.get_mut(target.widget) {
                w.kind.clear_active();
            }
        }
    }

    fn handle_widgets(&mut self) {
        let order: Vec<Handle> = self.tree.traverse(Direction::BackToFront).pre_order().collect();
        for h in order {
            let bounds = self.tree.absolute_rect(h);
            let control = ControlState {
                hot: self.hot.filter(|t| t.widget == h).map(|t| t.part),
                active: self.active.filter(|t| t.widget == h).map(|t| t.part),
                focused: self.focused == Some(h),
            };
            let Widget { kind, position, size, .. } = self.tree.node_mut(h);
            let mut ctx = WidgetCtx::new(&self.input, &self.style, &self.font, bounds, *position, *size);
            let res = kind.control_mut().handle(&mut ctx, &control);
            let moved = !vec2_eq(ctx.position(), *position) || !dim_eq(ctx.size(), *size);
            *position = ctx.position();
            *size = ctx.size();
            let needs_layout = moved || (res.is_changed() && matches!(kind, WidgetKind::Container(_)));
            if let Some(event) = ui_event(h, kind, res) {
                self.ui_events.push_back(event);
            }
            if needs_layout {
                relayout(&mut self.tree, &self.style, h);
            }
        }
    }

    fn render(&mut self) -> Result<()> {
        if !self.draw.is_empty() {
            warn!(pending = self.draw.len(), "discarding undrained draw commands");
            self.draw.clear();
        }
        self.draw.push(Command::Clear { color: self.style.background })?;
        for step in self.tree.traverse(Direction::BackToFront) {
            let w = self.tree.node(step.handle);
            let ctx = WidgetCtx::new(&self.input, &self.style, &self.font, self.tree.absolute_rect(step.handle), w.position, w.size);
            match (&w.kind, step.phase) {
                (WidgetKind::Container(c), Phase::Leave) => {
                    self.draw.push(Command::EndClip)?;
                    c.render_overlay(&ctx, &mut self.draw)?;
                }
                (kind, Phase::Enter) => kind.control().render(&ctx, &mut self.draw)?,
                _ => {}
            }
        }
        trace!(frame = self.frame, commands = self.draw.len(), "frame rendered");
        Ok(())
    }

    fn insert(&mut self, kind: WidgetKind, size: Dimensioni) -> Handle {
        let h = self.tree.insert(kind, size);
        relayout(&mut self.tree, &self.style, h);
        h
    }

    /// Creates a detached container.
    pub fn create_container(&mut self, layout: LayoutKind, visible: bool, padding: i32, options: ContainerOption) -> Handle {
        self.insert(WidgetKind::Container(Container::new(layout, visible, padding, options)), dim(0, 0))
    }

    /// Creates a fixed size container stacking its children vertically, scrolling vertically unless `options`
    /// names a scroll axis.
    pub fn create_scroll_container(&mut self, dimension: Dimensioni, visible: bool, padding: i32, options: ContainerOption) -> Handle {
        let mut options = options - ContainerOption::DYNAMIC;
        if !options.is_scrollable() {
            options |= ContainerOption::VSCROLL;
        }
        self.insert(WidgetKind::Container(Container::new(LayoutKind::Vertical, visible, padding, options)), dimension)
    }

    /// Creates a push button sized to its label.
    pub fn create_button(&mut self, label: &str) -> Handle {
        let button = Button::new(label, self.font.text_size(label, self.style.font_height));
        let size = button.measure(&self.style);
        self.insert(WidgetKind::Button(button), size)
    }

    /// Creates an unchecked checkbox sized to its label.
    pub fn create_checkbox(&mut self, label: &str) -> Handle {
        let checkbox = Checkbox::new(label, self.font.text_size(label, self.style.font_height), self.style.checkbox_size);
        let size = checkbox.measure(&self.style);
        self.insert(WidgetKind::Checkbox(checkbox), size)
    }

    /// Creates a slider of the style's default size.
    pub fn create_slider(&mut self) -> Handle {
        let size = dim(self.style.slider_width, self.style.slider_height);
        self.insert(WidgetKind::Slider(Slider::new(self.style.slider_grip)), size)
    }

    /// Creates an empty textbox of the style's default size.
    pub fn create_textbox(&mut self) -> Handle {
        let size = dim(self.style.textbox_width, self.style.textbox_height);
        self.insert(WidgetKind::Textbox(Textbox::new(self.style.textbox_margin)), size)
    }

    /// Appends `child` to `container` and lays both out again.
    ///
    /// # Panics
    ///
    /// Panics on stale handles, if `container` is not a container, or if the attachment would create a cycle.
    #[track_caller]
    pub fn add_widget(&mut self, container: Handle, child: Handle) {
        let old_parent = self.tree.node(child).links.parent;
        self.tree.attach(container, child);
        if let Some(p) = old_parent {
            relayout(&mut self.tree, &self.style, p);
        }
        relayout(&mut self.tree, &self.style, child);
    }

    /// Makes `widget` a root, on top of every other root.
    #[track_caller]
    pub fn set_root(&mut self, widget: Handle) {
        let old_parent = self.tree.node(widget).links.parent;
        self.tree.push_root(widget);
        if let Some(p) = old_parent {
            relayout(&mut self.tree, &self.style, p);
        }
        relayout(&mut self.tree, &self.style, widget);
    }

    /// Takes the root `widget` out of the stacking order. The widget and its subtree stay alive but are neither
    /// drawn nor hit until [`Context::set_root`] or [`Context::add_widget`] places it again. Interaction state
    /// inside the subtree is dropped.
    #[track_caller]
    pub fn unset_root(&mut self, widget: Handle) {
        if !self.tree.remove_root(widget) {
            return;
        }
        let inside = |tree: &Tree, h: Handle| tree.root_of(h) == widget;
        if let Some(target) = self.active.filter(|t| inside(&self.tree, t.widget)) {
            self.active = None;
            self.tree.node_mut(target.widget).kind.clear_active();
        }
        self.hot = self.hot.filter(|t| !inside(&self.tree, t.widget));
        if self.focused.is_some_and(|h| inside(&self.tree, h)) {
            self.ui_events.push_back(UiEvent::FocusChanged { from: self.focused, to: None });
            self.focused = None;
        }
    }

    /// Sets the position of `widget` relative to its parent. Children of stacking containers are repositioned
    /// by their container on the next layout.
    #[track_caller]
    pub fn set_position(&mut self, widget: Handle, x: i32, y: i32) {
        self.tree.node_mut(widget).position = vec2(x, y);
        relayout(&mut self.tree, &self.style, widget);
    }

    /// Sets the size of `widget`. Dynamic containers recompute their size from their children.
    #[track_caller]
    pub fn set_size(&mut self, widget: Handle, width: i32, height: i32) {
        self.tree.node_mut(widget).size = dim(width, height);
        relayout(&mut self.tree, &self.style, widget);
    }

    /// Frees `widget` and its whole subtree. Handles to freed widgets stop resolving.
    #[track_caller]
    pub fn destroy(&mut self, widget: Handle) {
        let parent = self.tree.node(widget).links.parent;
        self.tree.remove(widget);
        let tree = &self.tree;
        self.hot = self.hot.filter(|t| tree.contains(t.widget));
        self.active = self.active.filter(|t| tree.contains(t.widget));
        self.focused = self.focused.filter(|h| tree.contains(*h));
        if let Some(p) = parent {
            relayout(&mut self.tree, &self.style, p);
        }
    }

    /// The widget tree.
    pub fn tree(&self) -> &Tree { &self.tree }

    /// Looks up a widget.
    pub fn widget(&self, widget: Handle) -> Option<&Widget> { self.tree.get(widget) }

    /// Looks up a button.
    pub fn button(&self, widget: Handle) -> Option<&Button> {
        match &self.tree.get(widget)?.kind {
            WidgetKind::Button(b) => Some(b),
            _ => None,
        }
    }

    /// Looks up a checkbox.
    pub fn checkbox(&self, widget: Handle) -> Option<&Checkbox> {
        match &self.tree.get(widget)?.kind {
            WidgetKind::Checkbox(c) => Some(c),
            _ => None,
        }
    }

    /// Looks up a slider.
    pub fn slider(&self, widget: Handle) -> Option<&Slider> {
        match &self.tree.get(widget)?.kind {
            WidgetKind::Slider(s) => Some(s),
            _ => None,
        }
    }

    /// Looks up a container.
    pub fn container(&self, widget: Handle) -> Option<&Container> {
        match &self.tree.get(widget)?.kind {
            WidgetKind::Container(c) => Some(c),
            _ => None,
        }
    }

    /// Looks up a textbox.
    pub fn textbox(&self, widget: Handle) -> Option<&Textbox> {
        match &self.tree.get(widget)?.kind {
            WidgetKind::Textbox(t) => Some(t),
            _ => None,
        }
    }

    /// Runs `f` on a widget and lays the tree out again. Returns `None` for a stale handle.
    pub fn with_widget_mut<Res, F: FnOnce(&mut Widget) -> Res>(&mut self, widget: Handle, f: F) -> Option<Res> {
        let res = self.tree.get_mut(widget).map(f)?;
        relayout(&mut self.tree, &self.style, widget);
        Some(res)
    }

    /// Widget under the pointer during the last update.
    pub fn hot(&self) -> Option<Handle> { self.hot.map(|t| t.widget) }

    /// Widget part under the pointer during the last update.
    pub fn hot_target(&self) -> Option<Target> { self.hot }

    /// Widget owning the in-progress interaction.
    pub fn active(&self) -> Option<Handle> { self.active.map(|t| t.widget) }

    /// Widget part owning the in-progress interaction.
    pub fn active_target(&self) -> Option<Target> { self.active }

    /// Widget with keyboard focus.
    pub fn focused(&self) -> Option<Handle> { self.focused }

    /// Roots, bottom to top.
    pub fn roots(&self) -> impl Iterator<Item = Handle> + '_ { self.tree.roots() }

    /// Screen rectangle of `widget`.
    #[track_caller]
    pub fn absolute_rect(&self, widget: Handle) -> Recti { self.tree.absolute_rect(widget) }

    /// Font used for labels and text.
    pub fn font(&self) -> &BitmapFont { &self.font }

    /// Active style.
    pub fn style(&self) -> &Style { &self.style }

    /// Replaces the style. Existing widgets keep their sizes; containers are laid out again.
    pub fn set_style(&mut self, style: Style) {
        self.style = style;
        self.canvas.set_font(self.font.clone(), style.font_height);
        let roots: Vec<Handle> = self.tree.roots().collect();
        for root in roots {
            relayout_root(&mut self.tree, &self.style, root);
        }
    }

    /// Pointer position after the last update.
    pub fn mouse_position(&self) -> Vec2i { self.input.mouse_pos() }

    /// Input state of the last update.
    pub fn input(&self) -> &Input { &self.input }

    /// Number of updates run so far.
    pub fn frame(&self) -> usize { self.frame }

    /// Returns a clone of the renderer handle.
    pub fn renderer_handle(&self) -> RendererHandle<R> { self.canvas.renderer_handle() }
}

fn ui_event(widget: Handle, kind: &WidgetKind, res: ResourceState) -> Option<UiEvent> {
    match kind {
        WidgetKind::Button(_) if res.is_submitted() => Some(UiEvent::ButtonClicked(widget)),
        WidgetKind::Checkbox(c) if res.is_changed() => Some(UiEvent::CheckboxToggled { widget, checked: c.checked }),
        WidgetKind::Slider(s) if res.is_changed() => Some(UiEvent::SliderChanged { widget, value: s.value }),
        WidgetKind::Container(c) if res.is_changed() => Some(UiEvent::ScrollChanged { widget, ratio: [c.scroll[0].ratio, c.scroll[1].ratio] }),
        WidgetKind::Textbox(_) if res.is_changed() => Some(UiEvent::TextChanged(widget)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::font::tests::test_font;
    use proptest::prelude::*;

    fn context(width: usize, height: usize) -> Context<SoftwareRenderer> { Context::new(RendererHandle::new(SoftwareRenderer::new(width, height)), test_font()) }

    fn frame(ctx: &mut Context<SoftwareRenderer>, events: &[Event]) {
        for e in events {
            ctx.push_event(*e).unwrap();
        }
        ctx.update().unwrap();
    }

    fn pressed(ctx: &Context<SoftwareRenderer>, b: Handle) -> bool { ctx.button(b).unwrap().pressed }

    #[test]
    fn button_click_is_a_single_frame_edge() {
        let mut ctx = context(200, 200);
        let c = ctx.create_container(LayoutKind::Vertical, true, 5, ContainerOption::DYNAMIC);
        let b = ctx.create_button("OK");
        ctx.add_widget(c, b);
        ctx.set_root(c);
        ctx.set_position(c, 10, 10);
        assert!(rect_eq(ctx.absolute_rect(c), rect(10, 10, 30, 27)));
        assert!(rect_eq(ctx.absolute_rect(b), rect(15, 15, 20, 17)));

        frame(&mut ctx, &[Event::MouseMove { x: 20, y: 20 }]);
        assert_eq!(ctx.hot(), Some(b));
        assert!(!pressed(&ctx, b));

        frame(&mut ctx, &[Event::MouseDown]);
        assert_eq!(ctx.active(), Some(b));
        assert!(!pressed(&ctx, b));

        frame(&mut ctx, &[Event::MouseUp]);
        assert!(pressed(&ctx, b));
        assert_eq!(ctx.poll_ui_event(), Some(UiEvent::ButtonClicked(b)));
        assert_eq!(ctx.active(), None);

        frame(&mut ctx, &[]);
        assert!(!pressed(&ctx, b));
        assert_eq!(ctx.poll_ui_event(), None);
    }

    #[test]
    fn press_needs_a_grab_from_an_earlier_frame() {
        let mut ctx = context(200, 200);
        let b = ctx.create_button("OK");
        ctx.set_root(b);
        frame(&mut ctx, &[Event::MouseMove { x: 5, y: 5 }]);
        assert_eq!(ctx.hot(), Some(b));

        frame(&mut ctx, &[Event::MouseDown, Event::MouseUp]);
        assert!(!pressed(&ctx, b));
        assert_eq!(ctx.poll_ui_event(), None);
        assert_eq!(ctx.active(), None);
        assert!(!ctx.widget(b).unwrap().kind.is_active());
    }

    #[test]
    fn release_outside_does_not_press() {
        let mut ctx = context(200, 200);
        let b = ctx.create_button("OK");
        ctx.set_root(b);
        frame(&mut ctx, &[Event::MouseMove { x: 5, y: 5 }, Event::MouseDown]);
        frame(&mut ctx, &[Event::MouseMove { x: 150, y: 150 }, Event::MouseUp]);
        assert!(!pressed(&ctx, b));
        assert_eq!(ctx.active(), None);
        assert!(!ctx.widget(b).unwrap().kind.is_active());
    }

    #[test]
    fn slider_drag_ignores_vertical_motion() {
        let mut ctx = context(400, 400);
        let s = ctx.create_slider();
        ctx.set_root(s);
        assert!(rect_eq(ctx.absolute_rect(s), rect(0, 0, 200, 12)));

        frame(&mut ctx, &[Event::MouseMove { x: 50, y: 5 }, Event::MouseDown]);
        assert_eq!(ctx.slider(s).unwrap().value, 0.25);
        let mut last = 0.25;
        for (x, y) in [(80, 40), (100, 120), (150, 300)] {
            frame(&mut ctx, &[Event::MouseMove { x, y }]);
            let v = ctx.slider(s).unwrap().value;
            assert!(v > last);
            last = v;
        }
        assert_eq!(last, 0.75);
        assert_eq!(ctx.poll_ui_event(), Some(UiEvent::SliderChanged { widget: s, value: 0.25 }));
    }

    #[test]
    fn scroll_ratio_saturates() {
        let mut ctx = context(400, 400);
        let sc = ctx.create_scroll_container(dim(110, 200), true, 0, ContainerOption::NONE);
        let body = ctx.create_container(LayoutKind::None, true, 0, ContainerOption::NONE);
        ctx.set_size(body, 100, 500);
        ctx.add_widget(sc, body);
        ctx.set_root(sc);

        let c = ctx.container(sc).unwrap();
        assert!(dim_eq(c.viewport, dim(100, 200)));
        assert!(dim_eq(c.content, dim(100, 500)));
        assert!(rect_eq(c.scrollbar(ScrollAxis::Vertical).grip, rect(100, 0, 10, 80)));

        frame(&mut ctx, &[Event::MouseMove { x: 105, y: 10 }, Event::MouseDown]);
        assert_eq!(ctx.active_target(), Some(Target { widget: sc, part: Part::Scrollbar(ScrollAxis::Vertical) }));

        frame(&mut ctx, &[Event::MouseMove { x: 105, y: 5000 }]);
        assert_eq!(ctx.container(sc).unwrap().scrollbar(ScrollAxis::Vertical).ratio, 1.0);
        assert_eq!(ctx.absolute_rect(body).y, -300);

        frame(&mut ctx, &[Event::MouseMove { x: 105, y: 9000 }]);
        assert_eq!(ctx.container(sc).unwrap().scrollbar(ScrollAxis::Vertical).ratio, 1.0);

        frame(&mut ctx, &[Event::MouseMove { x: 105, y: -5000 }]);
        assert_eq!(ctx.container(sc).unwrap().scrollbar(ScrollAxis::Vertical).ratio, 0.0);
        assert_eq!(ctx.absolute_rect(body).y, 0);

        frame(&mut ctx, &[Event::MouseUp]);
        assert_eq!(ctx.active(), None);
        assert!(!ctx.container(sc).unwrap().scrollbar(ScrollAxis::Vertical).grabbed);
    }

    #[test]
    fn scrolled_out_children_cannot_be_hit() {
        let mut ctx = context(400, 400);
        let sc = ctx.create_scroll_container(dim(110, 60), true, 0, ContainerOption::VSCROLL | ContainerOption::HSCROLL);
        let a = ctx.create_button("A");
        let b = ctx.create_button("B");
        ctx.add_widget(sc, a);
        ctx.add_widget(sc, b);
        ctx.set_root(sc);
        // b covers y 17..34
        frame(&mut ctx, &[Event::MouseMove { x: 5, y: 25 }]);
        assert_eq!(ctx.hot(), Some(b));

        // the viewport now ends at y 20, the pointer is over the horizontal scrollbar strip
        ctx.set_size(sc, 110, 30);
        frame(&mut ctx, &[]);
        assert_eq!(ctx.hot(), Some(sc));
    }

    #[test]
    fn blit_clipping_aligns_source_and_destination() {
        let mut ctx = context(800, 600);
        frame(&mut ctx, &[]);
        let pixels: Vec<u32> = (0..50u32).flat_map(|y| (0..50u32).map(move |x| 0xFF00_0000 | (x << 8) | y)).collect();
        let bitmap = Rc::new(Bitmap::from_argb(50, 50, pixels).unwrap());
        ctx.push_draw_command(Command::Bitmap { bitmap, src: rect(0, 0, 50, 50), dst: rect(-20, -20, 50, 50) }).unwrap();
        ctx.drain_draw_commands();

        let background = ctx.style().background.to_argb();
        ctx.renderer_handle().scope(|r| {
            let bb = r.backbuffer();
            let written = bb.pixels().iter().filter(|p| **p != background).count();
            assert_eq!(written, 900);
            for y in 0..30 {
                for x in 0..30 {
                    assert_eq!(bb.pixel(x, y), Some(0xFF00_0000 | ((x as u32 + 20) << 8) | (y as u32 + 20)));
                }
            }
        });
    }

    #[test]
    fn render_emits_balanced_clips() {
        let mut ctx = context(200, 200);
        let c = ctx.create_container(LayoutKind::Vertical, true, 2, ContainerOption::DYNAMIC);
        let s = ctx.create_slider();
        ctx.add_widget(c, s);
        ctx.set_root(c);
        frame(&mut ctx, &[]);

        let mut commands = Vec::new();
        while let Some(cmd) = ctx.pull_draw_command() {
            commands.push(cmd);
        }
        assert!(matches!(commands[0], Command::Clear { .. }));
        let begins = commands.iter().filter(|c| matches!(c, Command::BeginClip { .. })).count();
        let ends = commands.iter().filter(|c| matches!(c, Command::EndClip)).count();
        assert_eq!(begins, 1);
        assert_eq!(begins, ends);
        assert!(commands.iter().any(|c| matches!(c, Command::Circle { .. })));
    }

    #[test]
    fn queue_overflow_is_reported() {
        let config = Config { event_queue_capacity: 2, draw_queue_capacity: 2, ..Config::default() };
        let mut ctx = Context::with_config(RendererHandle::new(SoftwareRenderer::new(100, 100)), test_font(), config);
        ctx.push_event(Event::MouseDown).unwrap();
        ctx.push_event(Event::MouseUp).unwrap();
        assert!(matches!(ctx.push_event(Event::MouseMove { x: 1, y: 1 }), Err(Error::QueueFull { queue: "events", capacity: 2 })));

        let b = ctx.create_button("OK");
        ctx.set_root(b);
        assert!(matches!(ctx.update(), Err(Error::QueueFull { queue: "draw", capacity: 2 })));
        assert_eq!(ctx.frame(), 1);
        assert!(!ctx.input().mouse_down());
    }

    #[test]
    fn clicking_raises_root() {
        let mut ctx = context(200, 200);
        let back = ctx.create_container(LayoutKind::None, true, 0, ContainerOption::NONE);
        let front = ctx.create_container(LayoutKind::None, true, 0, ContainerOption::NONE);
        for (h, x) in [(back, 0), (front, 20)] {
            ctx.set_size(h, 50, 50);
            ctx.set_root(h);
            ctx.set_position(h, x, 0);
        }
        frame(&mut ctx, &[Event::MouseMove { x: 30, y: 10 }]);
        assert_eq!(ctx.hot(), Some(front));

        frame(&mut ctx, &[Event::MouseMove { x: 5, y: 10 }, Event::MouseDown]);
        assert_eq!(ctx.roots().collect::<Vec<_>>(), vec![front, back]);
        frame(&mut ctx, &[Event::MouseUp]);
        frame(&mut ctx, &[Event::MouseMove { x: 30, y: 10 }]);
        assert_eq!(ctx.hot(), Some(back));
    }

    #[test]
    fn unset_root_hides_window_and_drops_its_grab() {
        let mut ctx = context(200, 200);
        let w = ctx.create_container(LayoutKind::Vertical, true, 4, ContainerOption::DYNAMIC);
        let tb = ctx.create_textbox();
        ctx.add_widget(w, tb);
        ctx.set_root(w);
        frame(&mut ctx, &[Event::MouseMove { x: 10, y: 10 }, Event::MouseDown]);
        assert_eq!(ctx.active(), Some(tb));
        assert_eq!(ctx.focused(), Some(tb));
        assert_eq!(ctx.poll_ui_event(), Some(UiEvent::FocusChanged { from: None, to: Some(tb) }));

        ctx.unset_root(w);
        assert_eq!(ctx.active(), None);
        assert_eq!(ctx.focused(), None);
        assert_eq!(ctx.poll_ui_event(), Some(UiEvent::FocusChanged { from: Some(tb), to: None }));
        assert!(!ctx.widget(tb).unwrap().kind.is_active());

        frame(&mut ctx, &[Event::MouseUp]);
        assert_eq!(ctx.hot(), None);
        assert_eq!(ctx.roots().count(), 0);
        let begins = std::iter::from_fn(|| ctx.pull_draw_command()).filter(|c| matches!(c, Command::BeginClip { .. })).count();
        assert_eq!(begins, 0);

        ctx.set_root(w);
        frame(&mut ctx, &[]);
        assert_eq!(ctx.hot(), Some(tb));
    }

    #[test]
    fn dragging_moves_draggable_root() {
        let mut ctx = context(200, 200);
        let w = ctx.create_container(LayoutKind::Vertical, true, 4, ContainerOption::DYNAMIC | ContainerOption::DRAGGABLE);
        let b = ctx.create_button("OK");
        ctx.add_widget(w, b);
        ctx.set_root(w);
        ctx.set_position(w, 10, 10);
        frame(&mut ctx, &[Event::MouseMove { x: 11, y: 11 }, Event::MouseDown]);
        assert_eq!(ctx.active(), Some(w));
        frame(&mut ctx, &[Event::MouseMove { x: 41, y: 1 }]);
        assert_eq!(ctx.absolute_rect(w).x, 40);
        assert_eq!(ctx.absolute_rect(w).y, 0);
        assert_eq!(ctx.absolute_rect(b).x, 44);
    }

    #[test]
    fn focus_follows_clicks_and_routes_text() {
        let mut ctx = context(400, 400);
        let tb = ctx.create_textbox();
        ctx.set_root(tb);

        frame(&mut ctx, &[Event::MouseMove { x: 10, y: 10 }, Event::MouseDown, Event::MouseUp]);
        assert_eq!(ctx.focused(), Some(tb));
        assert_eq!(ctx.poll_ui_event(), Some(UiEvent::FocusChanged { from: None, to: Some(tb) }));

        frame(&mut ctx, &[Event::MouseMove { x: 300, y: 300 }, Event::Char('h'), Event::Char('i')]);
        assert_eq!(ctx.textbox(tb).unwrap().text(), "hi");
        assert_eq!(ctx.poll_ui_event(), Some(UiEvent::TextChanged(tb)));

        frame(&mut ctx, &[Event::MouseDown, Event::MouseUp]);
        assert_eq!(ctx.focused(), None);
        assert_eq!(ctx.poll_ui_event(), Some(UiEvent::FocusChanged { from: Some(tb), to: None }));
        frame(&mut ctx, &[Event::Char('x')]);
        assert_eq!(ctx.textbox(tb).unwrap().text(), "hi");
    }

    #[test]
    fn focused_textbox_applies_keys_in_push_order() {
        let mut ctx = context(400, 400);
        let tb = ctx.create_textbox();
        ctx.set_root(tb);
        frame(&mut ctx, &[Event::MouseMove { x: 10, y: 10 }, Event::MouseDown]);
        frame(&mut ctx, &[Event::MouseUp]);
        assert_eq!(ctx.focused(), Some(tb));

        frame(&mut ctx, &[Event::Char('a'), Event::KeyDown(Key::Return), Event::Char('b')]);
        assert_eq!(ctx.textbox(tb).unwrap().text(), "a\nb");
    }

    #[test]
    fn checkbox_toggles_on_release() {
        let mut ctx = context(200, 200);
        let cb = ctx.create_checkbox("on");
        ctx.set_root(cb);
        frame(&mut ctx, &[Event::MouseMove { x: 2, y: 2 }, Event::MouseDown]);
        assert!(!ctx.checkbox(cb).unwrap().checked);
        frame(&mut ctx, &[Event::MouseUp]);
        assert!(ctx.checkbox(cb).unwrap().checked);
        assert_eq!(ctx.poll_ui_event(), Some(UiEvent::CheckboxToggled { widget: cb, checked: true }));
    }

    #[test]
    fn destroy_clears_interaction_state() {
        let mut ctx = context(200, 200);
        let c = ctx.create_container(LayoutKind::Vertical, true, 5, ContainerOption::DYNAMIC);
        let s = ctx.create_slider();
        ctx.add_widget(c, s);
        ctx.set_root(c);
        frame(&mut ctx, &[Event::MouseMove { x: 20, y: 8 }, Event::MouseDown]);
        assert_eq!(ctx.active(), Some(s));

        ctx.destroy(s);
        assert_eq!(ctx.active(), None);
        assert_eq!(ctx.hot(), None);
        assert!(ctx.widget(s).is_none());
        assert!(rect_eq(ctx.absolute_rect(c), rect(0, 0, 10, 5)));
        frame(&mut ctx, &[Event::MouseUp]);
    }

    fn event_strategy() -> impl Strategy<Value = Event> {
        prop_oneof![
            (0i32..120, 0i32..120).prop_map(|(x, y)| Event::MouseMove { x, y }),
            Just(Event::MouseDown),
            Just(Event::MouseUp),
        ]
    }

    proptest! {
        #[test]
        fn at_most_one_widget_is_active(frames in proptest::collection::vec(proptest::collection::vec(event_strategy(), 0..4), 1..24)) {
            let mut ctx = context(120, 120);
            let c = ctx.create_container(LayoutKind::Vertical, true, 4, ContainerOption::DYNAMIC | ContainerOption::DRAGGABLE);
            let b = ctx.create_button("OK");
            let s = ctx.create_slider();
            let cb = ctx.create_checkbox("x");
            for h in [b, s, cb] {
                ctx.add_widget(c, h);
            }
            ctx.set_root(c);
            for events in frames {
                for e in events {
                    ctx.push_event(e).unwrap();
                }
                ctx.update().unwrap();
                let active = ctx.tree().traverse(Direction::BackToFront).pre_order().filter(|h| ctx.widget(*h).unwrap().kind.is_active()).count();
                prop_assert!(active <= 1);
                if let Some(a) = ctx.active() {
                    prop_assert!(ctx.widget(a).unwrap().kind.is_active());
                }
            }
        }
    }
}
