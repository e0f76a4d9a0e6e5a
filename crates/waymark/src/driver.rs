#![forbid(unsafe_code)]

//! The step-transition controller.
//!
//! A [`Driver`] owns the host page, the step list, and every overlay node it
//! creates. Navigation happens in two halves: the state change and the
//! element highlight run synchronously, while the popover render waits for a
//! settle delay pumped by the host through [`Driver::advance`] and
//! [`Driver::animation_frame`]. Navigation requested in between is ignored.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut driver = Driver::new(page, Options::default(), vec![
//!     Step::new().popover(PopoverSpec::new("Welcome")),
//!     Step::new().element("#btn").popover(PopoverSpec::new("Click")),
//! ])?;
//! driver.drive(0)?;
//! driver.advance(Duration::from_millis(400));
//! driver.move_next();
//! ```

use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use waymark_core::{ElementId, Event, Page, Rect};
use waymark_layout::{Align, StackingLayers, resolve_layers};
use waymark_runtime::{Duration, EventBus, HookFlow, Pump, Scheduler, run_hook};
use waymark_widgets::{
    HighlightCoordinator, HighlightOptions, Popover, PopoverLayout, SETTLE_FRAMES, STYLE_ID_PREFIX,
    Scrim, ScrimStyle, StyleRegistry, tour_css,
};

use crate::config::{Options, OptionsPatch, OverlayClickBehavior};
use crate::content::build_content;
use crate::error::{Error, Result};
use crate::handle::{Command, DriverHandle, Pending};
use crate::hooks::{Hook, HookContext, Hooks, RenderContext};
use crate::input::{TourEvent, key_event};
use crate::state::{Phase, TourState};
use crate::step::{ElementTarget, Step};

/// Settle delay when animating.
pub const ANIMATED_SETTLE: Duration = Duration::from_millis(400);
/// Settle delay when not animating.
pub const INSTANT_SETTLE: Duration = Duration::from_millis(10);

static NEXT_INSTANCE: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Task {
    Settle { generation: u64 },
    Recut { generation: u64 },
}

fn resolve_target<P: Page>(page: &P, step: &Step) -> Option<ElementId> {
    let found = match step.element.as_ref()? {
        ElementTarget::Selector(selector) => page.query_selector(selector),
        ElementTarget::Resolver(resolve) => resolve(page),
        ElementTarget::Element(id) => Some(*id),
    };
    found.filter(|id| page.is_connected(*id))
}

fn compute_layers<P: Page>(page: &P, steps: &[Rc<Step>]) -> StackingLayers {
    let targets: Vec<ElementId> = steps
        .iter()
        .filter_map(|step| resolve_target(page, step))
        .collect();
    resolve_layers(page, targets, || page.elements())
}

fn validate_steps(steps: Vec<Step>) -> Result<Vec<Rc<Step>>> {
    steps
        .into_iter()
        .enumerate()
        .map(|(index, step)| {
            step.validate()
                .map(|()| Rc::new(step))
                .map_err(|reason| Error::InvalidStep { index, reason })
        })
        .collect()
}

/// A guided tour over one host page.
pub struct Driver<P: Page> {
    page: P,
    options: Options,
    hooks: Hooks,
    steps: Vec<Rc<Step>>,
    state: TourState,
    layers: StackingLayers,
    scrim: Scrim,
    popover: Popover,
    highlight: HighlightCoordinator,
    styles: StyleRegistry,
    style_id: String,
    scheduler: Scheduler<Task>,
    bus: EventBus<TourEvent>,
    handle: DriverHandle,
    generation: u64,
    draining: bool,
}

impl<P: Page> Driver<P> {
    /// Validate `options` and `steps` and compute the stacking layers.
    ///
    /// Nothing touches the page until the tour starts.
    pub fn new(page: P, options: Options, steps: Vec<Step>) -> Result<Self> {
        options.check()?;
        let steps = validate_steps(steps)?;
        let layers = compute_layers(&page, &steps);
        let instance = NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed);
        let scrim_style = ScrimStyle {
            color: options.overlay_color.clone(),
            opacity: options.overlay_opacity,
            z_index: layers.overlay,
            animate: options.animate,
        };
        Ok(Self {
            page,
            options,
            hooks: Hooks::default(),
            steps,
            state: TourState::default(),
            layers,
            scrim: Scrim::new(scrim_style),
            popover: Popover::new(layers.popover),
            highlight: HighlightCoordinator::new(),
            styles: StyleRegistry::new(),
            style_id: format!("{STYLE_ID_PREFIX}-{instance}"),
            scheduler: Scheduler::new(),
            bus: EventBus::new(),
            handle: DriverHandle::new(),
            generation: 0,
            draining: false,
        })
    }

    #[must_use]
    pub fn with_hooks(mut self, hooks: Hooks) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn set_hooks(&mut self, hooks: Hooks) {
        self.hooks = hooks;
    }

    // --- Navigation ---

    /// Start (or restart) the tour at `start`.
    pub fn drive(&mut self, start: usize) -> Result<()> {
        let result = self.highlight_step(start);
        self.drain_queue();
        result
    }

    /// Jump to `index` without consulting click hooks.
    pub fn move_to(&mut self, index: usize) -> Result<()> {
        let result = self.highlight_step(index);
        self.drain_queue();
        result
    }

    /// Advance, or finish on the last step. `on_next_click` may cancel.
    pub fn move_next(&mut self) {
        self.next_gated();
        self.drain_queue();
    }

    /// Go back one step. `on_prev_click` may cancel.
    pub fn move_previous(&mut self) {
        self.previous_gated();
        self.drain_queue();
    }

    /// What the close button does. `on_close_click` may cancel.
    pub fn close(&mut self) {
        self.close_gated();
        self.drain_queue();
    }

    /// Tear the tour down. `on_destroy_started` may cancel.
    pub fn destroy(&mut self) {
        self.destroy_gated();
        self.drain_queue();
    }

    /// Highlight one step outside the step list.
    ///
    /// The popover shows no buttons or progress unless the step asks for them.
    pub fn highlight(&mut self, step: Step) -> Result<()> {
        step.validate()
            .map_err(|reason| Error::InvalidStep { index: 0, reason })?;
        if self.state.transition_in_progress {
            tracing::debug!(target: "waymark.driver", "highlight ignored during transition");
            return Ok(());
        }
        let mut step = step;
        if let Some(popover) = step.popover.as_mut() {
            popover.show_buttons.get_or_insert_with(Vec::new);
        }
        self.init();
        self.transition_to(Rc::new(step), None);
        self.drain_queue();
        Ok(())
    }

    /// Re-cut the scrim and re-place the popover for the current step.
    pub fn refresh(&mut self) {
        self.refresh_now();
        self.drain_queue();
    }

    /// Apply a partial options update.
    ///
    /// An active tour is torn down first; the caller restarts it.
    pub fn set_config(&mut self, patch: OptionsPatch) -> Result<()> {
        let mut options = self.options.clone();
        options.apply(patch);
        options.check()?;
        self.teardown();
        self.options = options;
        let style = self.scrim_style();
        self.scrim.set_style(&mut self.page, style);
        self.drain_queue();
        Ok(())
    }

    /// Replace the step list and recompute the stacking layers.
    ///
    /// An active tour is torn down first.
    pub fn set_steps(&mut self, steps: Vec<Step>) -> Result<()> {
        let steps = validate_steps(steps)?;
        self.teardown();
        self.steps = steps;
        self.layers = compute_layers(&self.page, &self.steps);
        self.popover.set_z_index(self.layers.popover);
        let style = self.scrim_style();
        self.scrim.set_style(&mut self.page, style);
        self.drain_queue();
        Ok(())
    }

    // --- Host pumping ---

    /// Feed one host input event.
    pub fn handle_event(&mut self, event: &Event) {
        if !self.state.is_initialized {
            return;
        }
        match event {
            Event::Key(key) => {
                if self.options.allow_keyboard_control {
                    if let Some(tour_event) = key_event(key) {
                        self.bus.emit(tour_event);
                    }
                }
            }
            Event::Click(click) => {
                let on_popover = click.target.is_some_and(|t| self.popover.owns(t))
                    || self.popover.contains(&self.page, click.position);
                if !on_popover && self.scrim.route_click(click.position) {
                    self.bus.emit(TourEvent::OverlayClick);
                }
            }
            Event::Resize { width, height } => {
                tracing::debug!(target: "waymark.driver", width, height, "viewport resized");
                self.scrim.handle_resize(&mut self.page);
                self.refresh_now();
            }
            Event::PopoverButton(kind) => {
                let enabled = self.popover.is_visible()
                    && self
                        .popover
                        .content()
                        .and_then(|content| content.button(*kind))
                        .is_some_and(|button| !button.disabled);
                if enabled {
                    self.bus.emit(TourEvent::from_button(*kind));
                } else {
                    tracing::debug!(target: "waymark.driver", ?kind, "ignoring unavailable button");
                }
            }
        }
        self.drain_queue();
    }

    /// Let `dt` of time pass.
    pub fn advance(&mut self, dt: Duration) {
        for task in self.scheduler.advance(dt) {
            self.run_task(task);
        }
        self.drain_queue();
    }

    /// Signal one animation-frame boundary.
    pub fn animation_frame(&mut self) {
        for task in self.scheduler.on_animation_frame() {
            self.run_task(task);
        }
        self.drain_queue();
    }

    // --- Queries ---

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state.is_initialized
    }

    #[must_use]
    pub fn has_next_step(&self) -> bool {
        self.state
            .active_index
            .is_some_and(|i| i + 1 < self.steps.len())
    }

    #[must_use]
    pub fn has_previous_step(&self) -> bool {
        self.state.active_index.is_some_and(|i| i > 0)
    }

    #[must_use]
    pub fn is_first_step(&self) -> bool {
        self.state.active_index == Some(0)
    }

    #[must_use]
    pub fn is_last_step(&self) -> bool {
        self.state
            .active_index
            .is_some_and(|i| i + 1 == self.steps.len())
    }

    #[must_use]
    pub fn active_index(&self) -> Option<usize> {
        self.state.active_index
    }

    #[must_use]
    pub fn active_step(&self) -> Option<&Step> {
        self.state.active_step.as_deref()
    }

    #[must_use]
    pub fn active_element(&self) -> Option<ElementId> {
        self.state.active_element
    }

    #[must_use]
    pub fn previous_step(&self) -> Option<&Step> {
        self.state.previous_step.as_deref()
    }

    #[must_use]
    pub fn previous_element(&self) -> Option<ElementId> {
        self.state.previous_element
    }

    #[must_use]
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn config(&self) -> &Options {
        &self.options
    }

    /// One option by its camelCase key.
    #[must_use]
    pub fn get_config(&self, key: &str) -> Option<serde_json::Value> {
        self.options.get(key)
    }

    #[must_use]
    pub fn state(&self) -> &TourState {
        &self.state
    }

    /// One state field by its camelCase key.
    #[must_use]
    pub fn get_state(&self, key: &str) -> Option<serde_json::Value> {
        self.state.get(key)
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    #[must_use]
    pub fn layers(&self) -> StackingLayers {
        self.layers
    }

    #[must_use]
    pub fn popover(&self) -> &Popover {
        &self.popover
    }

    #[must_use]
    pub fn scrim(&self) -> &Scrim {
        &self.scrim
    }

    /// A handle for queuing commands from outside a hook.
    #[must_use]
    pub fn handle(&self) -> DriverHandle {
        self.handle.clone()
    }

    #[must_use]
    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    // --- Internals ---

    fn settle_delay(&self) -> Duration {
        if self.options.animate {
            ANIMATED_SETTLE
        } else {
            INSTANT_SETTLE
        }
    }

    fn scrim_style(&self) -> ScrimStyle {
        ScrimStyle {
            color: self.options.overlay_color.clone(),
            opacity: self.options.overlay_opacity,
            z_index: self.layers.overlay,
            animate: self.options.animate,
        }
    }

    fn highlight_options(&self) -> HighlightOptions {
        HighlightOptions {
            smooth_scroll: self.options.smooth_scroll,
            disable_interaction: self.options.disable_active_interaction,
            padding: self.options.stage_padding,
            radius: self.options.stage_radius,
        }
    }

    fn fire(
        &self,
        name: &str,
        hook: Option<&Hook>,
        element: Option<ElementId>,
        step: &Step,
    ) -> HookFlow {
        let Some(hook) = hook else {
            return HookFlow::Proceed;
        };
        let ctx = HookContext {
            config: &self.options,
            state: &self.state,
            driver: &self.handle,
        };
        run_hook(name, || hook(element, step, &ctx))
    }

    fn init(&mut self) {
        if self.state.is_initialized {
            return;
        }
        self.state.is_initialized = true;
        self.state.focused_before_activation = self.page.active_element();

        let css = tour_css(&self.layers);
        self.styles.inject(&mut self.page, &self.style_id, &css);
        let style = self.scrim_style();
        self.scrim.set_style(&mut self.page, style);
        self.scrim.show(&mut self.page);

        self.bus.clear();
        let routes = [
            (TourEvent::NextClick, Pending::Next),
            (TourEvent::ArrowRightPress, Pending::Next),
            (TourEvent::PrevClick, Pending::Previous),
            (TourEvent::ArrowLeftPress, Pending::Previous),
            (TourEvent::CloseClick, Pending::Close),
            (TourEvent::OverlayClick, Pending::Overlay),
            (TourEvent::EscapePress, Pending::Escape),
        ];
        for (event, pending) in routes {
            let handle = self.handle.clone();
            self.bus.listen(event, move |_| handle.push(pending));
        }
        tracing::debug!(
            target: "waymark.driver",
            style_id = %self.style_id,
            overlay = self.layers.overlay,
            popover = self.layers.popover,
            "tour initialized"
        );
    }

    fn highlight_step(&mut self, index: usize) -> Result<()> {
        if self.steps.is_empty() {
            return Err(Error::NoSteps);
        }
        let Some(step) = self.steps.get(index).cloned() else {
            return Err(Error::InvalidStepIndex {
                index,
                len: self.steps.len(),
            });
        };
        if self.state.transition_in_progress {
            tracing::debug!(target: "waymark.driver", index, "navigation ignored during transition");
            return Ok(());
        }
        self.init();
        self.transition_to(step, Some(index));
        Ok(())
    }

    fn transition_to(&mut self, step: Rc<Step>, index: Option<usize>) {
        self.state.transition_in_progress = true;
        self.generation += 1;
        let generation = self.generation;

        self.deselect_active();

        let element = resolve_target(&self.page, &step);
        if element.is_none() {
            if let Some(target) = &step.element {
                tracing::warn!(
                    target: "waymark.driver",
                    element = ?target,
                    "step element not found; showing a centered popover"
                );
            }
        }

        let started = step
            .on_highlight_started
            .as_ref()
            .or(self.hooks.on_highlight_started.as_ref());
        let _ = self.fire("on_highlight_started", started, element, &step);

        self.state.previous_element = self.state.active_element;
        self.state.previous_step = self.state.active_step.take();
        self.state.active_index = index;
        self.state.active_element = element;
        self.state.active_step = Some(step);

        let options = self.highlight_options();
        self.highlight.highlight(&mut self.page, element, options);
        self.scrim.update_highlight(&mut self.page, None);
        self.popover.hide(&mut self.page);

        self.scheduler
            .after_frames(SETTLE_FRAMES, Task::Recut { generation });
        let delay = self.settle_delay();
        self.scheduler.after(delay, Task::Settle { generation });

        tracing::debug!(
            target: "waymark.driver",
            ?index,
            element = ?element.map(ElementId::raw),
            generation,
            "transition started"
        );
    }

    fn deselect_active(&self) {
        let Some(step) = self.state.active_step.clone() else {
            return;
        };
        let hook = step
            .on_deselected
            .as_ref()
            .or(self.hooks.on_deselected.as_ref());
        let _ = self.fire("on_deselected", hook, self.state.active_element, &step);
    }

    fn run_task(&mut self, task: Task) {
        let (Task::Settle { generation } | Task::Recut { generation }) = task;
        if !self.state.is_initialized || generation != self.generation {
            tracing::trace!(target: "waymark.driver", ?task, "stale task dropped");
            return;
        }
        match task {
            Task::Settle { .. } => self.settle(),
            Task::Recut { .. } => self.recut(),
        }
    }

    fn settle(&mut self) {
        self.render_popover();
        self.state.transition_in_progress = false;
        if let Some(step) = self.state.active_step.clone() {
            let hook = step
                .on_highlighted
                .as_ref()
                .or(self.hooks.on_highlighted.as_ref());
            let _ = self.fire("on_highlighted", hook, self.state.active_element, &step);
        }
        tracing::debug!(
            target: "waymark.driver",
            index = ?self.state.active_index,
            "step settled"
        );
    }

    fn anchor_rect(&self) -> Option<Rect> {
        if self.highlight.is_placeholder_anchor() {
            return None;
        }
        self.highlight
            .anchor()
            .and_then(|anchor| self.page.bounding_rect(anchor))
    }

    fn render_popover(&mut self) {
        let Some(step) = self.state.active_step.clone() else {
            return;
        };
        let Some(spec) = step.popover.as_ref() else {
            self.popover.hide(&mut self.page);
            return;
        };

        let mut content = build_content(
            spec,
            &self.options,
            self.state.active_index,
            self.steps.len(),
        );
        let target = self.anchor_rect();
        let mut layout = PopoverLayout {
            side: spec.side,
            align: spec.align.unwrap_or(Align::Center),
            offset: self.options.popover_offset,
        };
        let render_hook = spec
            .on_popover_render
            .clone()
            .or_else(|| self.hooks.on_popover_render.clone());
        if let Some(hook) = render_hook {
            let ctx = HookContext {
                config: &self.options,
                state: &self.state,
                driver: &self.handle,
            };
            let mut render = RenderContext {
                content: &mut content,
                target: self.state.active_element,
                target_rect: target,
                layout,
                step: &step,
            };
            let _ = run_hook("on_popover_render", || hook(&mut render, &ctx));
            layout = render.layout;
        }

        let placement = self.popover.render(&mut self.page, content, target, layout);
        tracing::debug!(target: "waymark.driver", ?placement, "popover rendered");
    }

    fn recut(&mut self) {
        let cutout = self.highlight.cutout(&self.page, self.highlight_options());
        self.scrim.update_highlight(&mut self.page, cutout);
    }

    fn refresh_now(&mut self) {
        if !self.state.is_initialized {
            return;
        }
        self.recut();
        let target = self.anchor_rect();
        self.popover.reposition(&mut self.page, target);
    }

    fn next_gated(&mut self) {
        if !self.state.is_initialized || self.state.transition_in_progress {
            tracing::debug!(target: "waymark.driver", "next ignored");
            return;
        }
        let step = self.state.active_step.clone().unwrap_or_default();
        let hook = step
            .popover
            .as_ref()
            .and_then(|p| p.on_next_click.as_ref())
            .or(self.hooks.on_next_click.as_ref());
        if self.fire("on_next_click", hook, self.state.active_element, &step) == HookFlow::Cancel {
            tracing::debug!(target: "waymark.driver", "next cancelled by hook");
            return;
        }
        self.step_forward();
    }

    fn step_forward(&mut self) {
        if !self.state.is_initialized || self.state.transition_in_progress {
            return;
        }
        match self.state.active_index {
            Some(i) if i + 1 < self.steps.len() => {
                // In range, checked above.
                let _ = self.highlight_step(i + 1);
            }
            _ => self.teardown(),
        }
    }

    fn previous_gated(&mut self) {
        if !self.state.is_initialized || self.state.transition_in_progress {
            tracing::debug!(target: "waymark.driver", "previous ignored");
            return;
        }
        if !self.has_previous_step() {
            return;
        }
        let step = self.state.active_step.clone().unwrap_or_default();
        let hook = step
            .popover
            .as_ref()
            .and_then(|p| p.on_prev_click.as_ref())
            .or(self.hooks.on_prev_click.as_ref());
        if self.fire("on_prev_click", hook, self.state.active_element, &step) == HookFlow::Cancel {
            tracing::debug!(target: "waymark.driver", "previous cancelled by hook");
            return;
        }
        self.step_back();
    }

    fn step_back(&mut self) {
        if !self.state.is_initialized || self.state.transition_in_progress {
            return;
        }
        if let Some(i) = self.state.active_index.filter(|i| *i > 0) {
            let _ = self.highlight_step(i - 1);
        }
    }

    fn close_gated(&mut self) {
        if !self.state.is_initialized {
            return;
        }
        let step = self.state.active_step.clone().unwrap_or_default();
        let hook = step
            .popover
            .as_ref()
            .and_then(|p| p.on_close_click.as_ref())
            .or(self.hooks.on_close_click.as_ref());
        if self.fire("on_close_click", hook, self.state.active_element, &step) == HookFlow::Cancel {
            tracing::debug!(target: "waymark.driver", "close cancelled by hook");
            return;
        }
        self.destroy_gated();
    }

    fn destroy_gated(&mut self) {
        if !self.state.is_initialized {
            return;
        }
        let step = self.state.active_step.clone().unwrap_or_default();
        let hook = self.hooks.on_destroy_started.as_ref();
        if self.fire("on_destroy_started", hook, self.state.active_element, &step)
            == HookFlow::Cancel
        {
            tracing::debug!(target: "waymark.driver", "destroy cancelled by hook");
            return;
        }
        self.teardown();
    }

    fn teardown(&mut self) {
        if !self.state.is_initialized {
            return;
        }
        self.deselect_active();

        let element = self.state.active_element;
        let step = self.state.active_step.clone().unwrap_or_default();
        let focus = self.state.focused_before_activation;

        self.popover.destroy(&mut self.page);
        self.scrim.destroy(&mut self.page);
        self.highlight.destroy(&mut self.page);
        self.styles.release_all(&mut self.page);
        self.scheduler.clear();
        self.bus.clear();
        self.handle.clear();
        self.state = TourState::default();
        self.generation += 1;
        tracing::debug!(target: "waymark.driver", "tour destroyed");

        let _ = self.fire("on_destroyed", self.hooks.on_destroyed.as_ref(), element, &step);

        if let Some(el) = focus.filter(|el| self.page.is_connected(*el)) {
            if let Err(err) = self.page.focus(el) {
                tracing::debug!(
                    target: "waymark.driver",
                    element = el.raw(),
                    error = %err,
                    "could not restore focus"
                );
            }
        }
    }

    fn run_pending(&mut self, pending: Pending) {
        match pending {
            Pending::Handle(Command::MoveNext) => self.step_forward(),
            Pending::Handle(Command::MovePrevious) => self.step_back(),
            Pending::Handle(Command::MoveTo(index)) => {
                if let Err(err) = self.highlight_step(index) {
                    tracing::warn!(target: "waymark.driver", error = %err, "queued move failed");
                }
            }
            Pending::Handle(Command::Refresh) => self.refresh_now(),
            Pending::Handle(Command::Destroy) => self.teardown(),
            Pending::Next => self.next_gated(),
            Pending::Previous => self.previous_gated(),
            Pending::Close => {
                if self.options.allow_close {
                    self.close_gated();
                }
            }
            Pending::Overlay => match self.options.overlay_click_behavior {
                OverlayClickBehavior::Close if self.options.allow_close => self.destroy_gated(),
                OverlayClickBehavior::Close => {}
                OverlayClickBehavior::NextStep => self.next_gated(),
            },
            Pending::Escape => {
                if self.options.allow_close {
                    self.destroy_gated();
                }
            }
        }
    }

    fn drain_queue(&mut self) {
        if self.draining {
            return;
        }
        self.draining = true;
        while let Some(pending) = self.handle.pop() {
            tracing::trace!(target: "waymark.driver", ?pending, "running queued command");
            self.run_pending(pending);
        }
        self.draining = false;
    }
}

impl<P: Page> Pump for Driver<P> {
    fn advance(&mut self, dt: Duration) {
        Driver::advance(self, dt);
    }

    fn animation_frame(&mut self) {
        Driver::animation_frame(self);
    }
}

impl<P: Page> fmt::Debug for Driver<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Driver")
            .field("style_id", &self.style_id)
            .field("steps", &self.steps.len())
            .field("state", &self.state)
            .field("layers", &self.layers)
            .field("hooks", &self.hooks)
            .finish_non_exhaustive()
    }
}
