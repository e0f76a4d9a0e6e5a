#![forbid(unsafe_code)]

//! Lifecycle hooks.
//!
//! Every hook receives the element involved (if any), the step, and a
//! [`HookContext`] with read access to the options and state plus a
//! [`DriverHandle`] for queuing follow-up navigation. Returning
//! [`HookFlow::Cancel`] from a gating hook (`on_next_click`,
//! `on_prev_click`, `on_close_click`, `on_destroy_started`) aborts that
//! operation; other hooks' flow is ignored.

use std::fmt;
use std::rc::Rc;

use waymark_core::{ElementId, PopoverContent, Rect};
use waymark_runtime::{HookFlow, HookResult};
use waymark_widgets::PopoverLayout;

use crate::config::Options;
use crate::handle::DriverHandle;
use crate::state::TourState;
use crate::step::Step;

/// What a hook can see.
pub struct HookContext<'a> {
    pub config: &'a Options,
    pub state: &'a TourState,
    pub driver: &'a DriverHandle,
}

/// Mutable view handed to `on_popover_render` before the panel is measured.
///
/// The target geometry is final; the panel's own position is computed from
/// `layout` once the edited content has been measured.
pub struct RenderContext<'a> {
    pub content: &'a mut PopoverContent,
    /// The step's element, `None` for a centered popover.
    pub target: Option<ElementId>,
    /// Bounding rect the panel will be placed against.
    pub target_rect: Option<Rect>,
    /// Placement preferences; edits apply to this render.
    pub layout: PopoverLayout,
    pub step: &'a Step,
}

/// Element/step lifecycle hook.
pub type Hook = Rc<dyn Fn(Option<ElementId>, &Step, &HookContext<'_>) -> HookResult>;

/// Popover render hook.
pub type RenderHook = Rc<dyn Fn(&mut RenderContext<'_>, &HookContext<'_>) -> HookResult>;

/// Wrap a closure as a [`Hook`].
pub fn hook<F>(f: F) -> Hook
where
    F: Fn(Option<ElementId>, &Step, &HookContext<'_>) -> HookResult + 'static,
{
    Rc::new(f)
}

/// Wrap a closure as a [`RenderHook`].
pub fn render_hook<F>(f: F) -> RenderHook
where
    F: Fn(&mut RenderContext<'_>, &HookContext<'_>) -> HookResult + 'static,
{
    Rc::new(f)
}

/// A hook that always cancels.
#[must_use]
pub fn cancel() -> Hook {
    hook(|_, _, _| Ok(HookFlow::Cancel))
}

/// Global hooks. Step-level hooks of the same name take precedence.
#[derive(Clone, Default)]
pub struct Hooks {
    pub on_highlight_started: Option<Hook>,
    pub on_highlighted: Option<Hook>,
    pub on_deselected: Option<Hook>,
    pub on_destroy_started: Option<Hook>,
    pub on_destroyed: Option<Hook>,
    pub on_next_click: Option<Hook>,
    pub on_prev_click: Option<Hook>,
    pub on_close_click: Option<Hook>,
    pub on_popover_render: Option<RenderHook>,
}

macro_rules! hook_setters {
    ($($name:ident),* $(,)?) => {
        $(
            #[must_use]
            pub fn $name<F>(mut self, f: F) -> Self
            where
                F: Fn(Option<ElementId>, &Step, &HookContext<'_>) -> HookResult + 'static,
            {
                self.$name = Some(Rc::new(f));
                self
            }
        )*
    };
}

impl Hooks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    hook_setters!(
        on_highlight_started,
        on_highlighted,
        on_deselected,
        on_destroy_started,
        on_destroyed,
        on_next_click,
        on_prev_click,
        on_close_click,
    );

    #[must_use]
    pub fn on_popover_render<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut RenderContext<'_>, &HookContext<'_>) -> HookResult + 'static,
    {
        self.on_popover_render = Some(Rc::new(f));
        self
    }
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let set = [
            ("on_highlight_started", self.on_highlight_started.is_some()),
            ("on_highlighted", self.on_highlighted.is_some()),
            ("on_deselected", self.on_deselected.is_some()),
            ("on_destroy_started", self.on_destroy_started.is_some()),
            ("on_destroyed", self.on_destroyed.is_some()),
            ("on_next_click", self.on_next_click.is_some()),
            ("on_prev_click", self.on_prev_click.is_some()),
            ("on_close_click", self.on_close_click.is_some()),
            ("on_popover_render", self.on_popover_render.is_some()),
        ];
        f.debug_list()
            .entries(set.iter().filter(|(_, on)| *on).map(|(name, _)| name))
            .finish()
    }
}
