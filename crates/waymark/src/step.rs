#![forbid(unsafe_code)]

//! Tour steps.

use std::fmt;
use std::rc::Rc;

use waymark_core::{ButtonKind, ElementId, Page};
use waymark_layout::{Align, Side};
use waymark_runtime::HookResult;

use crate::hooks::{Hook, HookContext, RenderContext, RenderHook};

/// Computes a step's element at highlight time.
pub type Resolver = Rc<dyn Fn(&dyn Page) -> Option<ElementId>>;

/// How a step finds its element.
#[derive(Clone)]
pub enum ElementTarget {
    /// First element matching a CSS selector.
    Selector(String),
    /// Computed when the step is highlighted.
    Resolver(Resolver),
    /// A known element.
    Element(ElementId),
}

impl fmt::Debug for ElementTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Selector(s) => f.debug_tuple("Selector").field(s).finish(),
            Self::Resolver(_) => f.write_str("Resolver(..)"),
            Self::Element(id) => f.debug_tuple("Element").field(id).finish(),
        }
    }
}

impl From<&str> for ElementTarget {
    fn from(selector: &str) -> Self {
        Self::Selector(selector.to_owned())
    }
}

impl From<String> for ElementTarget {
    fn from(selector: String) -> Self {
        Self::Selector(selector)
    }
}

impl From<ElementId> for ElementTarget {
    fn from(id: ElementId) -> Self {
        Self::Element(id)
    }
}

/// Popover content and per-step overrides of the global options.
#[derive(Clone, Default)]
pub struct PopoverSpec {
    pub title: String,
    pub description: String,
    pub side: Option<Side>,
    pub align: Option<Align>,
    pub show_buttons: Option<Vec<ButtonKind>>,
    pub disable_buttons: Option<Vec<ButtonKind>>,
    pub show_progress: Option<bool>,
    pub progress_text: Option<String>,
    pub next_btn_text: Option<String>,
    pub prev_btn_text: Option<String>,
    pub done_btn_text: Option<String>,
    pub popover_class: Option<String>,
    pub on_next_click: Option<Hook>,
    pub on_prev_click: Option<Hook>,
    pub on_close_click: Option<Hook>,
    pub on_popover_render: Option<RenderHook>,
}

impl PopoverSpec {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn side(mut self, side: Side) -> Self {
        self.side = Some(side);
        self
    }

    #[must_use]
    pub fn align(mut self, align: Align) -> Self {
        self.align = Some(align);
        self
    }

    #[must_use]
    pub fn show_buttons(mut self, buttons: impl Into<Vec<ButtonKind>>) -> Self {
        self.show_buttons = Some(buttons.into());
        self
    }

    #[must_use]
    pub fn disable_buttons(mut self, buttons: impl Into<Vec<ButtonKind>>) -> Self {
        self.disable_buttons = Some(buttons.into());
        self
    }

    #[must_use]
    pub fn show_progress(mut self, show: bool) -> Self {
        self.show_progress = Some(show);
        self
    }

    #[must_use]
    pub fn progress_text(mut self, text: impl Into<String>) -> Self {
        self.progress_text = Some(text.into());
        self
    }

    #[must_use]
    pub fn next_btn_text(mut self, text: impl Into<String>) -> Self {
        self.next_btn_text = Some(text.into());
        self
    }

    #[must_use]
    pub fn prev_btn_text(mut self, text: impl Into<String>) -> Self {
        self.prev_btn_text = Some(text.into());
        self
    }

    #[must_use]
    pub fn done_btn_text(mut self, text: impl Into<String>) -> Self {
        self.done_btn_text = Some(text.into());
        self
    }

    #[must_use]
    pub fn popover_class(mut self, class: impl Into<String>) -> Self {
        self.popover_class = Some(class.into());
        self
    }

    #[must_use]
    pub fn on_next_click<F>(mut self, f: F) -> Self
    where
        F: Fn(Option<ElementId>, &Step, &HookContext<'_>) -> HookResult + 'static,
    {
        self.on_next_click = Some(Rc::new(f));
        self
    }

    #[must_use]
    pub fn on_prev_click<F>(mut self, f: F) -> Self
    where
        F: Fn(Option<ElementId>, &Step, &HookContext<'_>) -> HookResult + 'static,
    {
        self.on_prev_click = Some(Rc::new(f));
        self
    }

    #[must_use]
    pub fn on_close_click<F>(mut self, f: F) -> Self
    where
        F: Fn(Option<ElementId>, &Step, &HookContext<'_>) -> HookResult + 'static,
    {
        self.on_close_click = Some(Rc::new(f));
        self
    }

    #[must_use]
    pub fn on_popover_render<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut RenderContext<'_>, &HookContext<'_>) -> HookResult + 'static,
    {
        self.on_popover_render = Some(Rc::new(f));
        self
    }
}

impl fmt::Debug for PopoverSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PopoverSpec")
            .field("title", &self.title)
            .field("description", &self.description)
            .field("side", &self.side)
            .field("align", &self.align)
            .finish_non_exhaustive()
    }
}

/// One stop of the tour.
#[derive(Clone, Default)]
pub struct Step {
    /// The element to highlight; `None` shows a centered popover over a
    /// fully dimmed page.
    pub element: Option<ElementTarget>,
    pub popover: Option<PopoverSpec>,
    pub on_highlight_started: Option<Hook>,
    pub on_highlighted: Option<Hook>,
    pub on_deselected: Option<Hook>,
}

impl Step {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn element(mut self, target: impl Into<ElementTarget>) -> Self {
        self.element = Some(target.into());
        self
    }

    #[must_use]
    pub fn resolver<F>(mut self, f: F) -> Self
    where
        F: Fn(&dyn Page) -> Option<ElementId> + 'static,
    {
        self.element = Some(ElementTarget::Resolver(Rc::new(f)));
        self
    }

    #[must_use]
    pub fn popover(mut self, popover: PopoverSpec) -> Self {
        self.popover = Some(popover);
        self
    }

    #[must_use]
    pub fn on_highlight_started<F>(mut self, f: F) -> Self
    where
        F: Fn(Option<ElementId>, &Step, &HookContext<'_>) -> HookResult + 'static,
    {
        self.on_highlight_started = Some(Rc::new(f));
        self
    }

    #[must_use]
    pub fn on_highlighted<F>(mut self, f: F) -> Self
    where
        F: Fn(Option<ElementId>, &Step, &HookContext<'_>) -> HookResult + 'static,
    {
        self.on_highlighted = Some(Rc::new(f));
        self
    }

    #[must_use]
    pub fn on_deselected<F>(mut self, f: F) -> Self
    where
        F: Fn(Option<ElementId>, &Step, &HookContext<'_>) -> HookResult + 'static,
    {
        self.on_deselected = Some(Rc::new(f));
        self
    }

    /// Shape check. Returns the reason the step is unusable.
    pub fn validate(&self) -> Result<(), String> {
        if self.element.is_none() && self.popover.is_none() {
            return Err("step has neither an element nor a popover".into());
        }
        if let Some(ElementTarget::Selector(s)) = &self.element {
            if s.trim().is_empty() {
                return Err("element selector is empty".into());
            }
        }
        let Some(popover) = &self.popover else {
            return Ok(());
        };
        if popover.progress_text.as_deref() == Some("") {
            return Err("progress text is empty".into());
        }
        for (name, label) in [
            ("next button text", &popover.next_btn_text),
            ("previous button text", &popover.prev_btn_text),
            ("done button text", &popover.done_btn_text),
        ] {
            if label.as_deref() == Some("") {
                return Err(format!("{name} is empty"));
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Step")
            .field("element", &self.element)
            .field("popover", &self.popover)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_step_is_invalid() {
        assert!(Step::new().validate().is_err());
    }

    #[test]
    fn popover_only_is_valid() {
        assert_eq!(Step::new().popover(PopoverSpec::new("Hi")).validate(), Ok(()));
    }

    #[test]
    fn blank_selector_is_invalid() {
        let err = Step::new().element("  ").validate();
        assert_eq!(err, Err("element selector is empty".into()));
    }

    #[test]
    fn empty_overrides_are_invalid() {
        let step = Step::new().popover(PopoverSpec::new("Hi").next_btn_text(""));
        assert_eq!(step.validate(), Err("next button text is empty".into()));
        let step = Step::new().popover(PopoverSpec::new("Hi").progress_text(""));
        assert!(step.validate().is_err());
    }

    #[test]
    fn element_targets_convert() {
        assert!(matches!(
            ElementTarget::from("#a"),
            ElementTarget::Selector(s) if s == "#a"
        ));
        assert!(matches!(
            ElementTarget::from(ElementId::new(4)),
            ElementTarget::Element(id) if id == ElementId::new(4)
        ));
        let step = Step::new().resolver(|_| None);
        assert_eq!(format!("{:?}", step.element), "Some(Resolver(..))");
    }
}
