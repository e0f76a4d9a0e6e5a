#![forbid(unsafe_code)]

//! Tracking and marking the highlighted element.
//!
//! [`HighlightCoordinator`] decides what the tour anchors to (the step's
//! element, or a centered placeholder when there is none), scrolls the
//! element into view when smooth scrolling is on, and tags it with the active class and ARIA attributes.
//! Cutout recomputation is deferred by the caller by [`SETTLE_FRAMES`]
//! animation frames so layout shifts from scrolling have landed.

use waymark_core::{
    CssPosition, Display, ElementId, Length, NodeKind, NodeStyle, Page, PointerEvents,
    ScrollBehavior,
};
use waymark_layout::{Cutout, has_fixed_ancestor};

use crate::popover::POPOVER_ID;

/// Frame boundaries to wait before re-cutting the scrim.
pub const SETTLE_FRAMES: u32 = 2;
/// Class added to the highlighted element.
pub const ACTIVE_CLASS: &str = "waymark-active-element";
/// Class making the highlighted element ignore pointer input.
pub const NO_INTERACTION_CLASS: &str = "waymark-no-interaction";

const ARIA_ATTRIBUTES: [&str; 3] = ["aria-haspopup", "aria-expanded", "aria-controls"];

/// Per-highlight options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HighlightOptions {
    pub smooth_scroll: bool,
    pub disable_interaction: bool,
    /// Space between element and hole edge.
    pub padding: f64,
    /// Hole corner radius.
    pub radius: f64,
}

impl Default for HighlightOptions {
    fn default() -> Self {
        Self {
            smooth_scroll: false,
            disable_interaction: false,
            padding: 10.0,
            radius: 5.0,
        }
    }
}

/// Owner of the active-element marking and the placeholder anchor.
#[derive(Debug, Default)]
pub struct HighlightCoordinator {
    placeholder: Option<ElementId>,
    marked: Option<ElementId>,
    anchor: Option<ElementId>,
}

impl HighlightCoordinator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// What the tour is currently anchored to.
    #[must_use]
    pub const fn anchor(&self) -> Option<ElementId> {
        self.anchor
    }

    #[must_use]
    pub const fn placeholder(&self) -> Option<ElementId> {
        self.placeholder
    }

    /// The element carrying the active class, if any.
    #[must_use]
    pub const fn marked(&self) -> Option<ElementId> {
        self.marked
    }

    /// Whether the anchor is the placeholder.
    #[must_use]
    pub fn is_placeholder_anchor(&self) -> bool {
        self.anchor.is_some() && self.anchor == self.placeholder
    }

    /// Anchor to `element`, or to the placeholder when `None`.
    ///
    /// Returns the anchor.
    pub fn highlight<P: Page + ?Sized>(
        &mut self,
        page: &mut P,
        element: Option<ElementId>,
        options: HighlightOptions,
    ) -> ElementId {
        self.unmark(page);
        let anchor = match element {
            Some(el) => {
                if options.smooth_scroll {
                    bring_into_view(page, el);
                }
                self.mark(page, el, options);
                el
            }
            None => self.ensure_placeholder(page),
        };
        self.anchor = Some(anchor);
        tracing::debug!(
            target: "waymark.highlight",
            anchor = anchor.raw(),
            placeholder = element.is_none(),
            "anchor set"
        );
        anchor
    }

    fn ensure_placeholder<P: Page + ?Sized>(&mut self, page: &mut P) -> ElementId {
        if let Some(node) = self.placeholder.filter(|n| page.is_connected(*n)) {
            return node;
        }
        let node = page.create_node(NodeKind::Placeholder);
        page.apply_style(
            node,
            &NodeStyle {
                position: Some(CssPosition::Fixed),
                top: Some(Length::Percent(50.0)),
                left: Some(Length::Percent(50.0)),
                width: Some(Length::Px(0.0)),
                height: Some(Length::Px(0.0)),
                display: Some(Display::Block),
                opacity: Some(0.0),
                pointer_events: Some(PointerEvents::None),
                ..NodeStyle::default()
            },
        );
        self.placeholder = Some(node);
        node
    }

    fn mark<P: Page + ?Sized>(&mut self, page: &mut P, el: ElementId, options: HighlightOptions) {
        page.add_class(el, ACTIVE_CLASS);
        if options.disable_interaction {
            page.add_class(el, NO_INTERACTION_CLASS);
        }
        page.set_attribute(el, "aria-haspopup", "dialog");
        page.set_attribute(el, "aria-expanded", "true");
        page.set_attribute(el, "aria-controls", POPOVER_ID);
        self.marked = Some(el);
    }

    /// Remove the active class and ARIA attributes from the marked element.
    pub fn unmark<P: Page + ?Sized>(&mut self, page: &mut P) {
        if let Some(el) = self.marked.take() {
            page.remove_class(el, ACTIVE_CLASS);
            page.remove_class(el, NO_INTERACTION_CLASS);
            for attr in ARIA_ATTRIBUTES {
                page.remove_attribute(el, attr);
            }
        }
    }

    /// The hole for the current anchor.
    ///
    /// `None` when anchored to the placeholder (the page is fully dimmed)
    /// or when the element has left the document.
    pub fn cutout<P: Page + ?Sized>(&self, page: &P, options: HighlightOptions) -> Option<Cutout> {
        let anchor = self.anchor?;
        if self.is_placeholder_anchor() {
            return None;
        }
        let rect = page.bounding_rect(anchor)?;
        Some(Cutout::around(rect, options.padding, options.radius))
    }

    /// Drop the marking and the placeholder.
    pub fn destroy<P: Page + ?Sized>(&mut self, page: &mut P) {
        self.unmark(page);
        if let Some(node) = self.placeholder.take() {
            page.remove_node(node);
        }
        self.anchor = None;
    }
}

/// Scroll `element` into view when it is not already fully visible.
///
/// Smooth unless the element is larger than the viewport. Skipped for fixed
/// elements. Returns the behavior used, if any.
pub fn bring_into_view<P: Page + ?Sized>(
    page: &mut P,
    element: ElementId,
) -> Option<ScrollBehavior> {
    if has_fixed_ancestor(&*page, element) {
        return None;
    }
    let rect = page.bounding_rect(element)?;
    let viewport = page.viewport();
    if rect.is_within(viewport) {
        return None;
    }
    let fits = rect.width <= viewport.width && rect.height <= viewport.height;
    let behavior = if fits {
        ScrollBehavior::Smooth
    } else {
        ScrollBehavior::Instant
    };
    tracing::debug!(
        target: "waymark.highlight",
        element = element.raw(),
        ?behavior,
        "scrolling element into view"
    );
    page.scroll_into_view(element, behavior);
    Some(behavior)
}

#[cfg(test)]
mod tests {
    use super::*;
    use waymark_core::{ComputedStyle, Rect};
    use waymark_harness::{ElementSpec, FakePage};

    fn page() -> FakePage {
        FakePage::new(800.0, 600.0)
    }

    #[test]
    fn marks_and_unmarks() {
        let mut page = page();
        let a = page.add(ElementSpec::new().rect(10.0, 10.0, 50.0, 50.0));
        let b = page.add(ElementSpec::new().rect(100.0, 10.0, 50.0, 50.0));
        let mut hc = HighlightCoordinator::new();
        hc.highlight(&mut page, Some(a), HighlightOptions::default());
        assert!(page.has_class(a, ACTIVE_CLASS));
        assert_eq!(page.attribute(a, "aria-haspopup"), Some("dialog"));
        assert_eq!(page.attribute(a, "aria-controls"), Some(POPOVER_ID));

        hc.highlight(&mut page, Some(b), HighlightOptions::default());
        assert!(!page.has_class(a, ACTIVE_CLASS));
        assert_eq!(page.attribute(a, "aria-expanded"), None);
        assert!(page.has_class(b, ACTIVE_CLASS));
        assert_eq!(hc.marked(), Some(b));
    }

    #[test]
    fn disable_interaction_class() {
        let mut page = page();
        let a = page.add(ElementSpec::new().rect(10.0, 10.0, 50.0, 50.0));
        let mut hc = HighlightCoordinator::new();
        let options = HighlightOptions {
            disable_interaction: true,
            ..HighlightOptions::default()
        };
        hc.highlight(&mut page, Some(a), options);
        assert!(page.has_class(a, NO_INTERACTION_CLASS));
        hc.unmark(&mut page);
        assert!(!page.has_class(a, NO_INTERACTION_CLASS));
    }

    #[test]
    fn placeholder_is_reused_and_fully_dims() {
        let mut page = page();
        let mut hc = HighlightCoordinator::new();
        let p1 = hc.highlight(&mut page, None, HighlightOptions::default());
        let p2 = hc.highlight(&mut page, None, HighlightOptions::default());
        assert_eq!(p1, p2);
        assert!(hc.is_placeholder_anchor());
        assert_eq!(page.nodes_of_kind(NodeKind::Placeholder).len(), 1);
        assert_eq!(page.bounding_rect(p1), Some(Rect::new(400.0, 300.0, 0.0, 0.0)));
        assert_eq!(hc.cutout(&page, HighlightOptions::default()), None);

        hc.destroy(&mut page);
        assert_eq!(page.node_of_kind(NodeKind::Placeholder), None);
        assert_eq!(hc.anchor(), None);
    }

    #[test]
    fn cutout_uses_padding_and_radius() {
        let mut page = page();
        let a = page.add(ElementSpec::new().rect(100.0, 100.0, 40.0, 20.0));
        let mut hc = HighlightCoordinator::new();
        let options = HighlightOptions {
            padding: 4.0,
            radius: 3.0,
            ..HighlightOptions::default()
        };
        hc.highlight(&mut page, Some(a), options);
        let c = hc.cutout(&page, options);
        assert_eq!(c.map(|c| c.rect()), Some(Rect::new(96.0, 96.0, 48.0, 28.0)));
        assert_eq!(c.map(|c| c.radius), Some(3.0));
        page.detach(a);
        assert_eq!(hc.cutout(&page, options), None);
    }

    #[test]
    fn scroll_only_when_out_of_view() {
        let mut page = page();
        let visible = page.add(ElementSpec::new().rect(10.0, 10.0, 50.0, 50.0));
        let below = page.add(ElementSpec::new().rect(10.0, 900.0, 50.0, 50.0));
        let huge = page.add(ElementSpec::new().rect(0.0, 100.0, 50.0, 900.0));
        assert_eq!(bring_into_view(&mut page, visible), None);
        assert_eq!(bring_into_view(&mut page, below), Some(ScrollBehavior::Smooth));
        assert_eq!(bring_into_view(&mut page, huge), Some(ScrollBehavior::Instant));
        assert_eq!(page.scrolls().len(), 2);
    }

    #[test]
    fn highlight_scrolls_only_with_smooth_scroll() {
        let mut page = page();
        let below = page.add(ElementSpec::new().rect(10.0, 900.0, 50.0, 50.0));
        let mut hc = HighlightCoordinator::new();
        hc.highlight(&mut page, Some(below), HighlightOptions::default());
        assert!(page.scrolls().is_empty());

        let smooth = HighlightOptions {
            smooth_scroll: true,
            ..HighlightOptions::default()
        };
        hc.highlight(&mut page, Some(below), smooth);
        assert_eq!(page.scrolls(), &[(below, ScrollBehavior::Smooth)]);
    }

    #[test]
    fn fixed_elements_never_scroll() {
        let mut page = page();
        let bar = page.add(
            ElementSpec::new()
                .rect(0.0, 700.0, 800.0, 40.0)
                .style(ComputedStyle::positioned(CssPosition::Fixed)),
        );
        let child = page.add(ElementSpec::new().parent(bar).rect(0.0, 700.0, 40.0, 40.0));
        assert_eq!(bring_into_view(&mut page, child), None);
        assert!(page.scrolls().is_empty());
    }
}
