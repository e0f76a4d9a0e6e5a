#![forbid(unsafe_code)]

//! The page-wide scrim with a rounded hole over the highlighted element.
//!
//! # Invariants
//!
//! 1. At most one scrim node exists per [`Scrim`]; it is created lazily.
//! 2. The drawn hole never extends past the viewport.
//! 3. Clicks inside the hole are not the scrim's; they belong to the page.

use waymark_core::{
    CssPosition, Display, ElementId, Length, NodeKind, NodeStyle, Page, Point, PointerEvents, Size,
};
use waymark_layout::{Cutout, scrim_path};

/// Class carried by the scrim node.
pub const SCRIM_CLASS: &str = "waymark-overlay";
/// Class added when the scrim fades in.
pub const FADE_CLASS: &str = "waymark-fade";

/// Visual parameters of the scrim.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrimStyle {
    /// Fill color (any CSS color).
    pub color: String,
    /// Fill opacity in `[0, 1]`.
    pub opacity: f64,
    pub z_index: i32,
    /// Fade in on show.
    pub animate: bool,
}

impl Default for ScrimStyle {
    fn default() -> Self {
        Self {
            color: "#000".into(),
            opacity: 0.7,
            z_index: i32::MAX - 2,
            animate: true,
        }
    }
}

/// Owner of the scrim node.
#[derive(Debug, Default)]
pub struct Scrim {
    node: Option<ElementId>,
    style: ScrimStyle,
    viewport: Size,
    cutout: Option<Cutout>,
}

impl Scrim {
    #[must_use]
    pub fn new(style: ScrimStyle) -> Self {
        Self {
            style,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn node(&self) -> Option<ElementId> {
        self.node
    }

    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.node.is_some()
    }

    #[must_use]
    pub const fn style(&self) -> &ScrimStyle {
        &self.style
    }

    /// The last cutout requested, before viewport clamping.
    #[must_use]
    pub const fn cutout(&self) -> Option<Cutout> {
        self.cutout
    }

    /// The hole as drawn.
    #[must_use]
    pub fn visible_hole(&self) -> Option<Cutout> {
        self.cutout
            .map(|c| c.clamp_to(self.viewport))
            .filter(|c| !c.is_empty())
    }

    fn node_style(&self) -> NodeStyle {
        NodeStyle {
            position: Some(CssPosition::Fixed),
            top: Some(Length::Px(0.0)),
            left: Some(Length::Px(0.0)),
            width: Some(Length::Percent(100.0)),
            height: Some(Length::Percent(100.0)),
            display: Some(Display::Block),
            z_index: Some(self.style.z_index),
            opacity: Some(self.style.opacity),
            pointer_events: Some(PointerEvents::Auto),
            ..NodeStyle::default()
        }
    }

    /// Replace the visual parameters, restyling a live node.
    pub fn set_style<P: Page + ?Sized>(&mut self, page: &mut P, style: ScrimStyle) {
        self.style = style;
        if let Some(node) = self.node {
            page.set_attribute(node, "fill", &self.style.color);
            page.apply_style(node, &self.node_style());
            self.redraw(page);
        }
    }

    /// Mount (if needed) and display the scrim.
    pub fn show<P: Page + ?Sized>(&mut self, page: &mut P) -> ElementId {
        let node = match self.node {
            Some(node) => node,
            None => {
                let node = page.create_node(NodeKind::Scrim);
                page.add_class(node, SCRIM_CLASS);
                if self.style.animate {
                    page.add_class(node, FADE_CLASS);
                }
                page.set_attribute(node, "fill", &self.style.color);
                page.set_attribute(node, "fill-rule", "evenodd");
                page.set_attribute(node, "aria-hidden", "true");
                tracing::debug!(target: "waymark.scrim", node = node.raw(), "scrim mounted");
                self.node = Some(node);
                node
            }
        };
        page.apply_style(node, &self.node_style());
        self.viewport = page.viewport();
        self.redraw(page);
        node
    }

    /// Re-cut the hole, or fill the viewport when `cutout` is `None`.
    pub fn update_highlight<P: Page + ?Sized>(&mut self, page: &mut P, cutout: Option<Cutout>) {
        self.cutout = cutout;
        if self.node.is_some() {
            self.viewport = page.viewport();
            self.redraw(page);
        }
    }

    /// Pick up a new viewport size and redraw with the last cutout.
    pub fn handle_resize<P: Page + ?Sized>(&mut self, page: &mut P) {
        self.viewport = page.viewport();
        if self.node.is_some() {
            self.redraw(page);
        }
    }

    /// Whether a click at `point` landed on the dimmed region.
    #[must_use]
    pub fn route_click(&self, point: Point) -> bool {
        if self.node.is_none() {
            return false;
        }
        match self.visible_hole() {
            Some(hole) => !hole.rect().contains(point),
            None => true,
        }
    }

    /// Unmount the node and forget the cutout.
    pub fn destroy<P: Page + ?Sized>(&mut self, page: &mut P) {
        if let Some(node) = self.node.take() {
            page.remove_node(node);
            tracing::debug!(target: "waymark.scrim", node = node.raw(), "scrim removed");
        }
        self.cutout = None;
    }

    fn redraw<P: Page + ?Sized>(&self, page: &mut P) {
        let Some(node) = self.node else {
            return;
        };
        let path = scrim_path(self.viewport, self.cutout.as_ref());
        page.draw_scrim(node, self.viewport, &path);
        tracing::trace!(
            target: "waymark.scrim",
            hole = self.visible_hole().is_some(),
            "scrim drawn"
        );
    }
}
