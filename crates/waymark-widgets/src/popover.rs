#![forbid(unsafe_code)]

//! The floating popover panel and its arrow.
//!
//! [`Popover`] owns two host nodes: the panel and the arrow inside it. A
//! render pass hides the panel, hands the content to the host to lay out,
//! measures it, then places it with [`waymark_layout::place`]. Only the
//! panel and arrow nodes are ever styled; the target element is left alone.
//!
//! # Differences from the scrim
//!
//! - **Anchored**: follows the target rectangle rather than covering the
//!   viewport.
//! - **Modal fallback**: with no target the panel is centered and the arrow
//!   is hidden.

use waymark_core::{
    CssPosition, Display, ElementId, Length, NodeKind, NodeStyle, Page, Point, PopoverContent,
    Rect, Size,
};
use waymark_layout::{ARROW_SIZE, Align, DEFAULT_OFFSET, Placement, PlacementRequest, Side, place};

/// DOM id of the panel, referenced by `aria-controls`.
pub const POPOVER_ID: &str = "waymark-popover-content";
/// Class carried by the panel.
pub const POPOVER_CLASS: &str = "waymark-popover";
/// Class carried by the arrow.
pub const ARROW_CLASS: &str = "waymark-popover-arrow";

/// Placement preferences for one render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopoverLayout {
    /// Forced side, or automatic.
    pub side: Option<Side>,
    pub align: Align,
    /// Gap between target and panel.
    pub offset: f64,
}

impl Default for PopoverLayout {
    fn default() -> Self {
        Self {
            side: None,
            align: Align::Center,
            offset: DEFAULT_OFFSET,
        }
    }
}

fn arrow_side_class(side: Side) -> String {
    format!("{ARROW_CLASS}-side-{}", side.as_str())
}

fn arrow_align_class(align: Align) -> String {
    format!("{ARROW_CLASS}-align-{}", align.as_str())
}

fn hidden() -> NodeStyle {
    NodeStyle {
        display: Some(Display::None),
        ..NodeStyle::default()
    }
}

/// Owner of the popover panel.
#[derive(Debug)]
pub struct Popover {
    node: Option<ElementId>,
    arrow: Option<ElementId>,
    z_index: i32,
    size: Size,
    layout: PopoverLayout,
    placement: Option<Placement>,
    content: Option<PopoverContent>,
    visible: bool,
    custom_classes: Vec<String>,
    arrow_classes: Vec<String>,
}

impl Popover {
    #[must_use]
    pub fn new(z_index: i32) -> Self {
        Self {
            node: None,
            arrow: None,
            z_index,
            size: Size::ZERO,
            layout: PopoverLayout::default(),
            placement: None,
            content: None,
            visible: false,
            custom_classes: Vec::new(),
            arrow_classes: Vec::new(),
        }
    }

    #[must_use]
    pub const fn node(&self) -> Option<ElementId> {
        self.node
    }

    #[must_use]
    pub const fn arrow_node(&self) -> Option<ElementId> {
        self.arrow
    }

    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// The last computed placement.
    #[must_use]
    pub const fn placement(&self) -> Option<Placement> {
        self.placement
    }

    /// The size measured on the last render.
    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// The content shown by the last render.
    #[must_use]
    pub fn content(&self) -> Option<&PopoverContent> {
        self.content.as_ref()
    }

    pub fn set_z_index(&mut self, z_index: i32) {
        self.z_index = z_index;
    }

    fn ensure_nodes<P: Page + ?Sized>(&mut self, page: &mut P) -> (ElementId, ElementId) {
        if let (Some(node), Some(arrow)) = (self.node, self.arrow) {
            return (node, arrow);
        }
        let node = page.create_node(NodeKind::Popover);
        page.set_attribute(node, "id", POPOVER_ID);
        page.set_attribute(node, "role", "dialog");
        page.add_class(node, POPOVER_CLASS);
        let arrow = page.create_node(NodeKind::PopoverArrow);
        page.add_class(arrow, ARROW_CLASS);
        tracing::debug!(target: "waymark.popover", node = node.raw(), "popover mounted");
        self.node = Some(node);
        self.arrow = Some(arrow);
        (node, arrow)
    }

    /// Hide the panel without unmounting it.
    pub fn hide<P: Page + ?Sized>(&mut self, page: &mut P) {
        if let Some(node) = self.node {
            page.apply_style(node, &hidden());
        }
        self.visible = false;
    }

    /// Render `content` and place the panel next to `target`.
    ///
    /// `target` is the anchor's bounding box, or `None` for a centered panel.
    pub fn render<P: Page + ?Sized>(
        &mut self,
        page: &mut P,
        content: PopoverContent,
        target: Option<Rect>,
        layout: PopoverLayout,
    ) -> Placement {
        let (node, _) = self.ensure_nodes(page);
        page.apply_style(node, &hidden());

        for class in self.custom_classes.drain(..) {
            page.remove_class(node, &class);
        }
        for class in content.class.split_whitespace() {
            page.add_class(node, class);
            self.custom_classes.push(class.to_owned());
        }

        self.size = page.render_popover(node, &content);
        self.content = Some(content);
        self.layout = layout;
        self.visible = true;
        self.position(page, target)
    }

    /// Re-place a visible panel against a new target rectangle.
    pub fn reposition<P: Page + ?Sized>(
        &mut self,
        page: &mut P,
        target: Option<Rect>,
    ) -> Option<Placement> {
        if !self.visible {
            return None;
        }
        Some(self.position(page, target))
    }

    fn position<P: Page + ?Sized>(&mut self, page: &mut P, target: Option<Rect>) -> Placement {
        let (node, arrow) = self.ensure_nodes(page);
        let request = PlacementRequest::new(target, self.size, page.viewport())
            .side(self.layout.side)
            .align(self.layout.align)
            .offset(self.layout.offset);
        let placement = place(&request);

        for class in self.arrow_classes.drain(..) {
            page.remove_class(arrow, &class);
        }

        let (panel_style, arrow_style) = match placement {
            Placement::Anchored {
                top,
                left,
                arrow: tip,
                align,
                ..
            } => {
                let side_class = arrow_side_class(tip.edge);
                let align_class = arrow_align_class(align);
                page.add_class(arrow, &side_class);
                page.add_class(arrow, &align_class);
                self.arrow_classes = vec![side_class, align_class];

                let half = ARROW_SIZE / 2.0;
                let (a_top, a_left) = match tip.edge {
                    Side::Top => (Length::Px(-half), Length::Px(tip.offset)),
                    Side::Bottom => (Length::Px(self.size.height - half), Length::Px(tip.offset)),
                    Side::Left => (Length::Px(tip.offset), Length::Px(-half)),
                    Side::Right => (Length::Px(tip.offset), Length::Px(self.size.width - half)),
                };
                (
                    NodeStyle {
                        position: Some(CssPosition::Fixed),
                        top: Some(Length::Px(top)),
                        left: Some(Length::Px(left)),
                        right: Some(Length::Auto),
                        bottom: Some(Length::Auto),
                        transform: Some("none".into()),
                        display: Some(Display::Block),
                        z_index: Some(self.z_index),
                        ..NodeStyle::default()
                    },
                    NodeStyle {
                        position: Some(CssPosition::Absolute),
                        top: Some(a_top),
                        left: Some(a_left),
                        display: Some(Display::Block),
                        ..NodeStyle::default()
                    },
                )
            }
            Placement::Centered => (
                NodeStyle {
                    position: Some(CssPosition::Fixed),
                    top: Some(Length::Percent(50.0)),
                    left: Some(Length::Percent(50.0)),
                    right: Some(Length::Auto),
                    bottom: Some(Length::Auto),
                    transform: Some("translate(-50%, -50%)".into()),
                    display: Some(Display::Block),
                    z_index: Some(self.z_index),
                    ..NodeStyle::default()
                },
                hidden(),
            ),
        };
        page.apply_style(node, &panel_style);
        page.apply_style(arrow, &arrow_style);

        tracing::debug!(
            target: "waymark.popover",
            side = placement.side().map(Side::as_str),
            width = self.size.width,
            height = self.size.height,
            "popover placed"
        );
        self.placement = Some(placement);
        placement
    }

    /// Whether a visible panel covers `point`.
    pub fn contains<P: Page + ?Sized>(&self, page: &P, point: Point) -> bool {
        self.visible
            && self
                .node
                .and_then(|node| page.bounding_rect(node))
                .is_some_and(|r| r.contains(point))
    }

    /// Whether `id` is the panel or its arrow.
    #[must_use]
    pub fn owns(&self, id: ElementId) -> bool {
        self.node == Some(id) || self.arrow == Some(id)
    }

    /// Unmount both nodes.
    pub fn destroy<P: Page + ?Sized>(&mut self, page: &mut P) {
        if let Some(arrow) = self.arrow.take() {
            page.remove_node(arrow);
        }
        if let Some(node) = self.node.take() {
            page.remove_node(node);
            tracing::debug!(target: "waymark.popover", node = node.raw(), "popover removed");
        }
        self.visible = false;
        self.placement = None;
        self.content = None;
        self.custom_classes.clear();
        self.arrow_classes.clear();
    }
}
