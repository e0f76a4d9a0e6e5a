#![forbid(unsafe_code)]

//! The host page contract.
//!
//! Waymark never touches a real document. Everything it needs from the page
//! (lookup, geometry, computed style, node creation, focus, scrolling) goes
//! through [`Page`], which the embedding environment implements. Stacking
//! discovery only needs the narrower [`StyleSource`] so it can be exercised
//! against synthetic ancestor chains.

use serde::{Deserialize, Serialize};

use crate::content::PopoverContent;
use crate::geometry::{Rect, Size};

/// Opaque handle to a node owned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(u64);

impl ElementId {
    /// Wrap a host-assigned identifier.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The host-assigned identifier.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// CSS `position` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CssPosition {
    #[default]
    Static,
    Relative,
    Absolute,
    Fixed,
    Sticky,
}

impl CssPosition {
    /// Anything other than `static`.
    #[must_use]
    pub const fn is_positioned(self) -> bool {
        !matches!(self, Self::Static)
    }

    /// CSS keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Relative => "relative",
            Self::Absolute => "absolute",
            Self::Fixed => "fixed",
            Self::Sticky => "sticky",
        }
    }
}

/// CSS `z-index` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ZIndex {
    #[default]
    Auto,
    Value(i32),
}

impl ZIndex {
    /// The explicit numeric value, if any.
    #[must_use]
    pub const fn value(self) -> Option<i32> {
        match self {
            Self::Auto => None,
            Self::Value(v) => Some(v),
        }
    }
}

/// The subset of computed style that layering and scrolling decisions read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ComputedStyle {
    pub position: CssPosition,
    pub z_index: ZIndex,
    /// `transform` is something other than `none`/identity.
    pub has_transform: bool,
}

impl ComputedStyle {
    /// Style with only a position set.
    #[must_use]
    pub const fn positioned(position: CssPosition) -> Self {
        Self {
            position,
            z_index: ZIndex::Auto,
            has_transform: false,
        }
    }

    /// Set an explicit z-index.
    #[must_use]
    pub const fn with_z(mut self, z: i32) -> Self {
        self.z_index = ZIndex::Value(z);
        self
    }

    /// Mark the element as transformed.
    #[must_use]
    pub const fn with_transform(mut self) -> Self {
        self.has_transform = true;
        self
    }
}

/// Read-only style and ancestry access.
pub trait StyleSource {
    /// Parent element, `None` at the document root.
    fn parent(&self, element: ElementId) -> Option<ElementId>;

    /// Computed style of an element.
    fn computed_style(&self, element: ElementId) -> ComputedStyle;
}

/// How a scroll request should animate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Smooth,
    Instant,
}

/// The overlay nodes Waymark asks the host to construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Full-viewport scrim shape (an SVG with a single path in a browser host).
    Scrim,
    /// Floating popover panel.
    Popover,
    /// Directional arrow inside the popover.
    PopoverArrow,
    /// Zero-size anchor used when a step has no element.
    Placeholder,
}

/// CSS length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    Px(f64),
    Percent(f64),
    Auto,
}

/// CSS `display`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Display {
    None,
    Block,
}

/// CSS `pointer-events`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvents {
    None,
    Auto,
}

/// A partial inline style update. `None` fields are left untouched.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NodeStyle {
    pub position: Option<CssPosition>,
    pub top: Option<Length>,
    pub left: Option<Length>,
    pub right: Option<Length>,
    pub bottom: Option<Length>,
    pub width: Option<Length>,
    pub height: Option<Length>,
    pub transform: Option<String>,
    pub display: Option<Display>,
    pub z_index: Option<i32>,
    pub opacity: Option<f64>,
    pub pointer_events: Option<PointerEvents>,
}

impl NodeStyle {
    /// Overlay `other` on top of `self`, keeping fields `other` leaves unset.
    pub fn merge(&mut self, other: &NodeStyle) {
        macro_rules! take {
            ($($field:ident),*) => {
                $(if other.$field.is_some() {
                    self.$field = other.$field.clone();
                })*
            };
        }
        take!(
            position,
            top,
            left,
            right,
            bottom,
            width,
            height,
            transform,
            display,
            z_index,
            opacity,
            pointer_events
        );
    }
}

/// Which popover button was activated or is being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonKind {
    Next,
    Previous,
    Close,
}

/// Host-side failure for effectful page calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageError {
    /// The element is no longer attached to the document.
    Detached(ElementId),
    /// The element exists but refused the operation.
    Rejected(String),
}

impl std::fmt::Display for PageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Detached(id) => write!(f, "element {} is detached", id.raw()),
            Self::Rejected(msg) => write!(f, "rejected: {msg}"),
        }
    }
}

impl std::error::Error for PageError {}

/// Everything the tour needs from the embedding page.
pub trait Page: StyleSource {
    /// Current viewport size.
    fn viewport(&self) -> Size;

    /// Resolve a CSS selector to the first matching element.
    fn query_selector(&self, selector: &str) -> Option<ElementId>;

    /// Viewport-relative bounding box, `None` when the element is detached.
    fn bounding_rect(&self, element: ElementId) -> Option<Rect>;

    /// Every element in the document, in tree order.
    fn elements(&self) -> Vec<ElementId>;

    /// Whether the element is still attached to the document.
    fn is_connected(&self, element: ElementId) -> bool;

    /// The currently focused element.
    fn active_element(&self) -> Option<ElementId>;

    /// Move focus to an element.
    fn focus(&mut self, element: ElementId) -> Result<(), PageError>;

    /// Ask the page to scroll an element into view (centered).
    fn scroll_into_view(&mut self, element: ElementId, behavior: ScrollBehavior);

    /// Construct an overlay node and attach it to the document body.
    fn create_node(&mut self, kind: NodeKind) -> ElementId;

    /// Detach and drop an overlay node.
    fn remove_node(&mut self, node: ElementId);

    /// Apply a partial inline style.
    fn apply_style(&mut self, node: ElementId, style: &NodeStyle);

    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str);

    fn remove_attribute(&mut self, element: ElementId, name: &str);

    fn add_class(&mut self, element: ElementId, class: &str);

    fn remove_class(&mut self, element: ElementId, class: &str);

    /// Redraw the scrim shape. `path` is an SVG path in viewport units,
    /// filled with the even-odd rule.
    fn draw_scrim(&mut self, node: ElementId, viewport: Size, path: &str);

    /// Replace the popover's content and return its laid-out size.
    ///
    /// The node is hidden while this runs; the host must lay it out so the
    /// returned size is the size it will have once shown.
    fn render_popover(&mut self, node: ElementId, content: &PopoverContent) -> Size;

    /// Insert a style sheet under a stable identifier.
    fn inject_styles(&mut self, id: &str, css: &str);

    /// Remove a style sheet previously inserted under `id`.
    fn remove_styles(&mut self, id: &str);
}
