#![forbid(unsafe_code)]

//! [`FakePage`]: an in-memory document implementing [`Page`].
//!
//! Elements are registered up front with a selector, a bounding box, and a
//! computed style. Overlay nodes the tour creates get a bounding box derived
//! from their inline style, close enough to a browser for placement and
//! hit-testing assertions. Every effect is recorded so tests can inspect it.

use std::collections::{BTreeMap, BTreeSet};

use waymark_core::{
    ComputedStyle, CssPosition, Display, ElementId, Length, NodeKind, NodeStyle, Page, PageError,
    PopoverContent, Rect, ScrollBehavior, Size, StyleSource, ZIndex,
};

/// Popover size reported when a test does not set one.
pub const DEFAULT_POPOVER_SIZE: Size = Size::new(240.0, 120.0);

/// Description of a page element for [`FakePage::add`].
#[derive(Debug, Clone, Default)]
pub struct ElementSpec {
    selectors: Vec<String>,
    rect: Rect,
    style: ComputedStyle,
    parent: Option<ElementId>,
}

impl ElementSpec {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A selector that resolves to this element (exact match, e.g. `#btn`).
    #[must_use]
    pub fn selector(mut self, selector: impl Into<String>) -> Self {
        self.selectors.push(selector.into());
        self
    }

    #[must_use]
    pub fn rect(mut self, x: f64, y: f64, width: f64, height: f64) -> Self {
        self.rect = Rect::new(x, y, width, height);
        self
    }

    #[must_use]
    pub fn style(mut self, style: ComputedStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn parent(mut self, parent: ElementId) -> Self {
        self.parent = Some(parent);
        self
    }
}

/// One element of the fake document.
#[derive(Debug, Clone)]
pub struct FakeElement {
    pub selectors: Vec<String>,
    pub parent: Option<ElementId>,
    pub rect: Rect,
    pub style: ComputedStyle,
    pub connected: bool,
    /// Set for nodes the tour created.
    pub kind: Option<NodeKind>,
    pub inline: NodeStyle,
    pub classes: BTreeSet<String>,
    pub attributes: BTreeMap<String, String>,
}

/// In-memory [`Page`] host.
#[derive(Debug)]
pub struct FakePage {
    viewport: Size,
    next_id: u64,
    elements: BTreeMap<ElementId, FakeElement>,
    focused: Option<ElementId>,
    reject_focus: bool,
    popover_size: Size,
    scrolls: Vec<(ElementId, ScrollBehavior)>,
    focus_log: Vec<ElementId>,
    scrim_paths: BTreeMap<ElementId, String>,
    scrim_draws: usize,
    rendered: Vec<PopoverContent>,
    styles: BTreeMap<String, String>,
}

impl FakePage {
    /// Empty document with the given viewport.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            viewport: Size::new(width, height),
            next_id: 1,
            elements: BTreeMap::new(),
            focused: None,
            reject_focus: false,
            popover_size: DEFAULT_POPOVER_SIZE,
            scrolls: Vec::new(),
            focus_log: Vec::new(),
            scrim_paths: BTreeMap::new(),
            scrim_draws: 0,
            rendered: Vec::new(),
            styles: BTreeMap::new(),
        }
    }

    fn insert(&mut self, element: FakeElement) -> ElementId {
        let id = ElementId::new(self.next_id);
        self.next_id += 1;
        self.elements.insert(id, element);
        id
    }

    /// Register a page element.
    pub fn add(&mut self, spec: ElementSpec) -> ElementId {
        self.insert(FakeElement {
            selectors: spec.selectors,
            parent: spec.parent,
            rect: spec.rect,
            style: spec.style,
            connected: true,
            kind: None,
            inline: NodeStyle::default(),
            classes: BTreeSet::new(),
            attributes: BTreeMap::new(),
        })
    }

    #[must_use]
    pub fn element(&self, id: ElementId) -> Option<&FakeElement> {
        self.elements.get(&id)
    }

    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport = Size::new(width, height);
    }

    pub fn set_rect(&mut self, id: ElementId, rect: Rect) {
        if let Some(el) = self.elements.get_mut(&id) {
            el.rect = rect;
        }
    }

    /// Detach an element from the document, as if the app removed it.
    pub fn detach(&mut self, id: ElementId) {
        if let Some(el) = self.elements.get_mut(&id) {
            el.connected = false;
        }
    }

    /// Size the host reports for every rendered popover.
    pub fn set_popover_size(&mut self, size: Size) {
        self.popover_size = size;
    }

    /// Make every `focus` call fail.
    pub fn reject_focus(&mut self, reject: bool) {
        self.reject_focus = reject;
    }

    /// Move focus without going through the tour.
    pub fn set_focused(&mut self, id: Option<ElementId>) {
        self.focused = id;
    }

    #[must_use]
    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.elements
            .get(&id)
            .is_some_and(|el| el.classes.contains(class))
    }

    #[must_use]
    pub fn attribute(&self, id: ElementId, name: &str) -> Option<&str> {
        self.elements
            .get(&id)
            .and_then(|el| el.attributes.get(name))
            .map(String::as_str)
    }

    #[must_use]
    pub fn inline_style(&self, id: ElementId) -> Option<&NodeStyle> {
        self.elements.get(&id).map(|el| &el.inline)
    }

    /// Live overlay nodes of one kind.
    #[must_use]
    pub fn nodes_of_kind(&self, kind: NodeKind) -> Vec<ElementId> {
        self.elements
            .iter()
            .filter(|(_, el)| el.connected && el.kind == Some(kind))
            .map(|(id, _)| *id)
            .collect()
    }

    /// The single live overlay node of one kind.
    #[must_use]
    pub fn node_of_kind(&self, kind: NodeKind) -> Option<ElementId> {
        self.nodes_of_kind(kind).into_iter().next()
    }

    /// Whether a live overlay node is displayed.
    #[must_use]
    pub fn is_displayed(&self, id: ElementId) -> bool {
        self.elements
            .get(&id)
            .is_some_and(|el| el.connected && el.inline.display != Some(Display::None))
    }

    /// Every scroll request, oldest first.
    #[must_use]
    pub fn scrolls(&self) -> &[(ElementId, ScrollBehavior)] {
        &self.scrolls
    }

    /// Every successful focus change, oldest first.
    #[must_use]
    pub fn focus_log(&self) -> &[ElementId] {
        &self.focus_log
    }

    /// The path most recently drawn on the live scrim.
    #[must_use]
    pub fn scrim_path(&self) -> Option<&str> {
        let node = self.node_of_kind(NodeKind::Scrim)?;
        self.scrim_paths.get(&node).map(String::as_str)
    }

    /// How many times any scrim was drawn.
    #[must_use]
    pub fn scrim_draws(&self) -> usize {
        self.scrim_draws
    }

    /// Every popover content rendered, oldest first.
    #[must_use]
    pub fn rendered(&self) -> &[PopoverContent] {
        &self.rendered
    }

    #[must_use]
    pub fn last_rendered(&self) -> Option<&PopoverContent> {
        self.rendered.last()
    }

    /// Injected style sheets by id.
    #[must_use]
    pub fn styles(&self) -> &BTreeMap<String, String> {
        &self.styles
    }

    fn resolve_length(length: Option<Length>, extent: f64) -> Option<f64> {
        match length? {
            Length::Px(v) => Some(v),
            Length::Percent(p) => Some(extent * p / 100.0),
            Length::Auto => None,
        }
    }

    /// Mini layout for tour-created nodes.
    fn overlay_rect(&self, el: &FakeElement) -> Rect {
        if el.inline.display == Some(Display::None) {
            return Rect::default();
        }
        let vp = self.viewport;
        let natural = match el.kind {
            Some(NodeKind::Popover) => self.popover_size,
            Some(NodeKind::Scrim) => vp,
            _ => Size::ZERO,
        };
        let width = Self::resolve_length(el.inline.width, vp.width).unwrap_or(natural.width);
        let height = Self::resolve_length(el.inline.height, vp.height).unwrap_or(natural.height);
        let mut x = Self::resolve_length(el.inline.left, vp.width).unwrap_or(0.0);
        let mut y = Self::resolve_length(el.inline.top, vp.height).unwrap_or(0.0);
        if el
            .inline
            .transform
            .as_deref()
            .is_some_and(|t| t.contains("translate(-50%, -50%)"))
        {
            x -= width / 2.0;
            y -= height / 2.0;
        }
        Rect::new(x, y, width, height)
    }
}

impl StyleSource for FakePage {
    fn parent(&self, element: ElementId) -> Option<ElementId> {
        self.elements.get(&element).and_then(|el| el.parent)
    }

    fn computed_style(&self, element: ElementId) -> ComputedStyle {
        let Some(el) = self.elements.get(&element) else {
            return ComputedStyle::default();
        };
        if el.kind.is_none() {
            return el.style;
        }
        ComputedStyle {
            position: el.inline.position.unwrap_or(CssPosition::Static),
            z_index: el.inline.z_index.map_or(ZIndex::Auto, ZIndex::Value),
            has_transform: el.inline.transform.is_some(),
        }
    }
}

impl Page for FakePage {
    fn viewport(&self) -> Size {
        self.viewport
    }

    fn query_selector(&self, selector: &str) -> Option<ElementId> {
        self.elements
            .iter()
            .find(|(_, el)| el.connected && el.selectors.iter().any(|s| s == selector))
            .map(|(id, _)| *id)
    }

    fn bounding_rect(&self, element: ElementId) -> Option<Rect> {
        let el = self.elements.get(&element).filter(|el| el.connected)?;
        Some(if el.kind.is_some() {
            self.overlay_rect(el)
        } else {
            el.rect
        })
    }

    fn elements(&self) -> Vec<ElementId> {
        self.elements
            .iter()
            .filter(|(_, el)| el.connected)
            .map(|(id, _)| *id)
            .collect()
    }

    fn is_connected(&self, element: ElementId) -> bool {
        self.elements.get(&element).is_some_and(|el| el.connected)
    }

    fn active_element(&self) -> Option<ElementId> {
        self.focused
    }

    fn focus(&mut self, element: ElementId) -> Result<(), PageError> {
        if !self.is_connected(element) {
            return Err(PageError::Detached(element));
        }
        if self.reject_focus {
            return Err(PageError::Rejected("focus disabled".into()));
        }
        self.focused = Some(element);
        self.focus_log.push(element);
        Ok(())
    }

    /// Centers the element on any axis where it overflows.
    fn scroll_into_view(&mut self, element: ElementId, behavior: ScrollBehavior) {
        self.scrolls.push((element, behavior));
        let vp = self.viewport;
        if let Some(el) = self.elements.get_mut(&element) {
            let r = el.rect;
            if r.y < 0.0 || r.bottom() > vp.height {
                el.rect.y = (vp.height - r.height) / 2.0;
            }
            if r.x < 0.0 || r.right() > vp.width {
                el.rect.x = (vp.width - r.width) / 2.0;
            }
        }
    }

    fn create_node(&mut self, kind: NodeKind) -> ElementId {
        let id = self.insert(FakeElement {
            selectors: Vec::new(),
            parent: None,
            rect: Rect::default(),
            style: ComputedStyle::default(),
            connected: true,
            kind: Some(kind),
            inline: NodeStyle::default(),
            classes: BTreeSet::new(),
            attributes: BTreeMap::new(),
        });
        tracing::trace!(node = id.raw(), ?kind, "fake page created node");
        id
    }

    fn remove_node(&mut self, node: ElementId) {
        self.elements.remove(&node);
        self.scrim_paths.remove(&node);
        if self.focused == Some(node) {
            self.focused = None;
        }
    }

    fn apply_style(&mut self, node: ElementId, style: &NodeStyle) {
        if let Some(el) = self.elements.get_mut(&node) {
            el.inline.merge(style);
        }
    }

    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str) {
        if let Some(el) = self.elements.get_mut(&element) {
            el.attributes.insert(name.to_owned(), value.to_owned());
        }
    }

    fn remove_attribute(&mut self, element: ElementId, name: &str) {
        if let Some(el) = self.elements.get_mut(&element) {
            el.attributes.remove(name);
        }
    }

    fn add_class(&mut self, element: ElementId, class: &str) {
        if let Some(el) = self.elements.get_mut(&element) {
            el.classes.insert(class.to_owned());
        }
    }

    fn remove_class(&mut self, element: ElementId, class: &str) {
        if let Some(el) = self.elements.get_mut(&element) {
            el.classes.remove(class);
        }
    }

    fn draw_scrim(&mut self, node: ElementId, _viewport: Size, path: &str) {
        self.scrim_draws += 1;
        self.scrim_paths.insert(node, path.to_owned());
    }

    fn render_popover(&mut self, _node: ElementId, content: &PopoverContent) -> Size {
        self.rendered.push(content.clone());
        self.popover_size
    }

    fn inject_styles(&mut self, id: &str, css: &str) {
        self.styles.insert(id.to_owned(), css.to_owned());
    }

    fn remove_styles(&mut self, id: &str) {
        self.styles.remove(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn selectors_resolve_connected_elements() {
        let mut page = FakePage::new(800.0, 600.0);
        let btn = page.add(ElementSpec::new().selector("#btn").rect(10.0, 10.0, 50.0, 20.0));
        assert_eq!(page.query_selector("#btn"), Some(btn));
        assert_eq!(page.query_selector("#nope"), None);
        page.detach(btn);
        assert_eq!(page.query_selector("#btn"), None);
        assert_eq!(page.bounding_rect(btn), None);
    }

    #[test]
    fn ancestry_and_style() {
        let mut page = FakePage::new(800.0, 600.0);
        let root = page.add(
            ElementSpec::new().style(ComputedStyle::positioned(CssPosition::Fixed).with_z(50)),
        );
        let child = page.add(ElementSpec::new().parent(root));
        assert_eq!(page.parent(child), Some(root));
        assert_eq!(page.computed_style(root).z_index, ZIndex::Value(50));
        assert_eq!(page.elements(), vec![root, child]);
    }

    #[test]
    fn scroll_centers_overflowing_element() {
        let mut page = FakePage::new(800.0, 600.0);
        let el = page.add(ElementSpec::new().rect(100.0, 1500.0, 100.0, 100.0));
        page.scroll_into_view(el, ScrollBehavior::Smooth);
        assert_eq!(page.bounding_rect(el), Some(Rect::new(100.0, 250.0, 100.0, 100.0)));
        assert_eq!(page.scrolls(), &[(el, ScrollBehavior::Smooth)]);
    }

    #[test]
    fn overlay_layout_from_inline_style() {
        let mut page = FakePage::new(800.0, 600.0);
        let pop = page.create_node(NodeKind::Popover);
        page.apply_style(
            pop,
            &NodeStyle {
                position: Some(CssPosition::Fixed),
                top: Some(Length::Percent(50.0)),
                left: Some(Length::Percent(50.0)),
                transform: Some("translate(-50%, -50%)".into()),
                ..NodeStyle::default()
            },
        );
        assert_eq!(
            page.bounding_rect(pop),
            Some(Rect::new(280.0, 240.0, 240.0, 120.0))
        );
        assert!(page.is_displayed(pop));
        page.apply_style(
            pop,
            &NodeStyle {
                display: Some(Display::None),
                ..NodeStyle::default()
            },
        );
        assert!(!page.is_displayed(pop));
    }

    #[test]
    fn focus_failures() {
        let mut page = FakePage::new(800.0, 600.0);
        let el = page.add(ElementSpec::new());
        page.reject_focus(true);
        assert!(page.focus(el).is_err());
        page.reject_focus(false);
        assert!(page.focus(el).is_ok());
        assert_eq!(page.active_element(), Some(el));
        page.detach(el);
        assert_eq!(page.focus(el), Err(PageError::Detached(el)));
    }

    #[test]
    fn removed_nodes_disappear() {
        let mut page = FakePage::new(800.0, 600.0);
        let scrim = page.create_node(NodeKind::Scrim);
        page.draw_scrim(scrim, page.viewport(), "M0,0Z");
        assert_eq!(page.scrim_path(), Some("M0,0Z"));
        page.remove_node(scrim);
        assert_eq!(page.node_of_kind(NodeKind::Scrim), None);
        assert_eq!(page.scrim_path(), None);
        assert_eq!(page.scrim_draws(), 1);
    }
}
