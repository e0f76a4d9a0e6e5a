#![forbid(unsafe_code)]

//! The tour style sheet and its injection bookkeeping.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use waymark_core::Page;
use waymark_layout::StackingLayers;

use crate::highlight::{ACTIVE_CLASS, NO_INTERACTION_CLASS};
use crate::popover::{ARROW_CLASS, POPOVER_CLASS};
use crate::scrim::{FADE_CLASS, SCRIM_CLASS};

/// Prefix of every style sheet id the tour injects.
pub const STYLE_ID_PREFIX: &str = "waymark-styles";

/// Build the style sheet for one set of layers.
#[must_use]
pub fn tour_css(layers: &StackingLayers) -> String {
    let mut css = String::new();
    // Writing into a String cannot fail.
    let _ = write!(
        css,
        ".{SCRIM_CLASS} {{ pointer-events: auto; z-index: {overlay}; }}\n\
         .{FADE_CLASS} {{ animation: waymark-fade-in 200ms ease-in-out; }}\n\
         .{ACTIVE_CLASS} {{ z-index: {active} !important; pointer-events: auto; }}\n\
         .{NO_INTERACTION_CLASS}, .{NO_INTERACTION_CLASS} * {{ pointer-events: none !important; }}\n\
         .{POPOVER_CLASS} {{ position: fixed; z-index: {popover}; box-sizing: border-box; }}\n\
         .{ARROW_CLASS} {{ position: absolute; width: 0; height: 0; border: 5px solid transparent; }}\n\
         .{ARROW_CLASS}-side-top {{ border-bottom-color: currentColor; border-top: 0; }}\n\
         .{ARROW_CLASS}-side-bottom {{ border-top-color: currentColor; border-bottom: 0; }}\n\
         .{ARROW_CLASS}-side-left {{ border-right-color: currentColor; border-left: 0; }}\n\
         .{ARROW_CLASS}-side-right {{ border-left-color: currentColor; border-right: 0; }}\n\
         @keyframes waymark-fade-in {{ 0% {{ opacity: 0; }} 100% {{ opacity: 1; }} }}\n",
        overlay = layers.overlay,
        active = layers.active,
        popover = layers.popover,
    );
    css
}

/// Tracks which sheets this instance has put on the page.
///
/// Injecting an id that is already present with the same text is a no-op.
#[derive(Debug, Default)]
pub struct StyleRegistry {
    sheets: BTreeMap<String, String>,
}

impl StyleRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_injected(&self, id: &str) -> bool {
        self.sheets.contains_key(id)
    }

    /// Inject `css` under `id`. Returns whether the page was touched.
    pub fn inject<P: Page + ?Sized>(&mut self, page: &mut P, id: &str, css: &str) -> bool {
        if self.sheets.get(id).is_some_and(|existing| existing == css) {
            return false;
        }
        page.inject_styles(id, css);
        self.sheets.insert(id.to_owned(), css.to_owned());
        true
    }

    /// Remove one sheet. Returns whether it was injected.
    pub fn remove<P: Page + ?Sized>(&mut self, page: &mut P, id: &str) -> bool {
        if self.sheets.remove(id).is_none() {
            return false;
        }
        page.remove_styles(id);
        true
    }

    /// Remove every sheet this registry injected.
    pub fn release_all<P: Page + ?Sized>(&mut self, page: &mut P) {
        for id in std::mem::take(&mut self.sheets).into_keys() {
            page.remove_styles(&id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use waymark_harness::FakePage;

    #[test]
    fn css_carries_layers() {
        let css = tour_css(&StackingLayers::above(Some(40)));
        assert!(css.contains(".waymark-overlay { pointer-events: auto; z-index: 41; }"));
        assert!(css.contains("z-index: 42 !important"));
        assert!(css.contains("z-index: 43;"));
    }

    #[test]
    fn inject_once() {
        let mut page = FakePage::new(100.0, 100.0);
        let mut reg = StyleRegistry::new();
        assert!(reg.inject(&mut page, "a", "x{}"));
        assert!(!reg.inject(&mut page, "a", "x{}"));
        assert!(reg.inject(&mut page, "a", "y{}"));
        assert_eq!(page.styles().get("a").map(String::as_str), Some("y{}"));
        assert!(reg.is_injected("a"));
    }

    #[test]
    fn release_removes_only_own_sheets() {
        let mut page = FakePage::new(100.0, 100.0);
        page.inject_styles("host", "h{}");
        let mut reg = StyleRegistry::new();
        reg.inject(&mut page, "a", "a{}");
        reg.inject(&mut page, "b", "b{}");
        assert!(reg.remove(&mut page, "a"));
        assert!(!reg.remove(&mut page, "a"));
        reg.release_all(&mut page);
        assert_eq!(page.styles().len(), 1);
        assert!(page.styles().contains_key("host"));
    }
}
