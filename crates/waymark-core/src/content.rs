#![forbid(unsafe_code)]

//! What the host renders inside the popover.

use serde::{Deserialize, Serialize};

use crate::dom::ButtonKind;

/// A single footer button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopoverButton {
    pub kind: ButtonKind,
    pub label: String,
    pub disabled: bool,
}

/// Fully-resolved popover content for one step.
///
/// Step-level overrides and global defaults have already been merged; the
/// host only has to turn this into nodes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PopoverContent {
    pub title: String,
    pub description: String,
    /// Rendered progress line (e.g. "2 of 5"), when progress is shown.
    pub progress: Option<String>,
    /// Buttons in display order.
    pub buttons: Vec<PopoverButton>,
    /// Extra class names for the panel.
    pub class: String,
}

impl PopoverContent {
    /// Content with just a title.
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Look up a button by kind.
    #[must_use]
    pub fn button(&self, kind: ButtonKind) -> Option<&PopoverButton> {
        self.buttons.iter().find(|b| b.kind == kind)
    }

    /// Whether any button is present.
    #[must_use]
    pub fn has_footer(&self) -> bool {
        !self.buttons.is_empty() || self.progress.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_lookup() {
        let content = PopoverContent {
            buttons: vec![PopoverButton {
                kind: ButtonKind::Next,
                label: "Next".into(),
                disabled: false,
            }],
            ..PopoverContent::titled("Hi")
        };
        assert!(content.button(ButtonKind::Next).is_some());
        assert!(content.button(ButtonKind::Close).is_none());
        assert!(content.has_footer());
    }

    #[test]
    fn title_only_has_no_footer() {
        assert!(!PopoverContent::titled("Hi").has_footer());
    }
}
