#![forbid(unsafe_code)]

//! Canonical input/event types pushed by the host.
//!
//! # Design Notes
//!
//! - The host translates platform input (DOM `keyup`, `click`, `resize`) into
//!   these values and hands them to the driver; nothing here listens on its own.
//! - `KeyEventKind` defaults to `Press` when the platform cannot distinguish.
//! - `Modifiers` use bitflags for easy combination.
//! - Clicks on popover buttons arrive as [`Event::PopoverButton`] so the host
//!   does not need to expose button node ids.

use bitflags::bitflags;

use crate::dom::{ButtonKind, ElementId};
use crate::geometry::Point;

/// Canonical input event.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A keyboard event.
    Key(KeyEvent),

    /// A pointer click somewhere on the page.
    Click(ClickEvent),

    /// The viewport was resized.
    Resize {
        /// New viewport width in CSS pixels.
        width: f64,
        /// New viewport height in CSS pixels.
        height: f64,
    },

    /// One of the popover's buttons was activated.
    PopoverButton(ButtonKind),
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key code that was pressed.
    pub code: KeyCode,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,

    /// The type of key event (press, repeat, or release).
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// Create a new key event with default modifiers and Press kind.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        }
    }

    /// Create a key event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Create a key event with a specific kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Check if Shift modifier is held.
    #[must_use]
    pub const fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }
}

/// Key codes the tour reacts to. Anything else arrives as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A regular character key.
    Char(char),

    /// Escape key.
    Escape,

    /// Tab key.
    Tab,

    /// Shift+Tab (back-tab).
    BackTab,

    /// Enter/Return key.
    Enter,

    /// Left arrow key.
    Left,

    /// Right arrow key.
    Right,

    /// Up arrow key.
    Up,

    /// Down arrow key.
    Down,

    /// Any key without a dedicated variant.
    Other,
}

/// The type of key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    /// Key was pressed (default when not distinguishable).
    #[default]
    Press,

    /// Key is being held (repeat event).
    Repeat,

    /// Key was released.
    Release,
}

bitflags! {
    /// Modifier keys that can be held during a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Super/Meta/Command key.
        const SUPER = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

/// A pointer click.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClickEvent {
    /// Viewport position of the click.
    pub position: Point,
    /// Node the host's hit test landed on, if it knows.
    pub target: Option<ElementId>,
}

impl ClickEvent {
    /// Create a click at a viewport position.
    #[must_use]
    pub const fn at(x: f64, y: f64) -> Self {
        Self {
            position: Point::new(x, y),
            target: None,
        }
    }

    /// Attach the hit-tested node.
    #[must_use]
    pub const fn on(mut self, target: ElementId) -> Self {
        self.target = Some(target);
        self
    }
}
