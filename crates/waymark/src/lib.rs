#![forbid(unsafe_code)]

//! Waymark: a host-driven guided-tour overlay engine.
//!
//! A tour is a list of [`Step`]s. Each step highlights an element on the
//! host page (dimming everything else behind a scrim with a rounded hole)
//! and shows a popover next to it. The [`Driver`] runs the tour; the host
//! implements [`Page`] for its document, forwards input through
//! [`Driver::handle_event`], and pumps time with [`Driver::advance`] and
//! [`Driver::animation_frame`].
//!
//! # Crates
//!
//! - `waymark-core`: geometry, input events, and the [`Page`] contract.
//! - `waymark-layout`: stacking layers, cutouts, popover placement.
//! - `waymark-runtime`: scheduler, event bus, hook isolation.
//! - `waymark-widgets`: scrim, popover, highlight, style sheet.
//!
//! # Example
//!
//! ```rust,ignore
//! use waymark::{Driver, Options, PopoverSpec, Step};
//!
//! let steps = vec![
//!     Step::new().popover(PopoverSpec::new("Welcome")),
//!     Step::new().element("#btn").popover(PopoverSpec::new("Click")),
//! ];
//! let mut driver = Driver::new(page, Options::default(), steps)?;
//! driver.drive(0)?;
//! ```

pub mod config;
pub mod content;
pub mod driver;
pub mod error;
pub mod handle;
pub mod hooks;
pub mod input;
pub mod state;
pub mod step;

pub use config::{Options, OptionsPatch, OverlayClickBehavior};
pub use content::build_content;
pub use driver::{ANIMATED_SETTLE, Driver, INSTANT_SETTLE};
pub use error::{Error, Result};
pub use handle::{Command, DriverHandle};
pub use hooks::{Hook, HookContext, Hooks, RenderContext, RenderHook, cancel, hook, render_hook};
pub use input::{TourEvent, key_event};
pub use state::{Phase, StateSnapshot, TourState};
pub use step::{ElementTarget, PopoverSpec, Resolver, Step};

pub use waymark_core::{
    ButtonKind, ClickEvent, ElementId, Event, KeyCode, KeyEvent, KeyEventKind, Modifiers, Page,
    PopoverButton, PopoverContent, Rect, ScrollBehavior, Size,
};
pub use waymark_layout::{Align, Placement, Side, StackingLayers};
pub use waymark_runtime::{Duration, HookFailure, HookFlow, HookResult, Pump};
pub use waymark_widgets::PopoverLayout;
