#![forbid(unsafe_code)]

//! Core: geometry, input events, and the host page contract.
//!
//! # Role in Waymark
//! `waymark-core` is the boundary layer. It defines the [`Page`](dom::Page)
//! trait the embedding environment implements, the canonical [`Event`](event::Event)
//! values the host pushes in, and the pixel geometry every other crate
//! computes with.
//!
//! # How it fits in the system
//! `waymark-layout` consumes geometry and [`StyleSource`](dom::StyleSource)
//! to compute stacking layers and placements. `waymark-widgets` drives the
//! overlay nodes through [`Page`](dom::Page). The `waymark` facade ties them
//! into the step-transition controller.

pub mod content;
pub mod dom;
pub mod event;
pub mod geometry;

pub use content::{PopoverButton, PopoverContent};
pub use dom::{
    ButtonKind, ComputedStyle, CssPosition, Display, ElementId, Length, NodeKind, NodeStyle, Page,
    PageError, PointerEvents, ScrollBehavior, StyleSource, ZIndex,
};
pub use event::{ClickEvent, Event, KeyCode, KeyEvent, KeyEventKind, Modifiers};
pub use geometry::{Point, Rect, Size};
