#![forbid(unsafe_code)]

//! Overlay components the tour controller composes.
//!
//! Each component owns its host nodes and creates them lazily:
//!
//! - [`Scrim`]: the dimmed, click-routable backdrop with a hole.
//! - [`Popover`]: the floating panel and its arrow.
//! - [`HighlightCoordinator`]: active-element marking, scrolling, and the
//!   placeholder anchor.
//! - [`StyleRegistry`]: style sheets injected on behalf of one tour.

pub mod highlight;
pub mod popover;
pub mod scrim;
pub mod styles;

pub use highlight::{
    ACTIVE_CLASS, HighlightCoordinator, HighlightOptions, NO_INTERACTION_CLASS, SETTLE_FRAMES,
    bring_into_view,
};
pub use popover::{ARROW_CLASS, POPOVER_CLASS, POPOVER_ID, Popover, PopoverLayout};
pub use scrim::{FADE_CLASS, SCRIM_CLASS, Scrim, ScrimStyle};
pub use styles::{STYLE_ID_PREFIX, StyleRegistry, tour_css};
