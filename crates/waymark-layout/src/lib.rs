#![forbid(unsafe_code)]

//! Layering and geometry for the tour overlay.
//!
//! Everything in this crate is a pure function of its inputs:
//!
//! - [`stacking`] finds the z-index layers the scrim, the active element, and
//!   the popover paint on.
//! - [`cutout`] derives the rounded hole over the target and the SVG path the
//!   scrim draws.
//! - [`placement`] picks the popover side, alignment, clamped position, and
//!   arrow offset.

pub mod cutout;
pub mod placement;
pub mod stacking;

pub use cutout::{Cutout, scrim_path};
pub use placement::{
    ARROW_MIN_MARGIN, ARROW_SIZE, Align, Arrow, DEFAULT_OFFSET, Placement, PlacementRequest,
    SIDE_BUFFER, Side, VIEWPORT_MARGIN, place,
};
pub use stacking::{StackingLayers, has_fixed_ancestor, resolve_layers};
