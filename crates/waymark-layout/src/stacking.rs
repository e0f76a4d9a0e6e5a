#![forbid(unsafe_code)]

//! Stacking-layer resolution.
//!
//! The scrim, the highlighted element, and the popover have to paint in that
//! order no matter what z-index games the surrounding page plays. This module
//! inspects the ancestor chains of every tour target, finds the highest layer
//! already in use, and hands back three layers strictly above it.
//!
//! # Invariants
//!
//! 1. `overlay < active < popover`.
//! 2. When a positive maximum `m` was discovered, `overlay > m`.
//! 3. Resolution is a pure function of the [`StyleSource`]; it never mutates
//!    the page.

use serde::Serialize;
use waymark_core::dom::{CssPosition, ElementId, StyleSource};

/// Largest z-index a browser honours.
pub const Z_CEILING: i32 = i32::MAX;

/// Upper bound on ancestor walks. Real documents are far shallower; a host
/// reporting a parent cycle must not hang the tour.
const MAX_DEPTH: usize = 4096;

/// The three layers the tour paints on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StackingLayers {
    /// The scrim.
    pub overlay: i32,
    /// The highlighted element (lifted through the active-element class).
    pub active: i32,
    /// The popover panel.
    pub popover: i32,
}

impl StackingLayers {
    /// Layers used when the page gives no usable maximum.
    pub const CEILING: Self = Self {
        overlay: Z_CEILING - 2,
        active: Z_CEILING - 1,
        popover: Z_CEILING,
    };

    /// Layers sitting directly above `max`.
    ///
    /// Falls back to [`Self::CEILING`] for non-positive maxima and for maxima
    /// too close to the ceiling to fit three layers above.
    #[must_use]
    pub fn above(max: Option<i32>) -> Self {
        match max {
            Some(max) if max > 0 && max <= Z_CEILING - 3 => Self {
                overlay: max + 1,
                active: max + 2,
                popover: max + 3,
            },
            _ => Self::CEILING,
        }
    }
}

impl Default for StackingLayers {
    fn default() -> Self {
        Self::CEILING
    }
}

/// Iterate an element and its ancestors, innermost first.
pub fn ancestors<S: StyleSource + ?Sized>(
    source: &S,
    element: ElementId,
) -> impl Iterator<Item = ElementId> + '_ {
    std::iter::successors(Some(element), move |&el| source.parent(el)).take(MAX_DEPTH)
}

/// Whether an element with this style starts a new stacking context.
#[must_use]
pub fn establishes_stacking_context(style: &waymark_core::ComputedStyle) -> bool {
    (style.position.is_positioned() && style.z_index.value().is_some())
        || matches!(style.position, CssPosition::Fixed | CssPosition::Sticky)
        || style.has_transform
}

/// The nearest element (self included) that establishes a stacking context.
pub fn nearest_stacking_context<S: StyleSource + ?Sized>(
    source: &S,
    element: ElementId,
) -> Option<ElementId> {
    ancestors(source, element).find(|&el| establishes_stacking_context(&source.computed_style(el)))
}

/// The explicit z-index of the nearest stacking context, if it has one.
pub fn stacking_context_z<S: StyleSource + ?Sized>(source: &S, element: ElementId) -> Option<i32> {
    nearest_stacking_context(source, element)
        .and_then(|ctx| source.computed_style(ctx).z_index.value())
}

/// Maximum explicit z-index anywhere on the chain.
///
/// Nested stacking contexts hide an ancestor's z-index from the nearest
/// context, so the outermost layers have to be read separately.
pub fn max_ancestor_z<S: StyleSource + ?Sized>(source: &S, element: ElementId) -> Option<i32> {
    ancestors(source, element)
        .filter_map(|el| source.computed_style(el).z_index.value())
        .max()
}

/// The layer an element effectively paints on.
pub fn effective_z<S: StyleSource + ?Sized>(source: &S, element: ElementId) -> Option<i32> {
    match (
        stacking_context_z(source, element),
        max_ancestor_z(source, element),
    ) {
        (Some(a), Some(b)) => Some(a.max(b)),
        (a, b) => a.or(b),
    }
}

/// Whether the element or any ancestor is `position: fixed`.
pub fn has_fixed_ancestor<S: StyleSource + ?Sized>(source: &S, element: ElementId) -> bool {
    ancestors(source, element)
        .any(|el| source.computed_style(el).position == CssPosition::Fixed)
}

/// Highest explicit z-index among `fixed`/`absolute` elements.
pub fn scan_positioned_max<S, I>(source: &S, elements: I) -> Option<i32>
where
    S: StyleSource + ?Sized,
    I: IntoIterator<Item = ElementId>,
{
    elements
        .into_iter()
        .filter_map(|el| {
            let style = source.computed_style(el);
            matches!(style.position, CssPosition::Fixed | CssPosition::Absolute)
                .then_some(style.z_index.value())
                .flatten()
        })
        .max()
}

/// Compute the tour's stacking layers.
///
/// `targets` are the resolved step elements. `document` is consulted only
/// when no target resolved; it is O(document size), so it is lazy.
pub fn resolve_layers<S, I, F>(source: &S, targets: I, document: F) -> StackingLayers
where
    S: StyleSource + ?Sized,
    I: IntoIterator<Item = ElementId>,
    F: FnOnce() -> Vec<ElementId>,
{
    let mut seen_target = false;
    let mut max: Option<i32> = None;

    for target in targets {
        seen_target = true;
        if let Some(z) = effective_z(source, target) {
            max = Some(max.map_or(z, |m| m.max(z)));
        }
    }

    if !seen_target {
        let elements = document();
        tracing::debug!(
            target: "waymark.stacking",
            elements = elements.len(),
            "no step target resolved, scanning document"
        );
        max = scan_positioned_max(source, elements);
    }

    let layers = StackingLayers::above(max);
    tracing::debug!(
        target: "waymark.stacking",
        max = ?max,
        overlay = layers.overlay,
        popover = layers.popover,
        "stacking layers resolved"
    );
    layers
}
