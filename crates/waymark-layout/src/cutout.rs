#![forbid(unsafe_code)]

//! Cutout geometry and the scrim path.
//!
//! A [`Cutout`] is the rounded hole the scrim leaves over the highlighted
//! element. [`scrim_path`] turns it into an SVG path: the viewport rectangle
//! followed by the hole, meant to be filled with the even-odd rule so the
//! hole stays transparent.

use std::fmt::Write as _;

use serde::Serialize;
use waymark_core::geometry::{Rect, Size};

/// A rounded rectangle in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Cutout {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub radius: f64,
}

impl Cutout {
    /// The cutout around an element's bounding box.
    #[must_use]
    pub fn around(rect: Rect, padding: f64, radius: f64) -> Self {
        let padded = rect.padded(padding);
        Self {
            x: padded.x,
            y: padded.y,
            width: padded.width,
            height: padded.height,
            radius,
        }
    }

    /// The rectangle part of the cutout.
    #[must_use]
    pub const fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Whether the hole has no area.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rect().is_empty()
    }

    /// Restrict the cutout to the visible viewport.
    ///
    /// The rectangle becomes its intersection with the viewport (an empty
    /// cutout at the origin when they do not overlap) and the radius shrinks
    /// to fit half of the smaller side.
    #[must_use]
    pub fn clamp_to(&self, viewport: Size) -> Self {
        let rect = self
            .rect()
            .intersection_opt(&Rect::from_size(viewport))
            .unwrap_or_default();
        let max_radius = (rect.width / 2.0).min(rect.height / 2.0);
        let radius = if self.radius.is_finite() {
            self.radius.min(max_radius).max(0.0)
        } else {
            0.0
        };
        Self {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            radius,
        }
    }
}

/// Number formatting for path data: three decimals, no trailing zeros,
/// never `-0`.
fn num(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{rounded}")
}

/// The scrim shape for a viewport, with an optional hole.
///
/// The hole is clamped to the viewport first. An empty hole (or none at all)
/// yields a plain viewport rectangle, i.e. a fully dimmed page.
#[must_use]
pub fn scrim_path(viewport: Size, cutout: Option<&Cutout>) -> String {
    let (vw, vh) = (num(viewport.width), num(viewport.height));
    let mut path = format!("M{vw},0L0,0L0,{vh}L{vw},{vh}L{vw},0Z");

    let Some(hole) = cutout.map(|c| c.clamp_to(viewport)) else {
        return path;
    };
    if hole.is_empty() {
        return path;
    }

    let r = hole.radius;
    let rs = num(r);
    let h = num(hole.width - 2.0 * r);
    let v = num(hole.height - 2.0 * r);
    let neg_r = num(-r);
    // Writing into a String cannot fail.
    let _ = write!(
        path,
        "M{x},{y} h{h} a{rs},{rs} 0 0 1 {rs},{rs} v{v} a{rs},{rs} 0 0 1 {neg_r},{rs} \
         h{nh} a{rs},{rs} 0 0 1 {neg_r},{neg_r} v{nv} a{rs},{rs} 0 0 1 {rs},{neg_r} z",
        x = num(hole.x + r),
        y = num(hole.y),
        nh = num(-(hole.width - 2.0 * r)),
        nv = num(-(hole.height - 2.0 * r)),
    );
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    const VP: Size = Size::new(800.0, 600.0);

    #[test]
    fn around_applies_padding() {
        let c = Cutout::around(Rect::new(100.0, 100.0, 50.0, 20.0), 10.0, 5.0);
        assert_eq!(c.rect(), Rect::new(90.0, 90.0, 70.0, 40.0));
        assert_eq!(c.radius, 5.0);
    }

    #[test]
    fn clamp_inside_is_identity() {
        let c = Cutout::around(Rect::new(100.0, 100.0, 50.0, 20.0), 10.0, 5.0);
        assert_eq!(c.clamp_to(VP), c);
    }

    #[test]
    fn clamp_trims_overflow() {
        let c = Cutout {
            x: -20.0,
            y: 580.0,
            width: 100.0,
            height: 50.0,
            radius: 40.0,
        }
        .clamp_to(VP);
        assert_eq!(c.rect(), Rect::new(0.0, 580.0, 80.0, 20.0));
        assert_eq!(c.radius, 10.0);
    }

    #[test]
    fn clamp_outside_is_empty() {
        let c = Cutout {
            x: 900.0,
            y: 10.0,
            width: 10.0,
            height: 10.0,
            radius: 2.0,
        }
        .clamp_to(VP);
        assert!(c.is_empty());
        assert_eq!(c.radius, 0.0);
    }

    #[test]
    fn negative_radius_is_zero() {
        let c = Cutout {
            x: 0.0,
            y: 0.0,
            width: 10.0,
            height: 10.0,
            radius: -3.0,
        };
        assert_eq!(c.clamp_to(VP).radius, 0.0);
    }

    #[test]
    fn path_without_hole_is_viewport() {
        assert_eq!(scrim_path(VP, None), "M800,0L0,0L0,600L800,600L800,0Z");
    }

    #[test]
    fn path_with_hole() {
        let c = Cutout {
            x: 10.0,
            y: 20.0,
            width: 100.0,
            height: 50.0,
            radius: 5.0,
        };
        assert_eq!(
            scrim_path(VP, Some(&c)),
            "M800,0L0,0L0,600L800,600L800,0Z\
             M15,20 h90 a5,5 0 0 1 5,5 v40 a5,5 0 0 1 -5,5 \
             h-90 a5,5 0 0 1 -5,-5 v-40 a5,5 0 0 1 5,-5 z"
        );
    }

    #[test]
    fn path_with_offscreen_hole_is_full_dim() {
        let c = Cutout {
            x: -500.0,
            y: -500.0,
            width: 10.0,
            height: 10.0,
            radius: 0.0,
        };
        assert_eq!(scrim_path(VP, Some(&c)), scrim_path(VP, None));
    }

    #[test]
    fn number_formatting() {
        assert_eq!(num(10.0), "10");
        assert_eq!(num(0.1 + 0.2), "0.3");
        assert_eq!(num(-0.0001), "0");
        assert_eq!(num(2.5), "2.5");
    }
}
