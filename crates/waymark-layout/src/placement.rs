#![forbid(unsafe_code)]

//! Popover placement math.
//!
//! Given the target rectangle, the measured panel size, and the viewport,
//! [`place`] picks a side, aligns the panel on the cross axis, clamps it into
//! the viewport, and computes where the arrow sits.
//!
//! # Side selection
//!
//! Without an explicit side the panel goes to the first of
//! bottom, top, right, left with room for the panel plus [`SIDE_BUFFER`].
//! When none has room, the side with the most space wins (ties resolved in
//! the same order).

use serde::{Deserialize, Serialize};
use waymark_core::geometry::{Rect, Size};

/// Extra room a side needs beyond the panel extent to be preferred.
pub const SIDE_BUFFER: f64 = 20.0;
/// Minimum distance between the panel and the viewport edge.
pub const VIEWPORT_MARGIN: f64 = 8.0;
/// Arrow edge length.
pub const ARROW_SIZE: f64 = 10.0;
/// Minimum distance between the arrow and a panel corner.
pub const ARROW_MIN_MARGIN: f64 = 5.0;
/// Default gap between target and panel.
pub const DEFAULT_OFFSET: f64 = 10.0;

/// Which side of the target the panel sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    /// Preference order for automatic selection.
    pub const PRIORITY: [Side; 4] = [Side::Bottom, Side::Top, Side::Right, Side::Left];

    /// The facing side.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Whether the panel stacks above/below the target.
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }

    /// CSS keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Right => "right",
            Self::Bottom => "bottom",
            Self::Left => "left",
        }
    }
}

/// Cross-axis alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Start,
    #[default]
    Center,
    End,
}

impl Align {
    /// CSS-ish keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Center => "center",
            Self::End => "end",
        }
    }
}

/// Arrow geometry relative to the panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Arrow {
    /// Panel edge the arrow is drawn on. It points away from the panel,
    /// toward the target.
    pub edge: Side,
    /// Distance from the start of that edge (left for horizontal edges,
    /// top for vertical ones).
    pub offset: f64,
}

/// Where the panel ends up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Placement {
    /// Positioned next to a target.
    Anchored {
        side: Side,
        align: Align,
        top: f64,
        left: f64,
        arrow: Arrow,
    },
    /// No target: centered in the viewport, no arrow.
    Centered,
}

impl Placement {
    /// The chosen side, if anchored.
    #[must_use]
    pub const fn side(&self) -> Option<Side> {
        match self {
            Self::Anchored { side, .. } => Some(*side),
            Self::Centered => None,
        }
    }

    /// Panel rectangle for a given panel size, if anchored.
    #[must_use]
    pub fn panel_rect(&self, panel: Size) -> Option<Rect> {
        match self {
            Self::Anchored { top, left, .. } => {
                Some(Rect::new(*left, *top, panel.width, panel.height))
            }
            Self::Centered => None,
        }
    }
}

/// Inputs to [`place`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementRequest {
    /// Target bounding box. `None` requests modal placement.
    pub target: Option<Rect>,
    /// Measured panel size.
    pub panel: Size,
    pub viewport: Size,
    /// Forced side, or automatic selection.
    pub side: Option<Side>,
    pub align: Align,
    /// Gap between target and panel along the main axis.
    pub offset: f64,
}

impl PlacementRequest {
    /// Request with automatic side, centered alignment, and default offset.
    #[must_use]
    pub const fn new(target: Option<Rect>, panel: Size, viewport: Size) -> Self {
        Self {
            target,
            panel,
            viewport,
            side: None,
            align: Align::Center,
            offset: DEFAULT_OFFSET,
        }
    }

    #[must_use]
    pub const fn side(mut self, side: Option<Side>) -> Self {
        self.side = side;
        self
    }

    #[must_use]
    pub const fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    #[must_use]
    pub const fn offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }
}

/// Free space between the target and the viewport edge on `side`.
#[must_use]
pub fn available_space(target: Rect, viewport: Size, side: Side) -> f64 {
    match side {
        Side::Bottom => viewport.height - target.bottom(),
        Side::Top => target.top(),
        Side::Right => viewport.width - target.right(),
        Side::Left => target.left(),
    }
}

/// Automatic side selection.
#[must_use]
pub fn choose_side(target: Rect, panel: Size, viewport: Size) -> Side {
    let fits = Side::PRIORITY.into_iter().find(|&side| {
        let extent = if side.is_vertical() {
            panel.height
        } else {
            panel.width
        };
        available_space(target, viewport, side) >= extent + SIDE_BUFFER
    });
    if let Some(side) = fits {
        return side;
    }

    let mut best = Side::PRIORITY[0];
    let mut best_space = available_space(target, viewport, best);
    for side in &Side::PRIORITY[1..] {
        let space = available_space(target, viewport, *side);
        if space > best_space {
            best = *side;
            best_space = space;
        }
    }
    best
}

/// Clamp one axis into `[margin, viewport - panel - margin]`.
///
/// When the panel is larger than the viewport the lower bound wins.
#[must_use]
pub fn clamp_axis(value: f64, panel: f64, viewport: f64) -> f64 {
    value
        .min(viewport - panel - VIEWPORT_MARGIN)
        .max(VIEWPORT_MARGIN)
}

/// Arrow offset along the panel's cross axis.
#[must_use]
pub fn arrow_offset(target_mid: f64, panel_origin: f64, panel_extent: f64) -> f64 {
    (target_mid - panel_origin - ARROW_SIZE / 2.0)
        .min(panel_extent - ARROW_MIN_MARGIN - ARROW_SIZE)
        .max(ARROW_MIN_MARGIN)
}

fn aligned(align: Align, start: f64, end: f64, extent: f64) -> f64 {
    match align {
        Align::Start => start,
        Align::Center => (start + end) / 2.0 - extent / 2.0,
        Align::End => end - extent,
    }
}

/// Compute the panel placement.
#[must_use]
pub fn place(request: &PlacementRequest) -> Placement {
    let Some(target) = request.target else {
        return Placement::Centered;
    };
    let PlacementRequest {
        panel,
        viewport,
        align,
        offset,
        ..
    } = *request;

    let side = request
        .side
        .unwrap_or_else(|| choose_side(target, panel, viewport));

    let (top, left) = match side {
        Side::Bottom => (
            target.bottom() + offset,
            aligned(align, target.left(), target.right(), panel.width),
        ),
        Side::Top => (
            target.top() - panel.height - offset,
            aligned(align, target.left(), target.right(), panel.width),
        ),
        Side::Right => (
            aligned(align, target.top(), target.bottom(), panel.height),
            target.right() + offset,
        ),
        Side::Left => (
            aligned(align, target.top(), target.bottom(), panel.height),
            target.left() - panel.width - offset,
        ),
    };
    let top = clamp_axis(top, panel.height, viewport.height);
    let left = clamp_axis(left, panel.width, viewport.width);

    let offset = if side.is_vertical() {
        arrow_offset(target.center_x(), left, panel.width)
    } else {
        arrow_offset(target.center_y(), top, panel.height)
    };

    Placement::Anchored {
        side,
        align,
        top,
        left,
        arrow: Arrow {
            edge: side.opposite(),
            offset,
        },
    }
}
