#![forbid(unsafe_code)]

//! Best-fit placement of the chat panel around its anchor, and selection of
//! the single active resize handle.
//!
//! # Placement priority
//!
//! Sides are tried in a fixed order: above, below, left, right, then a
//! centered fallback. Vertical placement is preferred over horizontal, and
//! "above" over "below", because the anchor commonly sits near the bottom of
//! the viewport. The tie-break order is load-bearing; do not reorder.
//!
//! # Invariants
//!
//! 1. Per axis, exactly one style offset is populated (`left` XOR `right`,
//!    `top` XOR `bottom`); the other is left unset so the host's layout can
//!    auto-resolve it. Setting both offsets of one axis is a bug class this
//!    type exists to prevent.
//! 2. The solver is total: every input produces an applicable placement,
//!    falling back to a centered panel clamped to at least `gap` from the
//!    viewport origin.

use crate::rect::{Rect, Size};

/// Which side of the anchor the panel was placed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelSide {
    Above,
    Below,
    Left,
    Right,
    /// No side had room; the panel is centered in the viewport.
    Center,
}

/// Solved screen offsets for the panel.
///
/// Offsets carry the CSS convention: `right` is the distance from the
/// viewport's right edge, `bottom` from its bottom edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelPlacement {
    pub side: PanelSide,
    pub left: Option<f64>,
    pub right: Option<f64>,
    pub top: Option<f64>,
    pub bottom: Option<f64>,
}

impl PanelPlacement {
    /// Resolve the offsets to a concrete rect for a panel of `panel` size in
    /// `viewport`. Right/bottom offsets are converted back to a top-left
    /// origin.
    #[must_use]
    pub fn resolve_rect(&self, panel: Size, viewport: Size) -> Rect {
        let left = match (self.left, self.right) {
            (Some(left), _) => left,
            (None, Some(right)) => viewport.width - right - panel.width,
            (None, None) => 0.0,
        };
        let top = match (self.top, self.bottom) {
            (Some(top), _) => top,
            (None, Some(bottom)) => viewport.height - bottom - panel.height,
            (None, None) => 0.0,
        };
        Rect::new(left, top, panel.width, panel.height)
    }

    /// Number of populated offsets. Always exactly two.
    pub fn populated_offsets(&self) -> usize {
        [
            self.left.is_some(),
            self.right.is_some(),
            self.top.is_some(),
            self.bottom.is_some(),
        ]
        .iter()
        .filter(|set| **set)
        .count()
    }
}

/// Compute the best-fit placement for a panel of `panel` size relative to
/// `anchor`, keeping `gap` pixels between the two.
///
/// Horizontal alignment for vertical placements follows the anchor's center:
/// an anchor on the left half aligns the panel's left edge to its own, an
/// anchor on the right half aligns right edges. Vertical alignment for
/// horizontal placements mirrors the rule with the vertical center.
pub fn solve_panel_placement(
    anchor: Rect,
    panel: Size,
    gap: f64,
    viewport: Size,
) -> PanelPlacement {
    let space_above = anchor.top;
    let space_below = viewport.height - anchor.bottom();
    let space_left = anchor.left;
    let space_right = viewport.width - anchor.right();

    let mut placement = PanelPlacement {
        side: PanelSide::Center,
        left: None,
        right: None,
        top: None,
        bottom: None,
    };

    if space_above >= panel.height + gap {
        placement.side = PanelSide::Above;
        placement.bottom = Some(viewport.height - anchor.top + gap);
        align_horizontal(&mut placement, anchor, viewport);
    } else if space_below >= panel.height + gap {
        placement.side = PanelSide::Below;
        placement.top = Some(anchor.bottom() + gap);
        align_horizontal(&mut placement, anchor, viewport);
    } else if space_left >= panel.width + gap {
        placement.side = PanelSide::Left;
        placement.right = Some(viewport.width - anchor.left);
        align_vertical(&mut placement, anchor, viewport);
    } else if space_right >= panel.width + gap {
        placement.side = PanelSide::Right;
        placement.left = Some(anchor.right() + gap);
        align_vertical(&mut placement, anchor, viewport);
    } else {
        // Nothing fits on any side: center, never closer than `gap` to the
        // viewport origin.
        placement.side = PanelSide::Center;
        placement.left = Some(gap.max((viewport.width - panel.width) / 2.0));
        placement.top = Some(gap.max((viewport.height - panel.height) / 2.0));
    }

    placement
}

fn align_horizontal(placement: &mut PanelPlacement, anchor: Rect, viewport: Size) {
    if anchor.center_x() < viewport.width / 2.0 {
        placement.left = Some(anchor.left);
    } else {
        placement.right = Some(viewport.width - anchor.right());
    }
}

fn align_vertical(placement: &mut PanelPlacement, anchor: Rect, viewport: Size) {
    if anchor.center_y() < viewport.height / 2.0 {
        placement.top = Some(anchor.top);
    } else {
        placement.bottom = Some(viewport.height - anchor.bottom());
    }
}

/// A corner of the panel hosting the resize affordance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleCorner {
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
}

impl HandleCorner {
    /// CSS-style short name (`nw`, `ne`, `sw`, `se`), used for cursor and
    /// class wiring on the host side.
    pub fn css_name(self) -> &'static str {
        match self {
            Self::NorthWest => "nw",
            Self::NorthEast => "ne",
            Self::SouthWest => "sw",
            Self::SouthEast => "se",
        }
    }

    #[inline]
    pub fn is_north(self) -> bool {
        matches!(self, Self::NorthWest | Self::NorthEast)
    }

    #[inline]
    pub fn is_west(self) -> bool {
        matches!(self, Self::NorthWest | Self::SouthWest)
    }
}

/// Select the single active resize handle: the panel corner diagonally
/// toward the anchor. Only one handle is active at a time; the host hides
/// the other three.
pub fn active_resize_corner(anchor: Rect, panel: Rect) -> HandleCorner {
    let anchor_is_right = anchor.center_x() > panel.center_x();
    let anchor_is_below = anchor.center_y() > panel.center_y();

    match (anchor_is_right, anchor_is_below) {
        (true, true) => HandleCorner::NorthWest,
        (true, false) => HandleCorner::SouthWest,
        (false, true) => HandleCorner::NorthEast,
        (false, false) => HandleCorner::SouthEast,
    }
}
