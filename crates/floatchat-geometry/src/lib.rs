#![forbid(unsafe_code)]

//! Geometry primitives and placement solvers for the FloatChat widget.
//!
//! Everything in this crate is a total function over numeric inputs: no DOM,
//! no clocks, no error channel. Degenerate inputs (an anchor larger than the
//! viewport, a panel that fits nowhere) produce documented degenerate output
//! rather than failure, so callers can always apply the result.

pub mod bounds;
pub mod placement;
pub mod rect;

pub use bounds::{Boundaries, edge_margin, exceeds_drag_threshold, from_percent, to_percent};
pub use placement::{
    HandleCorner, PanelPlacement, PanelSide, active_resize_corner, solve_panel_placement,
};
pub use rect::{PercentPoint, Point, Rect, Size};
