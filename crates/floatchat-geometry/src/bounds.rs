#![forbid(unsafe_code)]

//! Boundary constraints for the draggable anchor, plus the pixel↔percent
//! conversions used to rebase its position across viewport resizes.

use crate::rect::{PercentPoint, Point, Size};

/// Margin kept between the anchor and every viewport edge, derived from the
/// host page's root font size (2rem).
#[inline]
pub fn edge_margin(root_font_px: f64) -> f64 {
    root_font_px * 2.0
}

/// The legal region for an anchor's top-left corner.
///
/// Derived from the anchor size, a fixed margin, and the current viewport.
/// No clamping to ≥ 0 happens here: an anchor larger than the viewport yields
/// `max_x < min_x` (or the y equivalent). That degenerate output is
/// deliberate: [`Boundaries::clamp`] still returns a usable point (the
/// minimum wins), and callers that care must guard for it themselves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boundaries {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Boundaries {
    /// Compute boundaries for an anchor of the given size.
    pub fn for_anchor(anchor: Size, viewport: Size, margin: f64) -> Self {
        Self {
            min_x: margin,
            max_x: viewport.width - anchor.width - margin,
            min_y: margin,
            max_y: viewport.height - anchor.height - margin,
        }
    }

    /// Clamp a point into the boundary region, each axis independently.
    ///
    /// In the degenerate case (`max < min`) the minimum wins on that axis.
    #[inline]
    pub fn clamp(&self, p: Point) -> Point {
        Point::new(
            p.x.min(self.max_x).max(self.min_x),
            p.y.min(self.max_y).max(self.min_y),
        )
    }
}

/// Convert a pixel position to viewport percentages. Linear scaling, no
/// rounding; precision loss is acceptable because the result is re-clamped
/// before use.
#[inline]
pub fn to_percent(p: Point, viewport: Size) -> PercentPoint {
    PercentPoint::new(p.x / viewport.width * 100.0, p.y / viewport.height * 100.0)
}

/// Inverse of [`to_percent`].
#[inline]
pub fn from_percent(p: PercentPoint, viewport: Size) -> Point {
    Point::new(p.x / 100.0 * viewport.width, p.y / 100.0 * viewport.height)
}

/// Whether pointer movement counts as an intentional drag rather than the
/// jitter of a click/tap. Strictly greater than the threshold: movement of
/// exactly `threshold` pixels does not trigger.
#[inline]
pub fn exceeds_drag_threshold(dx: f64, dy: f64, threshold: f64) -> bool {
    dx.abs() > threshold || dy.abs() > threshold
}

#[cfg(test)]
mod tests {
    use super::{Boundaries, edge_margin, exceeds_drag_threshold, from_percent, to_percent};
    use crate::rect::{PercentPoint, Point, Size};
    use proptest::prelude::*;

    #[test]
    fn margin_is_two_rem() {
        assert_eq!(edge_margin(16.0), 32.0);
        assert_eq!(edge_margin(20.0), 40.0);
    }

    #[test]
    fn boundaries_normal_case() {
        let b = Boundaries::for_anchor(Size::new(60.0, 60.0), Size::new(800.0, 600.0), 32.0);
        assert_eq!(b.min_x, 32.0);
        assert_eq!(b.max_x, 708.0);
        assert_eq!(b.min_y, 32.0);
        assert_eq!(b.max_y, 508.0);
        assert!(b.min_x <= b.max_x && b.min_y <= b.max_y);
    }

    #[test]
    fn boundaries_degenerate_when_anchor_exceeds_viewport() {
        // Anchor wider than the viewport: max_x goes negative. Documented
        // degenerate output, not an error.
        let b = Boundaries::for_anchor(Size::new(900.0, 60.0), Size::new(800.0, 600.0), 32.0);
        assert!(b.max_x < b.min_x);
        assert!(b.max_x < 0.0);
        // Clamp still returns a point; the minimum wins on the broken axis.
        let p = b.clamp(Point::new(400.0, 300.0));
        assert_eq!(p.x, b.min_x);
        assert_eq!(p.y, 300.0);
    }

    #[test]
    fn clamp_pins_each_axis_independently() {
        let b = Boundaries {
            min_x: 10.0,
            max_x: 100.0,
            min_y: 20.0,
            max_y: 200.0,
        };
        assert_eq!(b.clamp(Point::new(-5.0, 300.0)), Point::new(10.0, 200.0));
        assert_eq!(b.clamp(Point::new(150.0, -5.0)), Point::new(100.0, 20.0));
        assert_eq!(b.clamp(Point::new(50.0, 50.0)), Point::new(50.0, 50.0));
    }

    #[test]
    fn threshold_is_strict() {
        assert!(!exceeds_drag_threshold(5.0, 0.0, 5.0));
        assert!(!exceeds_drag_threshold(0.0, -5.0, 5.0));
        assert!(exceeds_drag_threshold(6.0, 0.0, 5.0));
        assert!(exceeds_drag_threshold(0.0, -6.0, 5.0));
        assert!(exceeds_drag_threshold(-6.0, 2.0, 5.0));
    }

    proptest! {
        #[test]
        fn clamp_result_in_bounds(
            x in -2000.0f64..2000.0,
            y in -2000.0f64..2000.0,
            min_x in 0.0f64..100.0,
            span_x in 0.0f64..1000.0,
            min_y in 0.0f64..100.0,
            span_y in 0.0f64..1000.0,
        ) {
            let b = Boundaries {
                min_x,
                max_x: min_x + span_x,
                min_y,
                max_y: min_y + span_y,
            };
            let p = b.clamp(Point::new(x, y));
            prop_assert!(p.x >= b.min_x && p.x <= b.max_x);
            prop_assert!(p.y >= b.min_y && p.y <= b.max_y);
        }

        #[test]
        fn percent_round_trip(
            x in 0.0f64..4000.0,
            y in 0.0f64..4000.0,
            w in 1.0f64..4000.0,
            h in 1.0f64..4000.0,
        ) {
            let viewport = Size::new(w, h);
            let back = from_percent(to_percent(Point::new(x, y), viewport), viewport);
            prop_assert!((back.x - x).abs() < 1e-9 * x.abs().max(1.0));
            prop_assert!((back.y - y).abs() < 1e-9 * y.abs().max(1.0));
        }
    }

    #[test]
    fn percent_point_serializes() {
        let p = PercentPoint::new(12.5, 87.5);
        let json = serde_json::to_string(&p).unwrap();
        let back: PercentPoint = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }
}
