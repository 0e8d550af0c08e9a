#![forbid(unsafe_code)]

//! Corner-resize gesture for the chat panel.
//!
//! One gesture at a time, keyed by the grabbed corner. Deltas grow the panel
//! away from the grabbed corner while the opposite corner stays fixed; width
//! and height are clamped independently to `[min, viewport × max fraction]`
//! and additionally at the viewport edge opposite the fixed corner. Releasing
//! the pointer anywhere ends the gesture.

use floatchat_geometry::{HandleCorner, Point, Rect, Size};

/// Size clamps for the panel.
#[derive(Debug, Clone, Copy)]
pub struct ResizeLimits {
    pub min_width: f64,
    pub min_height: f64,
    /// Fraction of viewport width the panel may occupy.
    pub max_width_fraction: f64,
    /// Fraction of viewport height the panel may occupy.
    pub max_height_fraction: f64,
}

#[derive(Debug, Clone, Copy)]
struct Session {
    corner: HandleCorner,
    pointer_start: Point,
    start: Rect,
    last: Rect,
}

/// Resize state machine for the chat panel.
#[derive(Debug, Default)]
pub struct ResizeController {
    session: Option<Session>,
}

impl ResizeController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a gesture on `corner` with the panel at `panel_rect`.
    pub fn begin(&mut self, corner: HandleCorner, pointer: Point, panel_rect: Rect) {
        tracing::trace!(corner = corner.css_name(), "resize started");
        self.session = Some(Session {
            corner,
            pointer_start: pointer,
            start: panel_rect,
            last: panel_rect,
        });
    }

    /// Feed a pointer move; returns the panel rect to apply.
    pub fn on_pointer_move(
        &mut self,
        pointer: Point,
        viewport: Size,
        limits: &ResizeLimits,
    ) -> Option<Rect> {
        let session = self.session.as_mut()?;
        let dx = pointer.x - session.pointer_start.x;
        let dy = pointer.y - session.pointer_start.y;
        let rect = resize_rect(session.corner, session.start, dx, dy, viewport, limits);
        session.last = rect;
        Some(rect)
    }

    /// End the gesture, returning the final rect for persistence.
    pub fn finish(&mut self) -> Option<Rect> {
        let session = self.session.take()?;
        tracing::trace!(
            width = session.last.width,
            height = session.last.height,
            "resize finished"
        );
        Some(session.last)
    }

    #[must_use]
    pub fn is_resizing(&self) -> bool {
        self.session.is_some()
    }

    pub fn reset(&mut self) {
        self.session = None;
    }
}

/// Solve the panel rect for a pointer delta on the given corner.
fn resize_rect(
    corner: HandleCorner,
    start: Rect,
    dx: f64,
    dy: f64,
    viewport: Size,
    limits: &ResizeLimits,
) -> Rect {
    let max_width = viewport.width * limits.max_width_fraction;
    let max_height = viewport.height * limits.max_height_fraction;
    let clamp_w = |w: f64| w.min(max_width).max(limits.min_width);
    let clamp_h = |h: f64| h.min(max_height).max(limits.min_height);

    let desired_width = if corner.is_west() {
        start.width - dx
    } else {
        start.width + dx
    };
    let desired_height = if corner.is_north() {
        start.height - dy
    } else {
        start.height + dy
    };

    let mut width = clamp_w(desired_width);
    let mut height = clamp_h(desired_height);
    let mut left = start.left;
    let mut top = start.top;

    if corner.is_west() {
        // The right edge stays fixed. When unconstrained, follow the pointer
        // but never past the left viewport edge; when size-clamped, back the
        // left edge off to keep the right edge in place.
        if width == desired_width {
            left = (start.left + dx).max(0.0);
            width = start.right() - left;
        } else {
            left = start.right() - width;
        }
    } else if start.left + width > viewport.width {
        width = viewport.width - start.left;
    }

    if corner.is_north() {
        if height == desired_height {
            top = (start.top + dy).max(0.0);
            height = start.bottom() - top;
        } else {
            top = start.bottom() - height;
        }
    } else if start.top + height > viewport.height {
        height = viewport.height - start.top;
    }

    Rect::new(left, top, width, height)
}

#[cfg(test)]
mod tests {
    use super::{ResizeController, ResizeLimits};
    use floatchat_geometry::{HandleCorner, Point, Rect, Size};
    use pretty_assertions::assert_eq;

    const LIMITS: ResizeLimits = ResizeLimits {
        min_width: 280.0,
        min_height: 300.0,
        max_width_fraction: 0.9,
        max_height_fraction: 0.7,
    };

    fn viewport() -> Size {
        Size::new(1000.0, 800.0)
    }

    fn start_rect() -> Rect {
        Rect::new(300.0, 200.0, 380.0, 500.0)
    }

    fn begin(corner: HandleCorner) -> ResizeController {
        let mut resize = ResizeController::new();
        resize.begin(corner, Point::new(0.0, 0.0), start_rect());
        resize
    }

    #[test]
    fn se_grows_with_pointer_keeping_origin() {
        let mut resize = begin(HandleCorner::SouthEast);
        let rect = resize
            .on_pointer_move(Point::new(40.0, 30.0), viewport(), &LIMITS)
            .expect("active");
        assert_eq!(rect, Rect::new(300.0, 200.0, 420.0, 530.0));
    }

    #[test]
    fn nw_moves_origin_keeping_opposite_corner() {
        let mut resize = begin(HandleCorner::NorthWest);
        let rect = resize
            .on_pointer_move(Point::new(-40.0, -30.0), viewport(), &LIMITS)
            .expect("active");
        // Right and bottom edges unchanged.
        assert_eq!(rect.right(), start_rect().right());
        assert_eq!(rect.bottom(), start_rect().bottom());
        assert_eq!(rect, Rect::new(260.0, 170.0, 420.0, 530.0));
    }

    #[test]
    fn width_clamped_to_minimum() {
        let mut resize = begin(HandleCorner::SouthEast);
        let rect = resize
            .on_pointer_move(Point::new(-500.0, 0.0), viewport(), &LIMITS)
            .expect("active");
        assert_eq!(rect.width, LIMITS.min_width);
    }

    #[test]
    fn nw_min_clamp_keeps_right_edge_fixed() {
        let mut resize = begin(HandleCorner::NorthWest);
        // Dragging far right shrinks toward the minimum; the left edge backs
        // off so the right edge never moves.
        let rect = resize
            .on_pointer_move(Point::new(500.0, 0.0), viewport(), &LIMITS)
            .expect("active");
        assert_eq!(rect.width, LIMITS.min_width);
        assert_eq!(rect.right(), start_rect().right());
    }

    #[test]
    fn width_clamped_to_viewport_fraction() {
        let mut resize = ResizeController::new();
        resize.begin(
            HandleCorner::SouthEast,
            Point::new(0.0, 0.0),
            Rect::new(10.0, 10.0, 380.0, 500.0),
        );
        let rect = resize
            .on_pointer_move(Point::new(2000.0, 0.0), viewport(), &LIMITS)
            .expect("active");
        assert_eq!(rect.width, viewport().width * LIMITS.max_width_fraction);
    }

    #[test]
    fn east_growth_stops_at_viewport_edge() {
        let mut resize = ResizeController::new();
        // Panel starts near the right edge: fraction clamp still leaves room
        // to overflow, so the edge clamp must cut in.
        resize.begin(
            HandleCorner::SouthEast,
            Point::new(0.0, 0.0),
            Rect::new(700.0, 100.0, 280.0, 400.0),
        );
        let rect = resize
            .on_pointer_move(Point::new(400.0, 0.0), viewport(), &LIMITS)
            .expect("active");
        assert_eq!(rect.right(), viewport().width);
    }

    #[test]
    fn nw_drag_past_top_left_pins_at_origin() {
        let mut resize = ResizeController::new();
        resize.begin(
            HandleCorner::NorthWest,
            Point::new(0.0, 0.0),
            Rect::new(50.0, 40.0, 380.0, 400.0),
        );
        let rect = resize
            .on_pointer_move(Point::new(-200.0, -100.0), viewport(), &LIMITS)
            .expect("active");
        assert_eq!(rect.left, 0.0);
        assert_eq!(rect.top, 0.0);
        // Pinned at the viewport corner the size absorbs only the available
        // space.
        assert_eq!(rect.width, 430.0);
        assert_eq!(rect.height, 440.0);
    }

    #[test]
    fn north_fraction_clamp_keeps_bottom_edge_fixed() {
        let mut resize = ResizeController::new();
        resize.begin(
            HandleCorner::NorthWest,
            Point::new(0.0, 0.0),
            Rect::new(50.0, 40.0, 380.0, 400.0),
        );
        // desired height 600 exceeds the 560 fraction clamp; the top edge
        // backs off to keep the bottom edge in place, even above the
        // viewport.
        let rect = resize
            .on_pointer_move(Point::new(0.0, -200.0), viewport(), &LIMITS)
            .expect("active");
        assert_eq!(rect.height, 560.0);
        assert_eq!(rect.bottom(), 440.0);
        assert_eq!(rect.top, -120.0);
    }

    #[test]
    fn finish_returns_last_rect_and_ends_session() {
        let mut resize = begin(HandleCorner::SouthEast);
        resize.on_pointer_move(Point::new(40.0, 30.0), viewport(), &LIMITS);
        let last = resize.finish().expect("session");
        assert_eq!(last.size(), Size::new(420.0, 530.0));
        assert!(!resize.is_resizing());
        assert_eq!(resize.finish(), None);
    }

    #[test]
    fn moves_without_session_do_nothing() {
        let mut resize = ResizeController::new();
        assert_eq!(
            resize.on_pointer_move(Point::new(10.0, 10.0), viewport(), &LIMITS),
            None
        );
    }
}
