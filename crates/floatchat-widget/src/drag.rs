#![forbid(unsafe_code)]

//! Drag gesture recognition for the toggle anchor.
//!
//! [`DragController`] is an explicit state machine:
//!
//! ```text
//! Idle --pointer down on toggle--> Armed --move > threshold--> Dragging
//!   ^                                |                            |
//!   +---release (click passes)-------+                            |
//!   +---release (click suppressed for a short window)-------------+
//! ```
//!
//! # Invariants
//!
//! 1. A single press never produces both a click and a drag: release from
//!    `Armed` is a click, release from `Dragging` is a drag, and the drag
//!    release arms a suppression window so the synthetic click that follows
//!    on pointer up is swallowed.
//! 2. Every emitted position is clamped into [`Boundaries`]; the percent
//!    companion is derived from the clamped pixels, never the raw pointer.
//! 3. Transitions take the clock as an argument; nothing here reads a clock.

use floatchat_geometry::{
    Boundaries, PercentPoint, Point, Size, exceeds_drag_threshold, to_percent,
};
use web_time::{Duration, Instant};

/// What the pointer went down on. Only the toggle arms a drag; presses on
/// the close affordance or the text input always pass through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressTarget {
    Toggle,
    CloseButton,
    TextInput,
    Other,
}

/// Geometry inputs sampled by the caller for the current move.
#[derive(Debug, Clone, Copy)]
pub struct DragContext {
    pub anchor_size: Size,
    pub viewport: Size,
    pub margin: f64,
}

/// A clamped anchor position, in both representations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragUpdate {
    pub position: Point,
    pub percent: PercentPoint,
}

/// Outcome of releasing the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragRelease {
    /// No movement beyond the threshold; the press was a click.
    Click,
    /// The anchor was dragged; `last` is the final applied update.
    Drag { last: DragUpdate },
}

#[derive(Debug, Clone, Copy)]
enum State {
    Idle,
    Armed {
        pointer_start: Point,
        anchor_start: Point,
    },
    Dragging {
        pointer_start: Point,
        anchor_start: Point,
        last: DragUpdate,
    },
}

/// Drag state machine for the toggle anchor.
#[derive(Debug)]
pub struct DragController {
    threshold: f64,
    reset_delay: Duration,
    state: State,
    suppress_until: Option<Instant>,
}

impl DragController {
    #[must_use]
    pub fn new(threshold: f64, reset_delay: Duration) -> Self {
        Self {
            threshold,
            reset_delay,
            state: State::Idle,
            suppress_until: None,
        }
    }

    /// Arm the gesture if the press landed on the toggle proper.
    pub fn on_pointer_down(&mut self, target: PressTarget, pointer: Point, anchor_origin: Point) {
        if target != PressTarget::Toggle {
            return;
        }
        tracing::trace!(?pointer, "drag armed");
        self.state = State::Armed {
            pointer_start: pointer,
            anchor_start: anchor_origin,
        };
    }

    /// Feed a pointer move. Returns a clamped position once the gesture has
    /// crossed the threshold; sub-threshold moves return `None` and leave the
    /// anchor untouched.
    pub fn on_pointer_move(&mut self, pointer: Point, ctx: &DragContext) -> Option<DragUpdate> {
        let (pointer_start, anchor_start) = match self.state {
            State::Idle => return None,
            State::Armed {
                pointer_start,
                anchor_start,
            }
            | State::Dragging {
                pointer_start,
                anchor_start,
                ..
            } => (pointer_start, anchor_start),
        };

        let dx = pointer.x - pointer_start.x;
        let dy = pointer.y - pointer_start.y;
        if !exceeds_drag_threshold(dx, dy, self.threshold) {
            return None;
        }

        let desired = Point::new(anchor_start.x + dx, anchor_start.y + dy);
        let boundaries = Boundaries::for_anchor(ctx.anchor_size, ctx.viewport, ctx.margin);
        let position = boundaries.clamp(desired);
        let update = DragUpdate {
            position,
            percent: to_percent(position, ctx.viewport),
        };
        self.state = State::Dragging {
            pointer_start,
            anchor_start,
            last: update,
        };
        Some(update)
    }

    /// Release the pointer. `None` when no gesture was active.
    pub fn on_pointer_up(&mut self, now: Instant) -> Option<DragRelease> {
        match std::mem::replace(&mut self.state, State::Idle) {
            State::Idle => None,
            State::Armed { .. } => Some(DragRelease::Click),
            State::Dragging { last, .. } => {
                self.suppress_until = Some(now + self.reset_delay);
                tracing::trace!(?last.position, "drag released");
                Some(DragRelease::Drag { last })
            }
        }
    }

    /// Whether a click arriving now is the synthetic tail of a finished drag.
    #[must_use]
    pub fn click_suppressed(&self, now: Instant) -> bool {
        self.suppress_until.is_some_and(|until| now < until)
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, State::Dragging { .. })
    }

    /// Abandon any gesture in progress, e.g. on focus loss.
    pub fn reset(&mut self) {
        self.state = State::Idle;
        self.suppress_until = None;
    }
}
