#![forbid(unsafe_code)]

//! Coalescing for viewport resize events.
//!
//! Browsers fire resize events continuously while the user drags the window
//! edge or zooms. Rebasing the anchor on every event is wasted work, but
//! applying nothing until the burst ends makes the widget lag behind.
//!
//! The strategy is leading edge plus trailing debounce: the first event of a
//! burst applies immediately, the rest collapse into one trailing update a
//! short debounce after the last event. The trailing update always fires,
//! even when the leading update was the only event.
//!
//! The coalescer is poll-driven: the caller ticks [`poll`] with the current
//! time rather than this module owning a timer.
//!
//! [`poll`]: ResizeCoalescer::poll

use web_time::{Duration, Instant};

/// Leading-edge/trailing-debounce collapser for resize bursts.
#[derive(Debug)]
pub struct ResizeCoalescer {
    debounce: Duration,
    deadline: Option<Instant>,
    in_burst: bool,
}

impl ResizeCoalescer {
    #[must_use]
    pub fn new(debounce: Duration) -> Self {
        Self {
            debounce,
            deadline: None,
            in_burst: false,
        }
    }

    /// Record a resize event. Returns `true` when the caller should apply an
    /// update immediately (the leading edge of a burst).
    pub fn on_resize(&mut self, now: Instant) -> bool {
        let leading = !self.in_burst;
        self.in_burst = true;
        self.deadline = Some(now + self.debounce);
        leading
    }

    /// Check the debounce deadline. Returns `true` exactly once per burst,
    /// when the trailing update is due.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                self.in_burst = false;
                true
            }
            _ => false,
        }
    }

    /// Whether a trailing update is still pending.
    #[must_use]
    pub fn pending(&self) -> bool {
        self.deadline.is_some()
    }
}
