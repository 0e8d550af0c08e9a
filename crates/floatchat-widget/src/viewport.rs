#![forbid(unsafe_code)]

//! Viewport capability.
//!
//! All geometry reads go through [`ViewportProvider`] so the widget never
//! touches a real layout engine. Hosts back it with live measurements; tests
//! use [`FixedViewport`].

use floatchat_geometry::{Rect, Size};

/// Live geometry of the host page.
pub trait ViewportProvider {
    /// Current viewport size in CSS pixels.
    fn viewport(&self) -> Size;

    /// Bounding rect of the toggle anchor.
    fn anchor_rect(&self) -> Rect;

    /// Bounding rect of the chat panel as currently laid out.
    fn panel_rect(&self) -> Rect;
}

/// Static geometry for tests and headless hosts.
#[derive(Debug, Clone, Copy)]
pub struct FixedViewport {
    pub size: Size,
    pub anchor: Rect,
    pub panel: Rect,
}

impl FixedViewport {
    #[must_use]
    pub fn new(size: Size, anchor: Rect, panel: Rect) -> Self {
        Self { size, anchor, panel }
    }
}

impl ViewportProvider for FixedViewport {
    fn viewport(&self) -> Size {
        self.size
    }

    fn anchor_rect(&self) -> Rect {
        self.anchor
    }

    fn panel_rect(&self) -> Rect {
        self.panel
    }
}
