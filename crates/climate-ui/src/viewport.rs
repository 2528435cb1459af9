//! Zoom and pan over the x (point index) axis.

use std::ops::Range;

/// Narrowest span zoom-in may reach.
pub const MIN_SPAN: usize = 2;

/// Visible window `[start, start + span)` over `total` points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    total: usize,
    start: usize,
    span: usize,
}

impl Viewport {
    /// Full view over `total` points.
    pub fn new(total: usize) -> Self {
        Self {
            total,
            start: 0,
            span: total,
        }
    }

    /// Adopt a new point count and show everything.
    pub fn set_total(&mut self, total: usize) {
        *self = Self::new(total);
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.start + self.span
    }

    pub fn is_zoomed(&self) -> bool {
        self.span < self.total
    }

    /// Halve the span around its centre.
    pub fn zoom_in(&mut self) {
        let min = MIN_SPAN.min(self.total);
        self.rescale((self.span / 2).max(min));
    }

    /// Double the span around its centre.
    pub fn zoom_out(&mut self) {
        self.rescale(self.span.saturating_mul(2).min(self.total));
    }

    /// Move a quarter span towards the start.
    pub fn pan_left(&mut self) {
        self.start = self.start.saturating_sub(self.step());
    }

    /// Move a quarter span towards the end.
    pub fn pan_right(&mut self) {
        let max_start = self.total - self.span;
        self.start = (self.start + self.step()).min(max_start);
    }

    pub fn reset(&mut self) {
        self.start = 0;
        self.span = self.total;
    }

    fn step(&self) -> usize {
        (self.span / 4).max(1)
    }

    fn rescale(&mut self, span: usize) {
        let centre = self.start + self.span / 2;
        self.span = span;
        self.start = centre
            .saturating_sub(span / 2)
            .min(self.total - span);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
