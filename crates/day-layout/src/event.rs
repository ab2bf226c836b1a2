//! Event types and the collision predicate.
//!
//! An event's vertical extent is a half-open interval `[start, end)`. Two
//! events collide iff `a.start < b.end && b.start < a.end`, so an event ending
//! at 200 and one starting at 200 do not collide. [`Span::intersects`] is the
//! only collision primitive; column assignment, overlap registration and the
//! horizontal no-overlap check all go through it.

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};

// ── Span ────────────────────────────────────────────────────────────────────

/// A half-open range `[start, end)` on one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub start: f64,
    pub end: f64,
}

impl Span {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> f64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Half-open intersection test.
    ///
    /// ```
    /// use day_layout::event::Span;
    ///
    /// assert!(Span::new(0.0, 60.0).intersects(&Span::new(30.0, 90.0)));
    /// assert!(!Span::new(100.0, 200.0).intersects(&Span::new(200.0, 300.0)));
    /// ```
    pub fn intersects(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }
}

// ── EventInput ──────────────────────────────────────────────────────────────

/// One event as handed to [`layout`](crate::layout::layout).
///
/// The unit of `start` and `end` is opaque (pixels, minutes); it only has to
/// be consistent across the list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EventInput {
    pub start: f64,
    pub end: f64,
}

impl EventInput {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn interval(&self) -> Span {
        Span::new(self.start, self.end)
    }
}

impl From<(f64, f64)> for EventInput {
    fn from((start, end): (f64, f64)) -> Self {
        Self::new(start, end)
    }
}

/// Reject the batch if any event has `end <= start` or a non-finite bound.
///
/// Runs before any placement so a bad event never leaves partial geometry.
pub(crate) fn validate_events(events: &[EventInput]) -> Result<()> {
    for (id, event) in events.iter().enumerate() {
        let finite = event.start.is_finite() && event.end.is_finite();
        if !finite || event.end <= event.start {
            return Err(LayoutError::InvalidInterval {
                id,
                start: event.start,
                end: event.end,
            });
        }
    }
    Ok(())
}

// ── EventLayout ─────────────────────────────────────────────────────────────

/// A laid-out event, ready for a renderer.
///
/// `top` and `height` are passed through from the input. `column`, `width`
/// and `margin_left` are the computed horizontal slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventLayout {
    /// Position in the input list, starting at 0.
    pub id: usize,
    pub start: f64,
    pub end: f64,
    pub top: f64,
    pub height: f64,
    /// Zero-based column the event was assigned to.
    pub column: usize,
    pub width: f64,
    pub margin_left: f64,
}

impl EventLayout {
    pub(crate) fn new(id: usize, input: &EventInput) -> Self {
        Self {
            id,
            start: input.start,
            end: input.end,
            top: input.start,
            height: input.end - input.start,
            column: 0,
            width: 0.0,
            margin_left: 0.0,
        }
    }

    /// The vertical interval `[start, end)`.
    pub fn interval(&self) -> Span {
        Span::new(self.start, self.end)
    }

    /// The horizontal extent `[margin_left, margin_left + width)`.
    pub fn span(&self) -> Span {
        Span::new(self.margin_left, self.margin_left + self.width)
    }

    pub fn collides_with(&self, other: &EventLayout) -> bool {
        self.interval().intersects(&other.interval())
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
