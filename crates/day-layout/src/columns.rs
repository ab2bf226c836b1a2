//! First-fit column assignment.
//!
//! Each event goes into the lowest-indexed column none of whose members it
//! collides with; a new column is opened when every existing one is blocked.
//! The whole column is checked, not just its last entry, so a column frees up
//! again once its earlier occupants have ended.
//!
//! This is greedy online interval colouring. It never puts two colliding
//! events in the same column, but it is order dependent: fed events out of
//! start order it can open more columns than the largest group of mutually
//! overlapping events.

use tracing::debug;

use crate::event::EventLayout;

/// The vertical lanes of one layout run, holding event ids in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Columns {
    lanes: Vec<Vec<usize>>,
}

impl Columns {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of open columns.
    pub fn len(&self) -> usize {
        self.lanes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lanes.is_empty()
    }

    /// Index of the last open column, 0 when none are open.
    pub fn highest_index(&self) -> usize {
        self.lanes.len().saturating_sub(1)
    }

    /// Event ids in `column`, in placement order.
    pub fn members(&self, column: usize) -> &[usize] {
        self.lanes.get(column).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Place `events[id]` in the first column it fits and record the column
    /// on the event. Returns the column index.
    pub fn place(&mut self, events: &mut [EventLayout], id: usize) -> usize {
        let interval = events[id].interval();
        let fits = |lane: &Vec<usize>| {
            !lane
                .iter()
                .any(|&member| events[member].interval().intersects(&interval))
        };

        let column = match self.lanes.iter().position(fits) {
            Some(column) => {
                self.lanes[column].push(id);
                column
            }
            None => {
                self.lanes.push(vec![id]);
                let column = self.lanes.len() - 1;
                debug!(column, event = id, "opened column");
                column
            }
        };

        events[id].column = column;
        column
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
