//! Width assignment.
//!
//! Runs after every event has a column and its collisions are known. Column
//! membership is never revisited here; only `width` and `margin_left` move.
//!
//! 1. [`apply_global_width`] gives every event `total_width / column_count`,
//!    which squeezes events whose own collisions use fewer columns.
//! 2. [`reflow_neighborhood`] or [`reflow_components`] then hands the unused
//!    space back.
//!
//! # Pinned left column
//!
//! During a re-pack an event whose `margin_left` is exactly 0 keeps offset 0,
//! so the leftmost column never shifts sideways.
//!
//! # Re-pack guard
//!
//! A re-pack is abandoned, leaving geometry as it was, when the cluster's
//! rightmost member already reaches `total_width - overflow_margin`, when the
//! new geometry would run past `total_width`, or when it would make any
//! cluster member overlap horizontally with an event it collides with.

use tracing::{debug, trace};

use crate::columns::Columns;
use crate::config::LayoutConfig;
use crate::event::{EventLayout, Span};
use crate::overlap::OverlapIndex;

/// Slack for float comparisons against the right edge.
const EDGE_EPSILON: f64 = 1e-9;

// ── Global width pass ───────────────────────────────────────────────────────

/// Give every event the same slot width derived from the total column count.
pub fn apply_global_width(events: &mut [EventLayout], columns: &Columns, config: &LayoutConfig) {
    let slot = config.total_width / (columns.highest_index() + 1) as f64;
    for column in 0..columns.len() {
        for &id in columns.members(column) {
            events[id].width = slot - config.gutter;
            events[id].margin_left = slot * column as f64;
        }
    }
}

// ── Neighborhood reflow ─────────────────────────────────────────────────────

/// Tighten widths using each event's local collision neighborhood.
///
/// Visits events in `order`:
/// - no collisions: full usable width;
/// - fewer direct neighbors than `column_counter`: re-pack its two-hop
///   cluster at `total_width / (neighbors + 1)`;
/// - otherwise the global width stays.
///
/// The neighbor count is a stand-in for the local clique size, so this can
/// leave some events narrower than they could be.
pub fn reflow_neighborhood(
    events: &mut [EventLayout],
    overlap: &OverlapIndex,
    column_counter: usize,
    order: &[usize],
    config: &LayoutConfig,
) {
    for &id in order {
        match overlap.neighbors(id) {
            None => {
                trace!(event = id, "no collisions, full width");
                events[id].width = config.full_width();
            }
            Some(neighbors) if neighbors.len() < column_counter => {
                let new_width = config.total_width / (neighbors.len() + 1) as f64;
                repack(events, overlap, id, new_width, config);
            }
            Some(_) => {}
        }
    }
}

/// Re-pack `id` and its two-hop neighborhood into slots of `new_width`.
///
/// Members are ordered by current `margin_left` (stable, so ties keep
/// cluster order) and the i-th member moves to `new_width * i`, except that
/// members at offset 0 stay there. Every member gets `new_width - gutter`.
///
/// Returns `false` if the re-pack was abandoned.
pub fn repack(
    events: &mut [EventLayout],
    overlap: &OverlapIndex,
    id: usize,
    new_width: f64,
    config: &LayoutConfig,
) -> bool {
    let mut cluster = overlap.two_hop(id);
    cluster.sort_by(|&a, &b| events[a].margin_left.total_cmp(&events[b].margin_left));

    let Some(&rightmost) = cluster.last() else {
        return false;
    };
    let right_edge = events[rightmost].margin_left + events[rightmost].width + config.gutter;
    if right_edge >= config.repack_bound() {
        trace!(event = id, right_edge, "cluster already at right edge, skipping re-pack");
        return false;
    }

    let width = new_width - config.gutter;
    let proposed: Vec<(usize, f64)> = cluster
        .iter()
        .enumerate()
        .map(|(index, &member)| {
            let margin = if events[member].margin_left == 0.0 {
                0.0
            } else {
                new_width * index as f64
            };
            (member, margin)
        })
        .collect();

    let proposed_span = |member: usize| -> Span {
        proposed
            .iter()
            .find(|(candidate, _)| *candidate == member)
            .map_or_else(|| events[member].span(), |&(_, margin)| Span::new(margin, margin + width))
    };

    for &(member, margin) in &proposed {
        if margin + width > config.total_width + EDGE_EPSILON {
            debug!(event = id, member, margin, width, "re-pack would overflow the day, abandoned");
            return false;
        }
        let span = Span::new(margin, margin + width);
        for &other in overlap.neighbors(member).unwrap_or(&[]) {
            if span.intersects(&proposed_span(other)) {
                debug!(event = id, member, other, "re-pack would overlap a collision, abandoned");
                return false;
            }
        }
    }

    trace!(event = id, new_width, cluster = ?cluster, "re-packed cluster");
    for (member, margin) in proposed {
        events[member].width = width;
        events[member].margin_left = margin;
    }
    true
}

// ── Component reflow ────────────────────────────────────────────────────────

/// Size each connected collision group by the columns it actually uses.
///
/// Colliding events always share a group, and first-fit fills a group's
/// columns from 0 upward, so `max column + 1` slots always fit the group.
pub fn reflow_components(
    events: &mut [EventLayout],
    overlap: &OverlapIndex,
    order: &[usize],
    config: &LayoutConfig,
) {
    for component in overlap.components(order.iter().copied()) {
        let used = component
            .iter()
            .map(|&member| events[member].column)
            .max()
            .unwrap_or(0)
            + 1;
        let slot = config.total_width / used as f64;
        trace!(size = component.len(), columns = used, "sized component");
        for member in component {
            events[member].width = slot - config.gutter;
            events[member].margin_left = slot * events[member].column as f64;
        }
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
