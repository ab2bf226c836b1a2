//! Collision adjacency between placed events.
//!
//! Built incrementally: right after an event is placed it is compared with
//! every event placed before it, whatever their column, and each collision is
//! recorded in both directions. Neighbor lists keep registration order and
//! never hold duplicates.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use tracing::trace;

use crate::event::EventLayout;

/// Symmetric map from event id to the ids it collides with.
///
/// An id with no entry has no collisions.
#[derive(Debug, Clone, Default)]
pub struct OverlapIndex {
    neighbors: BTreeMap<usize, Vec<usize>>,
}

impl OverlapIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare `events[id]` against every id in `placed` and record each
    /// collision. `placed` may contain `id` itself; self-pairs are skipped.
    pub fn register(&mut self, events: &[EventLayout], placed: &[usize], id: usize) {
        let interval = events[id].interval();
        for &other in placed {
            if other != id && events[other].interval().intersects(&interval) {
                self.add(other, id);
            }
        }
    }

    /// Record that `a` and `b` collide.
    pub fn add(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        trace!(a, b, "registered overlap");
        Self::push_unique(self.neighbors.entry(a).or_default(), b);
        Self::push_unique(self.neighbors.entry(b).or_default(), a);
    }

    fn push_unique(list: &mut Vec<usize>, id: usize) {
        if !list.contains(&id) {
            list.push(id);
        }
    }

    /// Direct neighbors of `id`, or `None` when it collides with nothing.
    pub fn neighbors(&self, id: usize) -> Option<&[usize]> {
        self.neighbors.get(&id).map(Vec::as_slice)
    }

    /// Number of distinct events `id` collides with.
    pub fn degree(&self, id: usize) -> usize {
        self.neighbors.get(&id).map_or(0, Vec::len)
    }

    pub fn collides(&self, a: usize, b: usize) -> bool {
        self.neighbors
            .get(&a)
            .is_some_and(|list| list.contains(&b))
    }

    /// Number of ids with at least one collision.
    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }

    /// `id` plus its neighbors plus their neighbors, first occurrence wins.
    pub fn two_hop(&self, id: usize) -> Vec<usize> {
        let direct = self.neighbors(id).unwrap_or(&[]);
        let mut cluster = Vec::with_capacity(1 + direct.len());
        cluster.push(id);
        cluster.extend_from_slice(direct);
        for &neighbor in direct {
            cluster.extend_from_slice(self.neighbors(neighbor).unwrap_or(&[]));
        }

        let mut seen = BTreeSet::new();
        cluster.retain(|member| seen.insert(*member));
        cluster
    }

    /// Connected components of the collision graph over `ids`, each in
    /// breadth-first order from its first id. Ids without collisions form
    /// singleton components.
    pub fn components(&self, ids: impl IntoIterator<Item = usize>) -> Vec<Vec<usize>> {
        let mut visited = BTreeSet::new();
        let mut components = Vec::new();

        for root in ids {
            if !visited.insert(root) {
                continue;
            }
            let mut component = vec![root];
            let mut queue = VecDeque::from([root]);
            while let Some(current) = queue.pop_front() {
                for &next in self.neighbors(current).unwrap_or(&[]) {
                    if visited.insert(next) {
                        component.push(next);
                        queue.push_back(next);
                    }
                }
            }
            components.push(component);
        }

        components
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
