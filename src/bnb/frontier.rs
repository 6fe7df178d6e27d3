//! Open-node frontier.
//!
//! A binary min-heap that owns the open nodes. Selection order is given by
//! the key `(bound, order, id)`: smallest bound first, then the
//! lexicographically smallest job sequence, then the earliest created node.
//! The key lives on the heap entry, not on [`PartialSchedule`].

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::schedule::PartialSchedule;

struct OpenNode(PartialSchedule);

impl OpenNode {
    fn cmp_key(&self, other: &Self) -> Ordering {
        let (a, b) = (&self.0, &other.0);
        a.bound()
            .cmp(&b.bound())
            .then_with(|| a.order().cmp(b.order()))
            .then_with(|| a.id().cmp(&b.id()))
    }
}

impl PartialEq for OpenNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp_key(other) == Ordering::Equal
    }
}

impl Eq for OpenNode {}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenNode {
    // Reversed: BinaryHeap pops the maximum.
    fn cmp(&self, other: &Self) -> Ordering {
        other.cmp_key(self)
    }
}

/// Open search nodes, popped smallest bound first.
#[derive(Default)]
pub struct Frontier {
    heap: BinaryHeap<OpenNode>,
    peak: usize,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: PartialSchedule) {
        self.heap.push(OpenNode(node));
        self.peak = self.peak.max(self.heap.len());
    }

    /// Removes and returns the most promising node.
    pub fn pop(&mut self) -> Option<PartialSchedule> {
        self.heap.pop().map(|n| n.0)
    }

    /// Discards every node whose bound is at least `bound`.
    ///
    /// Returns the number of discarded nodes.
    pub fn prune_at_or_above(&mut self, bound: i64) -> usize {
        let before = self.heap.len();
        self.heap.retain(|n| n.0.bound() < bound);
        before - self.heap.len()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Largest size the frontier has reached.
    pub fn peak(&self) -> usize {
        self.peak
    }
}
