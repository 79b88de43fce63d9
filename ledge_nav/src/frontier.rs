// The search frontier: a min-heap of nodes awaiting expansion.
//
// Entries are ordered by estimated total cost `f = g + h`, smallest first.
// Rust's `BinaryHeap` is a max-heap, so `Ord` is reversed. Entries with equal
// `f` are ordered by a configurable `TieBreak`; there is no canonical choice,
// and paths that differ only in tie-breaking are equally good alternatives.
// Every rule ends on a monotonic push counter, so the order is total and a
// search is reproducible for a given rule.
//
// Stale entries (a node pushed again after its cost improved) are not
// removed; the search simply processes them again when popped.

use crate::types::VoxelCoord;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// How entries with equal estimated total cost are ordered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TieBreak {
    /// Earliest pushed first.
    #[default]
    Fifo,
    /// Latest pushed first.
    Lifo,
    /// Larger cost-so-far first (closer to the goal by estimate).
    PreferDeeper,
    /// Smaller cost-so-far first.
    PreferShallower,
}

/// A node waiting in the frontier.
#[derive(Clone, Copy, Debug)]
pub struct FrontierEntry {
    pub pos: VoxelCoord,
    /// Estimated total cost `g + h`.
    pub priority: f64,
    /// Secondary key; smaller pops first.
    tie_cost: f64,
    /// Final key; smaller pops first.
    order: u64,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: the smallest key is "greatest" for the max-heap.
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.tie_cost.total_cmp(&self.tie_cost))
            .then_with(|| other.order.cmp(&self.order))
    }
}

/// Min-heap of pending nodes.
#[derive(Clone, Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<FrontierEntry>,
    tie_break: TieBreak,
    next_sequence: u64,
}

impl Frontier {
    pub fn new(tie_break: TieBreak) -> Self {
        Self {
            heap: BinaryHeap::new(),
            tie_break,
            next_sequence: 0,
        }
    }

    pub fn push(&mut self, pos: VoxelCoord, priority: f64, cost: f64) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        let (tie_cost, order) = match self.tie_break {
            TieBreak::Fifo => (0.0, sequence),
            TieBreak::Lifo => (0.0, u64::MAX - sequence),
            TieBreak::PreferDeeper => (-cost, sequence),
            TieBreak::PreferShallower => (cost, sequence),
        };
        self.heap.push(FrontierEntry {
            pos,
            priority,
            tie_cost,
            order,
        });
    }

    /// Remove and return the entry with the lowest estimated total cost.
    pub fn pop(&mut self) -> Option<FrontierEntry> {
        self.heap.pop()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: i32) -> VoxelCoord {
        VoxelCoord::new(x, 0, 0)
    }

    fn drain(mut f: Frontier) -> Vec<i32> {
        let mut out = Vec::new();
        while let Some(e) = f.pop() {
            out.push(e.pos.x);
        }
        out
    }

    #[test]
    fn lowest_priority_pops_first() {
        let mut f = Frontier::new(TieBreak::Fifo);
        f.push(v(1), 5.0, 0.0);
        f.push(v(2), 1.0, 0.0);
        f.push(v(3), 3.0, 0.0);
        assert_eq!(f.len(), 3);
        assert_eq!(drain(f), vec![2, 3, 1]);
    }

    #[test]
    fn fifo_and_lifo_break_ties_by_push_order() {
        let mut fifo = Frontier::new(TieBreak::Fifo);
        let mut lifo = Frontier::new(TieBreak::Lifo);
        for x in 0..4 {
            fifo.push(v(x), 2.0, 0.0);
            lifo.push(v(x), 2.0, 0.0);
        }
        assert_eq!(drain(fifo), vec![0, 1, 2, 3]);
        assert_eq!(drain(lifo), vec![3, 2, 1, 0]);
    }

    #[test]
    fn depth_preferences_use_cost_so_far() {
        let mut deeper = Frontier::new(TieBreak::PreferDeeper);
        let mut shallower = Frontier::new(TieBreak::PreferShallower);
        for (x, g) in [(0, 1.0), (1, 3.0), (2, 2.0)] {
            deeper.push(v(x), 4.0, g);
            shallower.push(v(x), 4.0, g);
        }
        assert_eq!(drain(deeper), vec![1, 2, 0]);
        assert_eq!(drain(shallower), vec![0, 2, 1]);
    }

    #[test]
    fn tie_break_never_overrides_priority() {
        let mut f = Frontier::new(TieBreak::PreferDeeper);
        f.push(v(0), 1.0, 0.0);
        f.push(v(1), 2.0, 50.0);
        assert_eq!(drain(f), vec![0, 1]);
    }

    #[test]
    fn empty_frontier() {
        let mut f = Frontier::default();
        assert!(f.is_empty());
        assert!(f.pop().is_none());
    }
}
