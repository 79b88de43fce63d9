// Search results: the parent tree, best-known costs, and reconstruction.
//
// A `Path` is what one search call leaves behind. `parents` is the search
// tree (the start maps to itself), `costs` the best cost-from-start found for
// every reached node, and `end` the node the search stopped at: the goal,
// unless the distance cutoff fired first. Nothing is mutated after the
// search returns.
//
// Reconstruction walks `parents` backward from a node until it reaches a
// node that is its own parent, then reverses. A node the search never
// reached reconstructs to an empty sequence; "no path" is an ordinary
// result, not an error.
//
// See also: `search.rs` which fills these maps.

use crate::types::VoxelCoord;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Why a search stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchOutcome {
    /// The goal was popped from the frontier.
    GoalReached,
    /// A node at or beyond the maximum travel distance was popped; it is `end`.
    DistanceCutOff,
    /// The iteration cap ran out first.
    IterationsExhausted,
    /// Every reachable node was expanded without finding the goal.
    FrontierExhausted,
}

/// Parent tree and cost map of one search.
#[derive(Clone, Debug)]
pub struct Path {
    pub parents: FxHashMap<VoxelCoord, VoxelCoord>,
    pub costs: FxHashMap<VoxelCoord, f64>,
    pub start: VoxelCoord,
    /// The requested goal.
    pub goal: VoxelCoord,
    /// Where reconstruction starts by default.
    pub end: VoxelCoord,
    pub outcome: SearchOutcome,
    /// Frontier pops performed.
    pub iterations: usize,
}

impl Path {
    /// An empty tree rooted at `start`, aimed at `goal`.
    pub fn new(start: VoxelCoord, goal: VoxelCoord) -> Self {
        let mut parents = FxHashMap::default();
        let mut costs = FxHashMap::default();
        parents.insert(start, start);
        costs.insert(start, 0.0);
        Self {
            parents,
            costs,
            start,
            goal,
            end: goal,
            outcome: SearchOutcome::FrontierExhausted,
            iterations: 0,
        }
    }

    /// Whether the search linked `node` into its tree.
    pub fn reached(&self, node: VoxelCoord) -> bool {
        self.parents.contains_key(&node)
    }

    /// Best known cost from the start to `node`.
    pub fn cost_to(&self, node: VoxelCoord) -> Option<f64> {
        self.costs.get(&node).copied()
    }

    /// Cost to `end`, if `end` was reached.
    pub fn total_cost(&self) -> Option<f64> {
        if self.reached(self.end) {
            self.cost_to(self.end)
        } else {
            None
        }
    }

    /// Node sequence from the start to `end`. Empty if `end` was never reached.
    pub fn reconstruct(&self) -> Vec<VoxelCoord> {
        self.reconstruct_from(self.end)
    }

    /// Node sequence from the start to `node`. Empty if `node` was never
    /// reached.
    pub fn reconstruct_from(&self, node: VoxelCoord) -> Vec<VoxelCoord> {
        if !self.reached(node) {
            return Vec::new();
        }
        let mut stack = vec![node];
        let mut current = node;
        while let Some(&parent) = self.parents.get(&current) {
            // A malformed tree could loop; a chain never has more links than the map.
            if parent == current || stack.len() > self.parents.len() {
                break;
            }
            stack.push(parent);
            current = parent;
        }
        stack.reverse();
        stack
    }

    /// Serializable summary for hosts.
    pub fn route(&self) -> Route {
        Route {
            nodes: self.reconstruct(),
            total_cost: self.total_cost(),
            outcome: self.outcome,
            iterations: self.iterations,
        }
    }
}

/// Flattened result of a search, suitable for sending to a host.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub nodes: Vec<VoxelCoord>,
    pub total_cost: Option<f64>,
    pub outcome: SearchOutcome,
    pub iterations: usize,
}
