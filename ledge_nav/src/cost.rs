// Edge cost model.
//
// Every edge costs `base_cost`, multiplied by `fall_penalty` when it lands on
// an unsupported node. The penalty is large enough that any walking or
// climbing route wins over a fall whenever one exists, while still letting
// the search fall when nothing else reaches the goal.
//
// The cost does not depend on edge length: a line-of-sight shortcut across
// many cells costs the same as a single step, as long as the agent stays
// supported along it. A shortcut that passes through unsupported cells (the
// straight drop down a shaft) is charged the fall penalty for each of them,
// so skipping the intermediate nodes of a fall never makes it cheaper.

use crate::node::Node;
use serde::{Deserialize, Serialize};

/// Tunables of the cost model.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostParams {
    pub base_cost: f64,
    /// Multiplier for edges that end on an unsupported node.
    pub fall_penalty: f64,
}

impl Default for CostParams {
    fn default() -> Self {
        Self {
            base_cost: 1.0,
            fall_penalty: 100.0,
        }
    }
}

/// Cost of moving from `from` to `to`.
pub fn edge_cost(_from: &Node, to: &Node, params: &CostParams) -> f64 {
    if to.supported() {
        params.base_cost
    } else {
        params.base_cost * params.fall_penalty
    }
}

/// Cost of a line-of-sight edge that passes through `falling_cells`
/// unsupported cells strictly between its ends.
pub fn line_cost(from: &Node, to: &Node, falling_cells: usize, params: &CostParams) -> f64 {
    edge_cost(from, to, params) + falling_cells as f64 * params.base_cost * params.fall_penalty
}
