// Goal-distance estimates for the search frontier.
//
// Any `Fn(VoxelCoord, VoxelCoord) -> f64` returning a non-negative value can
// steer the search. `HeuristicKind` names the built-in ones so a config file
// can pick one. Euclidean is the default.
//
// Edges landing on unsupported nodes cost far more than their length, so none
// of these is a strict lower bound on realized cost in every world. That only
// makes the search slower to consider falls; it never hides a cheaper
// walking route.

use crate::types::VoxelCoord;
use serde::{Deserialize, Serialize};

/// Estimate of the remaining cost from a node to the goal.
pub trait Heuristic {
    fn estimate(&self, from: VoxelCoord, goal: VoxelCoord) -> f64;
}

impl<F> Heuristic for F
where
    F: Fn(VoxelCoord, VoxelCoord) -> f64,
{
    fn estimate(&self, from: VoxelCoord, goal: VoxelCoord) -> f64 {
        self(from, goal)
    }
}

/// Built-in heuristics, selectable from configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeuristicKind {
    #[default]
    Euclidean,
    Manhattan,
    Chebyshev,
    /// Always zero: the search degenerates to uniform-cost (Dijkstra).
    Zero,
}

impl Heuristic for HeuristicKind {
    fn estimate(&self, from: VoxelCoord, goal: VoxelCoord) -> f64 {
        match self {
            HeuristicKind::Euclidean => from.euclidean_distance(goal),
            HeuristicKind::Manhattan => from.manhattan_distance(goal) as f64,
            HeuristicKind::Chebyshev => f64::from(from.chebyshev_distance(goal)),
            HeuristicKind::Zero => 0.0,
        }
    }
}
