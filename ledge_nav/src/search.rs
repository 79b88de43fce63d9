// Any-angle best-first search over the voxel lattice.
//
// The search pops the node with the lowest `g + h` from the frontier and
// expands it with `neighbors()`. For each neighbor it first tries the popped
// node's own parent as the edge source: if that grandparent can see the
// neighbor (`line_of_sight()`), the edge skips the popped node entirely and
// the path bends only where something is in the way. Otherwise the edge is an
// ordinary grid step. A shortcut straight down a shaft still pays the fall
// penalty for every unsupported cell it skips. Improved neighbors are pushed
// again; older frontier entries for them are not removed, and reprocessing
// one is harmless because it reads the current costs.
//
// A search stops when it pops the goal, when it pops a node at or beyond
// `max_distance` from the start (that node becomes `Path::end`), when the
// iteration cap runs out, or when the frontier drains. None of these is an
// error; only malformed requests are.
//
// With `SearchConfig::any_angle` off the grandparent is never tried and the
// search is plain A* over the neighbor graph.
//
// See also: `neighbors.rs` for move legality, `sight.rs` for the shortcut
// test, `cost.rs` for edge costs, `path.rs` for what comes back.
//
// **Critical constraint:** a search owns its frontier, node cache and path
// exclusively. Concurrent searches (`search_batch`) share only the read-only
// world and config.

use crate::config::SearchConfig;
use crate::cost::{edge_cost, line_cost};
use crate::error::{Endpoint, NavError, NavResult};
use crate::frontier::Frontier;
use crate::heuristic::Heuristic;
use crate::neighbors::neighbors;
use crate::node::NodeCache;
use crate::path::{Path, SearchOutcome};
use crate::sight::{bresenham_3d, line_of_sight};
use crate::types::VoxelCoord;
use crate::world::WorldQuery;
use rayon::prelude::*;
use tracing::{debug, trace, warn};

/// One start/goal pair to search between.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchRequest {
    pub start: VoxelCoord,
    pub goal: VoxelCoord,
    /// Euclidean distance from `start` at which the search gives up on the
    /// goal and stops. `f64::INFINITY` disables the cutoff.
    pub max_distance: f64,
}

impl SearchRequest {
    /// A request with no distance cutoff.
    pub fn new(start: VoxelCoord, goal: VoxelCoord) -> Self {
        Self {
            start,
            goal,
            max_distance: f64::INFINITY,
        }
    }

    pub fn with_max_distance(mut self, max_distance: f64) -> Self {
        self.max_distance = max_distance;
        self
    }
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Search with the heuristic named in `config`.
pub fn search<W: WorldQuery + ?Sized>(
    world: &W,
    config: &SearchConfig,
    request: SearchRequest,
) -> NavResult<Path> {
    search_with_heuristic(world, config, request, &config.heuristic)
}

/// Search with a caller-supplied heuristic. `config.heuristic` is ignored.
pub fn search_with_heuristic<W, H>(
    world: &W,
    config: &SearchConfig,
    request: SearchRequest,
    heuristic: &H,
) -> NavResult<Path>
where
    W: WorldQuery + ?Sized,
    H: Heuristic + ?Sized,
{
    validate(config, &request)?;
    Ok(run(world, config, request, heuristic))
}

/// Run independent searches in parallel. Results are in request order.
pub fn search_batch<W: WorldQuery + Sync + ?Sized>(
    world: &W,
    config: &SearchConfig,
    requests: &[SearchRequest],
) -> Vec<NavResult<Path>> {
    requests
        .par_iter()
        .map(|request| search(world, config, *request))
        .collect()
}

fn validate(config: &SearchConfig, request: &SearchRequest) -> NavResult<()> {
    config.validate()?;
    let endpoints = [(Endpoint::Start, request.start), (Endpoint::Goal, request.goal)];
    for (endpoint, coord) in endpoints {
        if !config.bounds.contains(coord) {
            return Err(NavError::InvalidCoordinate {
                endpoint,
                coord,
                bounds: config.bounds,
            });
        }
    }
    if request.max_distance.is_nan() || request.max_distance < 0.0 {
        return Err(NavError::InvalidParameter {
            name: "max_distance",
            value: request.max_distance,
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Main loop
// ---------------------------------------------------------------------------

fn run<W, H>(world: &W, config: &SearchConfig, request: SearchRequest, heuristic: &H) -> Path
where
    W: WorldQuery + ?Sized,
    H: Heuristic + ?Sized,
{
    let SearchRequest {
        start,
        goal,
        max_distance,
    } = request;

    let mut cache = NodeCache::new(world, config.bounds);
    let mut frontier = Frontier::new(config.tie_break);
    let mut path = Path::new(start, goal);
    frontier.push(start, 0.0, 0.0);

    loop {
        let Some(entry) = frontier.pop() else {
            path.outcome = SearchOutcome::FrontierExhausted;
            break;
        };
        if path.iterations >= config.max_iterations {
            warn!(
                iterations = path.iterations,
                %start,
                %goal,
                "search hit its iteration cap"
            );
            path.outcome = SearchOutcome::IterationsExhausted;
            break;
        }
        path.iterations += 1;

        let current_pos = entry.pos;
        let travelled = start.euclidean_distance(current_pos);
        if travelled >= max_distance {
            trace!(%current_pos, travelled, max_distance, "distance cutoff");
            path.end = current_pos;
            path.outcome = SearchOutcome::DistanceCutOff;
            break;
        }
        if current_pos == goal {
            path.outcome = SearchOutcome::GoalReached;
            break;
        }

        let current = cache.node(current_pos);
        let grandparent = path.parents.get(&current_pos).copied().unwrap_or(current_pos);

        for next in neighbors(&mut cache, current) {
            let source = if config.any_angle
                && line_of_sight(&mut cache, grandparent, next.pos, &config.sight)
            {
                grandparent
            } else {
                current_pos
            };
            let Some(&source_cost) = path.costs.get(&source) else {
                continue;
            };
            let source_node = cache.node(source);
            let new_cost = if source == current_pos {
                source_cost + edge_cost(&source_node, &next, &config.cost)
            } else {
                let falling = falling_cells_between(&mut cache, source, next.pos);
                source_cost + line_cost(&source_node, &next, falling, &config.cost)
            };

            let improved = path.costs.get(&next.pos).is_none_or(|&old| new_cost < old);
            if improved {
                path.costs.insert(next.pos, new_cost);
                path.parents.insert(next.pos, source);
                let priority = new_cost + heuristic.estimate(next.pos, goal);
                frontier.push(next.pos, priority, new_cost);
            }
        }
    }

    debug!(
        outcome = ?path.outcome,
        iterations = path.iterations,
        frontier = frontier.len(),
        drained = frontier.is_empty(),
        nodes = cache.nodes_built(),
        cells = cache.cells_queried(),
        "search finished"
    );
    path
}

/// Unsupported cells strictly between the ends of a straight edge.
fn falling_cells_between<W: WorldQuery + ?Sized>(
    cache: &mut NodeCache<'_, W>,
    from: VoxelCoord,
    to: VoxelCoord,
) -> usize {
    let line = bresenham_3d(from, to);
    let inner = line.len().saturating_sub(2);
    line.into_iter()
        .skip(1)
        .take(inner)
        .filter(|&p| !cache.node(p).supported())
        .count()
}
