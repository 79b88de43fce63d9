// Neighbor expansion: which cells an agent can reach from a node in one move.
//
// Expansion is an ordered pipeline over the four direction families, with
// each stage able to see what earlier stages admitted:
//
// 1. Orthogonal (N, S, E, W, U, D): structurally always candidates.
// 2. Flat diagonal (NE, ...): the agent must be supported, the destination
//    passable, and both horizontal components clear at foot and head level,
//    so a diagonal never cuts a solid corner or clips a head on an overhang.
// 3. Rising (UN, UNE, ...): supported, headroom two cells above the agent for
//    the jump, and every horizontal component clear one level higher.
// 4. Falling (DN, DNE, ...): only if the same move without the drop was
//    already admitted in this expansion, with components clear one level
//    lower. You may only drop into a corner you could also walk into.
//
// Every survivor then passes the global filter: the destination must fit
// the agent, and either the agent is supported and the destination is
// supported or level, or the move is the straight fall down.
//
// See also: `direction.rs` for the families, `node.rs` for the predicates,
// `search.rs` which calls `neighbors()` once per popped node.

use crate::direction::{Direction, Family};
use crate::node::{Node, NodeCache};
use crate::world::WorldQuery;
use smallvec::SmallVec;

/// Upper bound on neighbors of one node; sized so expansion never spills.
pub type NeighborSet = SmallVec<[Node; 26]>;

/// Order in which families are evaluated. Falling must come after the
/// families that supply its horizontal pairs.
const PIPELINE: [Family; 4] = [
    Family::Orthogonal,
    Family::FlatDiagonal,
    Family::Rising,
    Family::Falling,
];

/// Legal destinations one move from `current`, each tagged with the
/// direction that reaches it. Order follows the pipeline; callers should
/// not rely on it.
pub fn expand<W: WorldQuery + ?Sized>(
    cache: &mut NodeCache<'_, W>,
    current: Node,
) -> SmallVec<[(Direction, Node); 26]> {
    let bounds = cache.bounds();
    let mut admitted: SmallVec<[(Direction, Node); 26]> = SmallVec::new();

    for family in PIPELINE {
        for dir in Direction::of_family(family) {
            let (dx, dy, dz) = dir.offset();
            let dest_pos = current.pos.offset(dx, dy, dz);
            if !bounds.contains(dest_pos) {
                continue;
            }

            let structural = match family {
                Family::Orthogonal => true,
                Family::FlatDiagonal => {
                    current.supported()
                        && cache.passable(dest_pos)
                        && components_clear(cache, current, dir, 0)
                }
                Family::Rising => {
                    current.supported()
                        && cache.passable(current.pos.up(2))
                        && components_clear(cache, current, dir, 1)
                }
                Family::Falling => {
                    pair_admitted(&admitted, dir) && components_clear(cache, current, dir, -1)
                }
            };
            if !structural {
                continue;
            }

            let dest = cache.node(dest_pos);
            if passes_global_filter(current, dest, dir) {
                admitted.push((dir, dest));
            }
        }
    }

    admitted
}

/// Legal destinations one move from `current`.
pub fn neighbors<W: WorldQuery + ?Sized>(
    cache: &mut NodeCache<'_, W>,
    current: Node,
) -> NeighborSet {
    expand(cache, current)
        .into_iter()
        .map(|(_, node)| node)
        .collect()
}

/// Foot and head clearance beside a move, for each horizontal component,
/// at vertical shift `level` (0 flat, +1 rising, -1 falling).
fn components_clear<W: WorldQuery + ?Sized>(
    cache: &mut NodeCache<'_, W>,
    current: Node,
    dir: Direction,
    level: i32,
) -> bool {
    dir.horizontal_components().into_iter().all(|comp| {
        let (cx, _, cz) = comp.offset();
        let foot = current.pos.offset(cx, level, cz);
        cache.passable(foot) && cache.passable(foot.up(1))
    })
}

fn pair_admitted(admitted: &[(Direction, Node)], dir: Direction) -> bool {
    match dir.horizontal_pair() {
        Some(pair) => admitted.iter().any(|(d, _)| *d == pair),
        None => false,
    }
}

fn passes_global_filter(current: Node, dest: Node, dir: Direction) -> bool {
    if !dest.can_fit() {
        return false;
    }
    if dir == Direction::Down {
        return true;
    }
    let level = dest.pos.y == current.pos.y;
    current.supported() && (dest.supported() || level)
}
