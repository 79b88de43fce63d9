// Lattice nodes and their memoized physical predicates.
//
// A `Node` is a coordinate plus a `NodeTraits` bundle computed once, when the
// node is first requested from a `NodeCache`. The bundle is plain data, so a
// node is a cheap `Copy` value that never changes after construction.
// Equality and hashing use the coordinate only.
//
// `NodeCache` is the per-search memo table. It remembers the raw port answers
// for every cell it has touched (`CellFacts`) and the derived traits for every
// node it has built, so each `WorldQuery` predicate is asked at most once per
// coordinate per search. A cache belongs to exactly one search and is dropped
// with it; nothing is carried between calls.
//
// Cells outside the configured `CoordBounds` are answered as impassable,
// unsafe and unclimbable without consulting the world.
//
// See also: `world.rs` for the port, `neighbors.rs` and `sight.rs` which read
// through this cache.

use crate::types::{CoordBounds, VoxelCoord};
use crate::world::WorldQuery;
use rustc_hash::FxHashMap;
use std::hash::{Hash, Hasher};

/// Raw answers from the world port for a single cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CellFacts {
    pub passable: bool,
    pub safe: bool,
    pub climbable: bool,
}

impl CellFacts {
    /// What every out-of-range or unloadable cell looks like.
    pub const BLOCKED: CellFacts = CellFacts {
        passable: false,
        safe: false,
        climbable: false,
    };
}

/// Derived predicates of a node. Body height is two cells: the node's own
/// cell holds the feet, the one above holds the head.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NodeTraits {
    pub passable: bool,
    pub safe: bool,
    pub climbable: bool,
    /// Safe, enterable, and the cell above is enterable too.
    pub can_fit: bool,
    /// The agent would not fall from here.
    pub supported: bool,
}

impl NodeTraits {
    /// Combine the facts of a cell with those of the cells directly above
    /// and below it.
    pub fn derive(here: CellFacts, above: CellFacts, below: CellFacts) -> Self {
        let enterable = here.passable || here.climbable;
        let head_room = above.passable || above.climbable;
        let solid_ground = !below.passable && below.safe;
        Self {
            passable: here.passable,
            safe: here.safe,
            climbable: here.climbable,
            can_fit: here.safe && enterable && head_room,
            supported: here.climbable || below.climbable || solid_ground,
        }
    }
}

/// A lattice cell with its precomputed traits.
#[derive(Clone, Copy, Debug)]
pub struct Node {
    pub pos: VoxelCoord,
    pub traits: NodeTraits,
}

impl Node {
    pub fn passable(&self) -> bool {
        self.traits.passable
    }

    pub fn safe(&self) -> bool {
        self.traits.safe
    }

    pub fn climbable(&self) -> bool {
        self.traits.climbable
    }

    pub fn can_fit(&self) -> bool {
        self.traits.can_fit
    }

    pub fn supported(&self) -> bool {
        self.traits.supported
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.pos == other.pos
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.pos.hash(state);
    }
}

/// Per-search memo of port answers and derived node traits.
pub struct NodeCache<'w, W: WorldQuery + ?Sized> {
    world: &'w W,
    bounds: CoordBounds,
    cells: FxHashMap<VoxelCoord, CellFacts>,
    traits: FxHashMap<VoxelCoord, NodeTraits>,
}

impl<'w, W: WorldQuery + ?Sized> NodeCache<'w, W> {
    pub fn new(world: &'w W, bounds: CoordBounds) -> Self {
        Self {
            world,
            bounds,
            cells: FxHashMap::default(),
            traits: FxHashMap::default(),
        }
    }

    pub fn world(&self) -> &'w W {
        self.world
    }

    pub fn bounds(&self) -> CoordBounds {
        self.bounds
    }

    /// Raw facts for a cell, querying the world on first touch.
    pub fn cell(&mut self, pos: VoxelCoord) -> CellFacts {
        if let Some(facts) = self.cells.get(&pos) {
            return *facts;
        }
        let facts = if self.bounds.contains(pos) {
            CellFacts {
                passable: self.world.is_passable(pos),
                safe: self.world.is_safe(pos),
                climbable: self.world.is_climbable(pos),
            }
        } else {
            CellFacts::BLOCKED
        };
        self.cells.insert(pos, facts);
        facts
    }

    pub fn passable(&mut self, pos: VoxelCoord) -> bool {
        self.cell(pos).passable
    }

    /// The node at `pos`, building its traits on first request.
    pub fn node(&mut self, pos: VoxelCoord) -> Node {
        if let Some(traits) = self.traits.get(&pos) {
            return Node { pos, traits: *traits };
        }
        let here = self.cell(pos);
        let above = self.cell(pos.up(1));
        let below = self.cell(pos.down(1));
        let traits = NodeTraits::derive(here, above, below);
        self.traits.insert(pos, traits);
        Node { pos, traits }
    }

    /// Number of distinct cells the world has been asked about.
    pub fn cells_queried(&self) -> usize {
        self.cells.len()
    }

    /// Number of nodes whose traits have been built.
    pub fn nodes_built(&self) -> usize {
        self.traits.len()
    }
}
