// ledge_nav: any-angle pathfinding for agents in a 3D voxel world.
//
// This crate finds routes for a two-cell-tall agent that walks, steps up,
// climbs and falls through a grid of voxels with physical properties. The
// world is reached only through the `WorldQuery` port, so the core has no
// dependency on any particular game or storage layout.
//
// Module overview:
// - `types.rs`:     VoxelCoord, CoordBounds.
// - `direction.rs`: The 26 move directions and their four families.
// - `material.rs`:  Material enum and its passable/safe/climbable tables.
// - `world.rs`:     WorldQuery port + VoxelWorld, a dense grid with DDA raycast.
// - `node.rs`:      Lattice nodes, derived traits, and the per-search NodeCache.
// - `neighbors.rs`: Neighbor expansion pipeline (legal single moves).
// - `cost.rs`:      Edge cost model (unit steps, fall penalty).
// - `heuristic.rs`: Heuristic trait and the built-in estimates.
// - `sight.rs`:     3D Bresenham and the line-of-sight test.
// - `frontier.rs`:  Min-heap frontier with configurable tie-breaking.
// - `search.rs`:    The search loop, batch search, request validation.
// - `path.rs`:      Path (parent tree + costs), reconstruction, Route.
// - `config.rs`:    SearchConfig, JSON-loadable.
// - `error.rs`:     NavError.
// - `terrain.rs`:   Seeded test terrain (uses `ledge_prng`).
//
// **Critical constraint: read-only world.** A search never mutates the
// world and assumes it does not change while the search runs. Results are a
// pure function of `(world, config, request)`.

pub mod config;
pub mod cost;
pub mod direction;
pub mod error;
pub mod frontier;
pub mod heuristic;
pub mod material;
pub mod neighbors;
pub mod node;
pub mod path;
pub use ledge_prng as prng;
pub mod search;
pub mod sight;
pub mod terrain;
pub mod types;
pub mod world;

pub use config::SearchConfig;
pub use error::{NavError, NavResult};
pub use path::{Path, Route, SearchOutcome};
pub use search::{SearchRequest, search, search_batch, search_with_heuristic};
pub use types::{CoordBounds, VoxelCoord};
pub use world::{VoxelWorld, WorldQuery};
