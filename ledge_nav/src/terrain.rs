// Seeded procedural terrain for tests and benchmarks.
//
// Builds a `VoxelWorld` with a bedrock base, a stone floor whose top is at
// `FLOOR_Y`, and a scatter of features that exercise every movement rule:
// pillars to walk around and step onto, pits to drop into, overhangs that
// clip heads, hazards on and above the floor, water patches, and ladder
// columns with a ledge at the top. Agents stand at `WALK_Y`.
//
// Generation draws from a `TerrainRng` seeded by the caller, so the same
// seed and `TerrainParams` always produce the same world.
//
// See also: `ledge_prng` for the generator, `tests/properties.rs` and
// `benches/search.rs` which search over these worlds.

use crate::material::Material;
use crate::types::VoxelCoord;
use crate::world::VoxelWorld;
use ledge_prng::TerrainRng;
use serde::{Deserialize, Serialize};

/// Top layer of the stone floor.
pub const FLOOR_Y: i32 = 1;
/// Layer an agent standing on the floor occupies.
pub const WALK_Y: i32 = FLOOR_Y + 1;

/// Shape of a generated world. Densities are per-column probabilities.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainParams {
    pub size_x: u32,
    pub size_y: u32,
    pub size_z: u32,
    pub pillar_density: f64,
    /// Tallest pillar, in cells above the floor.
    pub max_pillar_height: i32,
    pub pit_density: f64,
    pub overhang_density: f64,
    pub hazard_density: f64,
    pub water_density: f64,
    pub ladder_count: u32,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            size_x: 32,
            size_y: 12,
            size_z: 32,
            pillar_density: 0.08,
            max_pillar_height: 4,
            pit_density: 0.04,
            overhang_density: 0.03,
            hazard_density: 0.02,
            water_density: 0.02,
            ladder_count: 3,
        }
    }
}

const FLOOR_HAZARDS: [Material; 1] = [Material::MagmaBlock];
const WALK_HAZARDS: [Material; 3] = [Material::Lava, Material::Cactus, Material::SweetBerryBush];

/// Generate a world from `seed`.
pub fn generate(seed: u64, params: &TerrainParams) -> VoxelWorld {
    let mut rng = TerrainRng::new(seed);
    let mut world = VoxelWorld::new(params.size_x, params.size_y, params.size_z);
    world.fill_layer(0, Material::Bedrock);
    world.fill_layer(FLOOR_Y, Material::Stone);

    let top = params.size_y as i32 - 1;
    let tallest = params.max_pillar_height.max(1);

    for z in 0..params.size_z as i32 {
        for x in 0..params.size_x as i32 {
            let floor = VoxelCoord::new(x, FLOOR_Y, z);
            let walk = floor.up(1);

            if rng.chance(params.pillar_density) {
                let height = rng.range_i32(1, tallest + 1);
                let cap = VoxelCoord::new(x, (WALK_Y + height - 1).min(top), z);
                world.fill(walk, cap, Material::Stone);
            } else if rng.chance(params.pit_density) {
                world.set(floor, Material::Air);
            } else if rng.chance(params.overhang_density) {
                world.set(walk.up(1), Material::Stone);
            } else if rng.chance(params.hazard_density) {
                if rng.chance(0.5) {
                    if let Some(&m) = rng.pick(&FLOOR_HAZARDS) {
                        world.set(floor, m);
                    }
                } else if let Some(&m) = rng.pick(&WALK_HAZARDS) {
                    world.set(walk, m);
                }
            } else if rng.chance(params.water_density) {
                world.set(floor, Material::Water);
            }
        }
    }

    for _ in 0..params.ladder_count {
        place_ladder(&mut rng, &mut world, params);
    }

    world
}

/// A ladder column against a stone wall, with a one-cell ledge on top of
/// the wall to climb out onto.
fn place_ladder(rng: &mut TerrainRng, world: &mut VoxelWorld, params: &TerrainParams) {
    if params.size_x < 2 || params.size_y as i32 <= WALK_Y + 2 {
        return;
    }
    let x = rng.range_i32(0, params.size_x as i32 - 1);
    let z = rng.range_i32(0, params.size_z as i32);
    let height = rng.range_i32(2, (params.size_y as i32 - WALK_Y - 1).max(3));
    let ladder_top = WALK_Y + height - 1;

    // Clear headroom over the ledge first; pillars may have filled it.
    for y in WALK_Y..=ladder_top + 2 {
        world.set(VoxelCoord::new(x, y, z), Material::Air);
        world.set(VoxelCoord::new(x + 1, y, z), Material::Air);
    }
    world.set(VoxelCoord::new(x, FLOOR_Y, z), Material::Stone);
    world.fill(
        VoxelCoord::new(x + 1, WALK_Y, z),
        VoxelCoord::new(x + 1, ladder_top, z),
        Material::Stone,
    );
    world.fill(
        VoxelCoord::new(x, WALK_Y, z),
        VoxelCoord::new(x, ladder_top, z),
        Material::Ladder,
    );
}

/// Every cell where an agent could stand still: passable and safe with
/// headroom, over safe solid ground or in something climbable.
pub fn standing_cells(world: &VoxelWorld) -> Vec<VoxelCoord> {
    let mut cells = Vec::new();
    let Some(bounds) = world.bounds() else {
        return cells;
    };
    for y in bounds.min.y..=bounds.max.y {
        for z in bounds.min.z..=bounds.max.z {
            for x in bounds.min.x..=bounds.max.x {
                let pos = VoxelCoord::new(x, y, z);
                let here = world.get(pos);
                let above = world.get(pos.up(1));
                let below = world.get(pos.down(1));
                let fits = here.is_passable() && here.is_safe() && above.is_passable();
                let held = here.is_climbable() || (below.is_solid() && below.is_safe());
                if fits && held {
                    cells.push(pos);
                }
            }
        }
    }
    cells
}
