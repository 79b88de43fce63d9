// Block materials for the reference voxel world.
//
// The pathfinding core only ever sees three booleans per cell (passable,
// safe, climbable) through `WorldQuery`. `Material` is how the bundled
// `VoxelWorld` answers them. The classification follows the usual
// block-game conventions: fluids and foliage are passable, a handful of
// damaging blocks are unsafe, and ladders, vines and water hold an agent
// in place vertically.
//
// See also: `world.rs` for the grid that stores these.

use serde::{Deserialize, Serialize};

/// The material occupying one voxel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Material {
    #[default]
    Air,
    Stone,
    Dirt,
    /// Unbreakable floor; also what out-of-bounds reads return by default.
    Bedrock,
    /// Passable decoration that neither supports nor hurts.
    TallGrass,
    Ladder,
    Vine,
    Water,
    Lava,
    MagmaBlock,
    Cactus,
    SweetBerryBush,
}

impl Material {
    /// Does not block an agent from entering the cell.
    pub const fn is_passable(self) -> bool {
        matches!(
            self,
            Material::Air
                | Material::TallGrass
                | Material::Ladder
                | Material::Vine
                | Material::Water
                | Material::Lava
                | Material::SweetBerryBush
        )
    }

    /// Not an instant hazard to stand in or on.
    pub const fn is_safe(self) -> bool {
        !matches!(
            self,
            Material::Lava | Material::MagmaBlock | Material::Cactus | Material::SweetBerryBush
        )
    }

    /// Supports vertical movement without falling.
    pub const fn is_climbable(self) -> bool {
        matches!(self, Material::Ladder | Material::Vine | Material::Water)
    }

    /// Blocks rays. Everything that is not passable is solid.
    pub const fn is_solid(self) -> bool {
        !self.is_passable()
    }
}
