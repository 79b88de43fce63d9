// The world query port and a dense in-memory world that implements it.
//
// `WorldQuery` is the only thing the pathfinding core asks of its host: three
// per-cell predicates and a ray test against solid geometry. A host backed by
// a live game world implements it over its own chunk storage; it should answer
// "not passable / not safe" for cells it cannot load rather than fail.
//
// `VoxelWorld` is the bundled implementation: a flat `Vec<Material>` indexed
// by `x + z * size_x + y * size_x * size_z` relative to an origin, with a
// configurable fill material for everything outside the box (default
// `Bedrock`, so unloaded space is impassable but not hazardous). It is what
// the tests, terrain generator and benchmarks search over.
//
// `raycast_hits_solid()` is a 3D DDA (Amanatides & Woo) voxel traversal that
// tests whether any solid voxel lies between two points; `raycast_blocked()`
// adapts it to the port's origin/direction/distance form.
//
// See also: `material.rs` for how materials map to predicates, `node.rs`
// which memoizes port answers per search, `sight.rs` which casts the rays.
//
// **Critical constraint:** the core never mutates the world. A search sees
// one consistent snapshot for its whole duration.

use crate::material::Material;
use crate::types::{CoordBounds, VoxelCoord};

/// Read-only questions the search asks about the world.
///
/// Implementations must be pure for the duration of a search: the same
/// coordinate must get the same answer every time it is asked.
pub trait WorldQuery {
    /// The cell does not block entry.
    fn is_passable(&self, pos: VoxelCoord) -> bool;

    /// The cell is not an instant hazard.
    fn is_safe(&self, pos: VoxelCoord) -> bool;

    /// The cell holds an agent vertically (ladder-like or liquid-like).
    fn is_climbable(&self, pos: VoxelCoord) -> bool;

    /// `true` if a ray from `origin` along `direction` meets solid geometry
    /// within `max_distance`. `direction` need not be normalized.
    fn raycast_blocked(&self, origin: [f64; 3], direction: [f64; 3], max_distance: f64) -> bool;
}

impl<W: WorldQuery + ?Sized> WorldQuery for &W {
    fn is_passable(&self, pos: VoxelCoord) -> bool {
        (**self).is_passable(pos)
    }

    fn is_safe(&self, pos: VoxelCoord) -> bool {
        (**self).is_safe(pos)
    }

    fn is_climbable(&self, pos: VoxelCoord) -> bool {
        (**self).is_climbable(pos)
    }

    fn raycast_blocked(&self, origin: [f64; 3], direction: [f64; 3], max_distance: f64) -> bool {
        (**self).raycast_blocked(origin, direction, max_distance)
    }
}

/// Dense 3D material grid.
#[derive(Clone, Debug)]
pub struct VoxelWorld {
    /// Flat storage: index = x + z * size_x + y * size_x * size_z (local).
    voxels: Vec<Material>,
    /// World coordinate of local (0, 0, 0).
    pub origin: VoxelCoord,
    pub size_x: u32,
    pub size_y: u32,
    pub size_z: u32,
    /// Returned for every coordinate outside the grid.
    pub outside: Material,
}

impl VoxelWorld {
    /// A world of `Air` with its corner at the lattice origin.
    pub fn new(size_x: u32, size_y: u32, size_z: u32) -> Self {
        Self::with_origin(VoxelCoord::new(0, 0, 0), size_x, size_y, size_z)
    }

    /// A world of `Air` whose local (0, 0, 0) sits at `origin`.
    pub fn with_origin(origin: VoxelCoord, size_x: u32, size_y: u32, size_z: u32) -> Self {
        let total = (size_x as usize) * (size_y as usize) * (size_z as usize);
        Self {
            voxels: vec![Material::Air; total],
            origin,
            size_x,
            size_y,
            size_z,
            outside: Material::Bedrock,
        }
    }

    /// Replace the fill material for out-of-bounds reads.
    pub fn with_outside(mut self, outside: Material) -> Self {
        self.outside = outside;
        self
    }

    /// Inclusive coordinate box covered by storage. `None` for an empty world.
    pub fn bounds(&self) -> Option<CoordBounds> {
        if self.voxels.is_empty() {
            return None;
        }
        let max = self.origin.offset(
            self.size_x as i32 - 1,
            self.size_y as i32 - 1,
            self.size_z as i32 - 1,
        );
        Some(CoordBounds::new(self.origin, max))
    }

    fn index(&self, coord: VoxelCoord) -> Option<usize> {
        let x = i64::from(coord.x) - i64::from(self.origin.x);
        let y = i64::from(coord.y) - i64::from(self.origin.y);
        let z = i64::from(coord.z) - i64::from(self.origin.z);
        if x < 0
            || y < 0
            || z < 0
            || x >= i64::from(self.size_x)
            || y >= i64::from(self.size_y)
            || z >= i64::from(self.size_z)
        {
            return None;
        }
        let sx = self.size_x as usize;
        let sz = self.size_z as usize;
        Some(x as usize + z as usize * sx + y as usize * sx * sz)
    }

    /// Read a voxel. Out-of-bounds reads return `outside`.
    pub fn get(&self, coord: VoxelCoord) -> Material {
        self.index(coord)
            .map(|i| self.voxels[i])
            .unwrap_or(self.outside)
    }

    /// Write a voxel. No-op for out-of-bounds coordinates.
    pub fn set(&mut self, coord: VoxelCoord, material: Material) {
        if let Some(i) = self.index(coord) {
            self.voxels[i] = material;
        }
    }

    /// Fill the inclusive box spanned by two corners.
    pub fn fill(&mut self, a: VoxelCoord, b: VoxelCoord, material: Material) {
        for y in a.y.min(b.y)..=a.y.max(b.y) {
            for z in a.z.min(b.z)..=a.z.max(b.z) {
                for x in a.x.min(b.x)..=a.x.max(b.x) {
                    self.set(VoxelCoord::new(x, y, z), material);
                }
            }
        }
    }

    /// Fill one whole horizontal layer of storage.
    pub fn fill_layer(&mut self, y: i32, material: Material) {
        let Some(bounds) = self.bounds() else {
            return;
        };
        self.fill(
            VoxelCoord::new(bounds.min.x, y, bounds.min.z),
            VoxelCoord::new(bounds.max.x, y, bounds.max.z),
            material,
        );
    }

    /// 3D DDA raycast: returns `true` if any solid voxel lies on the segment
    /// from `from` to `to` (world-space points).
    ///
    /// Amanatides & Woo traversal. Stops at the first solid voxel or once the
    /// segment is exhausted. The voxel containing `to` is not tested, so a
    /// ray aimed at a cell never occludes itself.
    pub fn raycast_hits_solid(&self, from: [f64; 3], to: [f64; 3]) -> bool {
        let dir = [to[0] - from[0], to[1] - from[1], to[2] - from[2]];

        let mut voxel = [
            from[0].floor() as i32,
            from[1].floor() as i32,
            from[2].floor() as i32,
        ];
        let end_voxel = [
            to[0].floor() as i32,
            to[1].floor() as i32,
            to[2].floor() as i32,
        ];

        let mut step = [0i32; 3];
        let mut t_max = [f64::INFINITY; 3];
        let mut t_delta = [f64::INFINITY; 3];

        for axis in 0..3 {
            if dir[axis] > 0.0 {
                step[axis] = 1;
                t_delta[axis] = 1.0 / dir[axis];
                t_max[axis] = ((f64::from(voxel[axis]) + 1.0) - from[axis]) / dir[axis];
            } else if dir[axis] < 0.0 {
                step[axis] = -1;
                t_delta[axis] = 1.0 / (-dir[axis]);
                t_max[axis] = (from[axis] - f64::from(voxel[axis])) / (-dir[axis]);
            }
            // A zero component keeps step 0 and t_max at infinity: that axis never advances.
        }

        loop {
            if voxel == end_voxel {
                return false;
            }

            if self
                .get(VoxelCoord::new(voxel[0], voxel[1], voxel[2]))
                .is_solid()
            {
                return true;
            }

            let min_axis = if t_max[0] <= t_max[1] && t_max[0] <= t_max[2] {
                0
            } else if t_max[1] <= t_max[2] {
                1
            } else {
                2
            };

            if t_max[min_axis] > 1.0 {
                return false;
            }

            voxel[min_axis] += step[min_axis];
            t_max[min_axis] += t_delta[min_axis];
        }
    }
}

impl WorldQuery for VoxelWorld {
    fn is_passable(&self, pos: VoxelCoord) -> bool {
        self.get(pos).is_passable()
    }

    fn is_safe(&self, pos: VoxelCoord) -> bool {
        self.get(pos).is_safe()
    }

    fn is_climbable(&self, pos: VoxelCoord) -> bool {
        self.get(pos).is_climbable()
    }

    fn raycast_blocked(&self, origin: [f64; 3], direction: [f64; 3], max_distance: f64) -> bool {
        let len = (direction[0] * direction[0]
            + direction[1] * direction[1]
            + direction[2] * direction[2])
            .sqrt();
        if len == 0.0 || max_distance.is_nan() || max_distance <= 0.0 {
            return false;
        }
        let scale = max_distance / len;
        let to = [
            origin[0] + direction[0] * scale,
            origin[1] + direction[1] * scale,
            origin[2] + direction[2] * scale,
        ];
        self.raycast_hits_solid(origin, to)
    }
}
