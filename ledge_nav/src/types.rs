// Spatial types shared across the pathfinding core.
//
// `VoxelCoord` identifies one unit cell of the lattice. It carries no world
// identity, so coordinates from different queries compare and hash alike.
// `CoordBounds` is the inclusive box of coordinates a search may touch; it
// stands in for "representable range" at the search boundary.
//
// See also: `node.rs` for the predicate bundle attached to a coordinate,
// `direction.rs` for the 26 unit offsets.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A position in the voxel lattice, in voxel units.
///
/// Axis conventions:
/// - X: east  (positive) / west  (negative)
/// - Y: up    (positive) / down  (negative)
/// - Z: south (positive) / north (negative)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VoxelCoord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl VoxelCoord {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Shift by a raw offset.
    pub const fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }

    pub const fn up(self, n: i32) -> Self {
        self.offset(0, n, 0)
    }

    pub const fn down(self, n: i32) -> Self {
        self.offset(0, -n, 0)
    }

    /// Straight-line distance between cell origins.
    pub fn euclidean_distance(self, other: Self) -> f64 {
        let dx = f64::from(other.x) - f64::from(self.x);
        let dy = f64::from(other.y) - f64::from(self.y);
        let dz = f64::from(other.z) - f64::from(self.z);
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    pub fn manhattan_distance(self, other: Self) -> u64 {
        let [dx, dy, dz] = self.axis_gaps(other);
        dx + dy + dz
    }

    /// Largest per-axis difference.
    pub fn chebyshev_distance(self, other: Self) -> u32 {
        let [dx, dy, dz] = self.axis_gaps(other);
        // Two i32 values are never more than u32::MAX apart.
        dx.max(dy).max(dz) as u32
    }

    /// Absolute per-axis differences, widened so opposite extremes do not
    /// overflow.
    fn axis_gaps(self, other: Self) -> [u64; 3] {
        [
            (i64::from(self.x) - i64::from(other.x)).unsigned_abs(),
            (i64::from(self.y) - i64::from(other.y)).unsigned_abs(),
            (i64::from(self.z) - i64::from(other.z)).unsigned_abs(),
        ]
    }

    /// World-space point inside this cell at the given fractional offset.
    pub fn point(self, fx: f64, fy: f64, fz: f64) -> [f64; 3] {
        [
            f64::from(self.x) + fx,
            f64::from(self.y) + fy,
            f64::from(self.z) + fz,
        ]
    }
}

impl fmt::Display for VoxelCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Inclusive axis-aligned box of lattice coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoordBounds {
    pub min: VoxelCoord,
    pub max: VoxelCoord,
}

impl CoordBounds {
    /// Half-width of the default box. Far enough from `i32` limits that the
    /// few-cell lookups around a node can never overflow.
    pub const DEFAULT_EXTENT: i32 = 1 << 24;

    /// How far past an in-bounds node a search looks: two cells up for jump
    /// headroom, one cell down or sideways.
    pub const EDGE_MARGIN: i32 = 2;

    pub const fn new(min: VoxelCoord, max: VoxelCoord) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, coord: VoxelCoord) -> bool {
        (self.min.x..=self.max.x).contains(&coord.x)
            && (self.min.y..=self.max.y).contains(&coord.y)
            && (self.min.z..=self.max.z).contains(&coord.z)
    }

    /// The first bad corner value, named as in a config file, or `None` when
    /// every axis has `min <= max` and stays `EDGE_MARGIN` cells inside the
    /// `i32` range.
    pub fn malformed_axis(&self) -> Option<(&'static str, i32)> {
        let lo = i32::MIN + Self::EDGE_MARGIN;
        let hi = i32::MAX - Self::EDGE_MARGIN;
        let axes = [
            ("bounds.min.x", self.min.x, "bounds.max.x", self.max.x),
            ("bounds.min.y", self.min.y, "bounds.max.y", self.max.y),
            ("bounds.min.z", self.min.z, "bounds.max.z", self.max.z),
        ];
        for (min_name, min, max_name, max) in axes {
            if min < lo || min > max {
                return Some((min_name, min));
            }
            if max > hi {
                return Some((max_name, max));
            }
        }
        None
    }
}

impl Default for CoordBounds {
    fn default() -> Self {
        let e = Self::DEFAULT_EXTENT;
        Self::new(VoxelCoord::new(-e, -e, -e), VoxelCoord::new(e, e, e))
    }
}

impl fmt::Display for CoordBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.min, self.max)
    }
}
