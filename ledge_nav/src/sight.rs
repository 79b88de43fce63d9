// Line of sight between two nodes, for the any-angle parent skip.
//
// Two nodes see each other when the straight line between them is both
// supported and unobstructed:
//
// - Support: the line one level below is rasterized with integer 3D
//   Bresenham, and every cell on it must be safe and either non-passable or
//   climbable. That approximates continuous ground (or ladder) under the whole
//   walk. A purely downward vertical line skips this; falling needs no floor.
// - Obstruction: two rays are cast from the source's body center, one at foot
//   height and one at head height, toward the matching points of the target.
//   Either one hitting solid geometry breaks sight.
//
// Sight only ever lets the search replace a parent with a grandparent. It
// never makes a move legal that `neighbors.rs` did not already produce.

use crate::node::NodeCache;
use crate::types::VoxelCoord;
use crate::world::WorldQuery;
use serde::{Deserialize, Serialize};

/// Heights of the obstruction rays above the node's floor, in cells.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SightParams {
    pub foot_height: f64,
    pub head_height: f64,
}

impl Default for SightParams {
    fn default() -> Self {
        Self {
            foot_height: 0.5,
            head_height: 1.5,
        }
    }
}

/// Cells on the 3D Bresenham line from `from` to `to`, both inclusive.
///
/// The axis with the largest delta drives; the other two carry error terms
/// and step when their error becomes non-negative. Consecutive cells are
/// always 26-adjacent and the result has `max(|dx|, |dy|, |dz|) + 1` entries.
pub fn bresenham_3d(from: VoxelCoord, to: VoxelCoord) -> Vec<VoxelCoord> {
    let mut cur = [i64::from(from.x), i64::from(from.y), i64::from(from.z)];
    let end = [i64::from(to.x), i64::from(to.y), i64::from(to.z)];
    let delta = [
        (end[0] - cur[0]).abs(),
        (end[1] - cur[1]).abs(),
        (end[2] - cur[2]).abs(),
    ];
    let step = [
        (end[0] - cur[0]).signum(),
        (end[1] - cur[1]).signum(),
        (end[2] - cur[2]).signum(),
    ];

    let drive = if delta[0] >= delta[1] && delta[0] >= delta[2] {
        0
    } else if delta[1] >= delta[2] {
        1
    } else {
        2
    };
    let (a, b) = match drive {
        0 => (1, 2),
        1 => (0, 2),
        _ => (0, 1),
    };

    let mut points = Vec::with_capacity(delta[drive] as usize + 1);
    let to_coord = |c: &[i64; 3]| VoxelCoord::new(c[0] as i32, c[1] as i32, c[2] as i32);
    points.push(to_coord(&cur));

    let mut err_a = 2 * delta[a] - delta[drive];
    let mut err_b = 2 * delta[b] - delta[drive];
    while cur[drive] != end[drive] {
        cur[drive] += step[drive];
        if err_a >= 0 {
            cur[a] += step[a];
            err_a -= 2 * delta[drive];
        }
        if err_b >= 0 {
            cur[b] += step[b];
            err_b -= 2 * delta[drive];
        }
        err_a += 2 * delta[a];
        err_b += 2 * delta[b];
        points.push(to_coord(&cur));
    }

    points
}

/// Whether `from` and `to` are joined by a supported, unobstructed line.
pub fn line_of_sight<W: WorldQuery + ?Sized>(
    cache: &mut NodeCache<'_, W>,
    from: VoxelCoord,
    to: VoxelCoord,
    params: &SightParams,
) -> bool {
    if from == to {
        return true;
    }

    let straight_down = from.x == to.x && from.z == to.z && to.y < from.y;
    if !straight_down && !supported_line(cache, from, to) {
        return false;
    }

    let world = cache.world();
    [params.foot_height, params.head_height]
        .into_iter()
        .all(|h| !ray_blocked(world, from.point(0.5, h, 0.5), to.point(0.5, h, 0.5)))
}

fn supported_line<W: WorldQuery + ?Sized>(
    cache: &mut NodeCache<'_, W>,
    from: VoxelCoord,
    to: VoxelCoord,
) -> bool {
    bresenham_3d(from.down(1), to.down(1)).into_iter().all(|p| {
        let c = cache.cell(p);
        c.safe && (!c.passable || c.climbable)
    })
}

fn ray_blocked<W: WorldQuery + ?Sized>(world: &W, origin: [f64; 3], target: [f64; 3]) -> bool {
    let dir = [
        target[0] - origin[0],
        target[1] - origin[1],
        target[2] - origin[2],
    ];
    let dist = (dir[0] * dir[0] + dir[1] * dir[1] + dir[2] * dir[2]).sqrt();
    world.raycast_blocked(origin, dir, dist)
}
