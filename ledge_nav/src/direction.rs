// The 26-neighbor direction vocabulary.
//
// Every cell in the lattice touches 26 others: 6 across faces, 12 across
// edges, 8 across corners. For movement they are grouped by what the agent
// physically does:
// - `Orthogonal`:   N, S, E, W, U, D.
// - `FlatDiagonal`: NE, NW, SE, SW (same level, two horizontal components).
// - `Rising`:       one level up with one or two horizontal components
//                   (UN..UW, UNE..USW).
// - `Falling`:      one level down with one or two horizontal components
//                   (DN..DW, DNE..DSW).
//
// Each non-orthogonal direction decomposes into its horizontal orthogonal
// components (the cells a diagonal move would clip) and, for falling moves,
// a `horizontal_pair` (the same move without the drop).
//
// See also: `neighbors.rs` which consumes these groups in a fixed order.

use smallvec::SmallVec;

/// Movement family of a direction. Evaluation order in neighbor expansion
/// follows declaration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Family {
    Orthogonal,
    FlatDiagonal,
    Rising,
    Falling,
}

/// One of the 26 unit offsets. North is -Z, east is +X, up is +Y.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    North,
    South,
    East,
    West,
    Up,
    Down,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
    UpNorth,
    UpSouth,
    UpEast,
    UpWest,
    UpNorthEast,
    UpNorthWest,
    UpSouthEast,
    UpSouthWest,
    DownNorth,
    DownSouth,
    DownEast,
    DownWest,
    DownNorthEast,
    DownNorthWest,
    DownSouthEast,
    DownSouthWest,
}

impl Direction {
    pub const ALL: [Direction; 26] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::Up,
        Direction::Down,
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
        Direction::UpNorth,
        Direction::UpSouth,
        Direction::UpEast,
        Direction::UpWest,
        Direction::UpNorthEast,
        Direction::UpNorthWest,
        Direction::UpSouthEast,
        Direction::UpSouthWest,
        Direction::DownNorth,
        Direction::DownSouth,
        Direction::DownEast,
        Direction::DownWest,
        Direction::DownNorthEast,
        Direction::DownNorthWest,
        Direction::DownSouthEast,
        Direction::DownSouthWest,
    ];

    /// `(dx, dy, dz)` of this direction.
    pub const fn offset(self) -> (i32, i32, i32) {
        match self {
            Direction::North => (0, 0, -1),
            Direction::South => (0, 0, 1),
            Direction::East => (1, 0, 0),
            Direction::West => (-1, 0, 0),
            Direction::Up => (0, 1, 0),
            Direction::Down => (0, -1, 0),
            Direction::NorthEast => (1, 0, -1),
            Direction::NorthWest => (-1, 0, -1),
            Direction::SouthEast => (1, 0, 1),
            Direction::SouthWest => (-1, 0, 1),
            Direction::UpNorth => (0, 1, -1),
            Direction::UpSouth => (0, 1, 1),
            Direction::UpEast => (1, 1, 0),
            Direction::UpWest => (-1, 1, 0),
            Direction::UpNorthEast => (1, 1, -1),
            Direction::UpNorthWest => (-1, 1, -1),
            Direction::UpSouthEast => (1, 1, 1),
            Direction::UpSouthWest => (-1, 1, 1),
            Direction::DownNorth => (0, -1, -1),
            Direction::DownSouth => (0, -1, 1),
            Direction::DownEast => (1, -1, 0),
            Direction::DownWest => (-1, -1, 0),
            Direction::DownNorthEast => (1, -1, -1),
            Direction::DownNorthWest => (-1, -1, -1),
            Direction::DownSouthEast => (1, -1, 1),
            Direction::DownSouthWest => (-1, -1, 1),
        }
    }

    /// Inverse of `offset`. `None` for `(0, 0, 0)` or any component outside
    /// `-1..=1`.
    pub fn from_offset(dx: i32, dy: i32, dz: i32) -> Option<Direction> {
        Self::ALL
            .iter()
            .copied()
            .find(|d| d.offset() == (dx, dy, dz))
    }

    pub fn family(self) -> Family {
        let (dx, dy, dz) = self.offset();
        let horizontal = dx.abs() + dz.abs();
        match (dy, horizontal) {
            (_, 0) => Family::Orthogonal,
            (0, 1) => Family::Orthogonal,
            (0, _) => Family::FlatDiagonal,
            (1, _) => Family::Rising,
            _ => Family::Falling,
        }
    }

    /// The horizontal orthogonal directions this move passes beside.
    /// Empty for U and D; one entry for N/S/E/W and the vertical-edge moves;
    /// two for anything crossing a horizontal corner.
    pub fn horizontal_components(self) -> SmallVec<[Direction; 2]> {
        let (dx, _, dz) = self.offset();
        let mut out = SmallVec::new();
        match dx {
            1 => out.push(Direction::East),
            -1 => out.push(Direction::West),
            _ => {}
        }
        match dz {
            1 => out.push(Direction::South),
            -1 => out.push(Direction::North),
            _ => {}
        }
        out
    }

    /// For a falling move, the same-level move with the same horizontal
    /// part (DNE -> NE, DN -> N). `None` for everything else.
    pub fn horizontal_pair(self) -> Option<Direction> {
        if self.family() != Family::Falling {
            return None;
        }
        let (dx, _, dz) = self.offset();
        Self::from_offset(dx, 0, dz)
    }

    /// All directions of one family, in `ALL` order.
    pub fn of_family(family: Family) -> impl Iterator<Item = Direction> {
        Self::ALL.into_iter().filter(move |d| d.family() == family)
    }
}
