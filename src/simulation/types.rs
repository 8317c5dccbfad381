//! Core types for the grid signal simulation
//!
//! These are standalone types shared by every simulation component.

use std::fmt;

/// A grid node identifier.
///
/// Ids are assigned row-major, `id = row * cols + col`, so for a fixed
/// column count they map bijectively to grid coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The raw index backing this id.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Compass direction of an outbound lane at an intersection.
///
/// The N, S, E, W ordering is fixed: every tie-break that scans directions
/// does so in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// All directions, in tie-break order.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Index into a per-direction array.
    pub fn index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::South => 1,
            Direction::East => 2,
            Direction::West => 3,
        }
    }

    /// (row, col) offset of the neighboring node in this direction.
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::North => (-1, 0),
            Direction::South => (1, 0),
            Direction::East => (0, 1),
            Direction::West => (0, -1),
        }
    }

    /// Single-letter label used by the textual renderer.
    pub fn label(self) -> &'static str {
        match self {
            Direction::North => "N",
            Direction::South => "S",
            Direction::East => "E",
            Direction::West => "W",
        }
    }

    /// The compass direction leading from one grid cell to an adjacent one.
    /// Returns `None` when the cells are not cardinal neighbors.
    pub fn between(from: (usize, usize), to: (usize, usize)) -> Option<Direction> {
        let delta = (
            to.0 as isize - from.0 as isize,
            to.1 as isize - from.1 as isize,
        );
        Direction::ALL.into_iter().find(|dir| dir.offset() == delta)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
