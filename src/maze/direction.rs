use std::fmt;

use super::{Cell, Dimensions};

/// The four cardinal directions of a grid maze.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// All directions, in clockwise order starting at north.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Returns the opposite direction.
    pub fn flip(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// Movement delta (dx, dy); y grows southward.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    /// Moves one step from `cell`, returning `None` if the step leaves `dims`.
    pub fn step(self, cell: Cell, dims: Dimensions) -> Option<Cell> {
        let (dx, dy) = self.delta();
        let x = cell.0.checked_add_signed(dx)?;
        let y = cell.1.checked_add_signed(dy)?;
        dims.contains((x, y)).then_some((x, y))
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::North => "north",
            Direction::East => "east",
            Direction::South => "south",
            Direction::West => "west",
        };
        write!(f, "{}", name)
    }
}
