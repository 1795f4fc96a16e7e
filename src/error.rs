use std::fmt;

use thiserror::Error;

use crate::{maze::Cell, transform::Transformation};

/// The kinds of special cell a maze can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialCellType {
    Start,
    Goal,
}

impl fmt::Display for SpecialCellType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecialCellType::Start => write!(f, "start"),
            SpecialCellType::Goal => write!(f, "goal"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MazeError {
    #[error("dimensions ({width}, {height}) are not legal")]
    IllegalDimensions { width: usize, height: usize },

    #[error("cell ({x}, {y}) is out of bounds")]
    OutOfBounds { x: usize, y: usize },

    /// The cell is in bounds but cannot hold the given special cell, e.g. a wall in a thick maze.
    #[error("the cell {cell:?} is not a legal {kind} cell")]
    IllegalSpecialCellPosition { cell: Cell, kind: SpecialCellType },

    /// The cell is in bounds but cannot be used in this representation, e.g. a wall in a thick maze.
    #[error("the cell {cell:?} is inaccessible")]
    InaccessibleCellPosition { cell: Cell },

    #[error("width {width} != height {height}, so cannot perform transformation: {transformation}")]
    IllegalGroupOperation {
        width: usize,
        height: usize,
        transformation: Transformation,
    },

    #[error("probability {0} is not within [0, 1]")]
    InvalidProbability(f64),

    #[error("grid colouring is not legal: {reason}")]
    IllegalColouring { reason: String },
}

pub type Result<T> = std::result::Result<T, MazeError>;

/// Check that a probability lies within [0, 1].
pub(crate) fn check_probability(p: f64) -> Result<f64> {
    if (0.0..=1.0).contains(&p) {
        Ok(p)
    } else {
        Err(MazeError::InvalidProbability(p))
    }
}
