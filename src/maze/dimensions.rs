use std::fmt;

use crate::error::{MazeError, Result};

/// A cell coordinate (x, y), with x growing eastward and y southward.
pub type Cell = (usize, usize);

/// Width and height of a grid, both at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    width: usize,
    height: usize,
}

impl Dimensions {
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width < 1 || height < 1 {
            return Err(MazeError::IllegalDimensions { width, height });
        }
        Ok(Dimensions { width, height })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_square(&self) -> bool {
        self.width == self.height
    }

    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// The same grid with its axes swapped.
    pub fn transposed(&self) -> Self {
        Dimensions {
            width: self.height,
            height: self.width,
        }
    }

    /// Dimensions of the thick layout of this grid, (2w-1)x(2h-1).
    pub fn thickened(&self) -> Self {
        Dimensions {
            width: 2 * self.width - 1,
            height: 2 * self.height - 1,
        }
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.0 < self.width && cell.1 < self.height
    }

    /// Checks the cell is in bounds, signalling `OutOfBounds` otherwise.
    pub fn check_cell(&self, cell: Cell) -> Result<()> {
        if self.contains(cell) {
            Ok(())
        } else {
            Err(MazeError::OutOfBounds {
                x: cell.0,
                y: cell.1,
            })
        }
    }

    /// Converts signed coordinates to a cell if they are in bounds.
    pub fn cell_at(&self, x: isize, y: isize) -> Option<Cell> {
        let cell = (usize::try_from(x).ok()?, usize::try_from(y).ok()?);
        self.contains(cell).then_some(cell)
    }

    /// Row-major index of a cell.
    pub fn ravel_index(&self, cell: Cell) -> usize {
        cell.1 * self.width + cell.0
    }

    pub fn unravel_index(&self, index: usize) -> Cell {
        (index % self.width, index / self.width)
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + use<> {
        let width = self.width;
        (0..self.height).flat_map(move |y| (0..width).map(move |x| (x, y)))
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
