use super::{Cell, Dimensions, Direction};

/// Wall presence for every interior wall of a grid.
///
/// Only the east and south walls of each cell are stored, so every shared wall has exactly one
/// entry. North and west queries are answered from the neighbouring cell's south and east entries.
/// Walls on the outer boundary have no entry and always read as present.
///
/// Ranking: east walls come first, `y * (width - 1) + x` for `x < width - 1`, followed by south
/// walls, `(width - 1) * height + y * width + x` for `y < height - 1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WallIncidence {
    dims: Dimensions,
    walls: Box<[bool]>,
}

impl WallIncidence {
    /// Creates a layout where every interior wall is present (`filled`) or absent.
    pub fn new(dims: Dimensions, filled: bool) -> Self {
        WallIncidence {
            dims,
            walls: vec![filled; Self::num_walls(dims)].into_boxed_slice(),
        }
    }

    /// Number of interior walls in a grid of the given dimensions.
    pub fn num_walls(dims: Dimensions) -> usize {
        let (w, h) = (dims.width(), dims.height());
        (w - 1) * h + w * (h - 1)
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    pub fn len(&self) -> usize {
        self.walls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.walls.is_empty()
    }

    /// Number of interior walls currently present.
    pub fn count_walls(&self) -> usize {
        self.walls.iter().filter(|&&w| w).count()
    }

    /// Ranks a (cell, direction) pair, or `None` if the wall lies on the outer boundary or the
    /// cell is outside the grid.
    pub fn rank(&self, cell: Cell, dir: Direction) -> Option<usize> {
        if !self.dims.contains(cell) {
            return None;
        }
        let (w, h) = (self.dims.width(), self.dims.height());
        let (x, y) = cell;
        match dir {
            Direction::East => (x + 1 < w).then(|| y * (w - 1) + x),
            Direction::South => (y + 1 < h).then(|| (w - 1) * h + y * w + x),
            Direction::North => (y > 0).then(|| (w - 1) * h + (y - 1) * w + x),
            Direction::West => (x > 0).then(|| y * (w - 1) + x - 1),
        }
    }

    /// Inverse of [`WallIncidence::rank`], always yielding the canonical east or south form.
    pub fn unrank(&self, rank: usize) -> (Cell, Direction) {
        debug_assert!(rank < self.len(), "wall rank {} out of range", rank);
        let (w, h) = (self.dims.width(), self.dims.height());
        let east_walls = (w - 1) * h;
        if rank < east_walls {
            ((rank % (w - 1), rank / (w - 1)), Direction::East)
        } else {
            let rank = rank - east_walls;
            ((rank % w, rank / w), Direction::South)
        }
    }

    /// The two cells separated by the wall with the given rank.
    pub fn adjacent_cells(&self, rank: usize) -> (Cell, Cell) {
        let (cell, dir) = self.unrank(rank);
        let (dx, dy) = dir.delta();
        // East and south deltas are non-negative.
        (cell, (cell.0 + dx as usize, cell.1 + dy as usize))
    }

    /// Whether there is a wall on side `dir` of `cell`. Boundary walls are always present, and
    /// cells outside the grid read as solid. Use [`crate::maze::Maze::wall`] for a bounds-checked
    /// query.
    pub fn is_wall(&self, cell: Cell, dir: Direction) -> bool {
        self.rank(cell, dir).is_none_or(|r| self.walls[r])
    }

    pub fn get(&self, rank: usize) -> bool {
        self.walls[rank]
    }

    pub fn set(&mut self, rank: usize, wall: bool) {
        self.walls[rank] = wall;
    }

    /// Removes the wall on side `dir` of `cell`.
    /// Returns `true` if a wall was removed, `false` if there was none, it is a boundary wall, or
    /// `cell` is outside the grid.
    pub fn carve(&mut self, cell: Cell, dir: Direction) -> bool {
        match self.rank(cell, dir) {
            Some(r) if self.walls[r] => {
                self.walls[r] = false;
                true
            }
            _ => false,
        }
    }

    /// Places a wall on side `dir` of `cell`. Boundary walls are already present.
    pub fn build(&mut self, cell: Cell, dir: Direction) {
        if let Some(r) = self.rank(cell, dir) {
            self.walls[r] = true;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.walls.iter().copied()
    }
}
