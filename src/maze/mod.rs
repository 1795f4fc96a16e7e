mod dimensions;
mod direction;
pub mod grid;
mod walls;

use std::collections::BTreeSet;

pub use dimensions::{Cell, Dimensions};
pub use direction::Direction;
pub use grid::Grid;
pub use walls::WallIncidence;

use crate::error::{MazeError, Result, SpecialCellType};

/// A rectangular grid maze: a wall layout plus an optional start cell and a set of goal cells.
///
/// A `Maze` is never mutated once built. Generators produce one from a [`WallIncidence`], and
/// transformations return a new `Maze`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Maze {
    walls: WallIncidence,
    start: Option<Cell>,
    goals: BTreeSet<Cell>,
}

impl Maze {
    /// Creates a maze with no special cells.
    pub fn new(walls: WallIncidence) -> Self {
        Maze {
            walls,
            start: None,
            goals: BTreeSet::new(),
        }
    }

    /// Creates a maze with special cells, each of which must lie within the maze.
    pub fn with_special_cells(
        walls: WallIncidence,
        start: Option<Cell>,
        goals: impl IntoIterator<Item = Cell>,
    ) -> Result<Self> {
        Maze::new(walls).with_start_cell(start)?.with_goal_cells(goals)
    }

    /// Returns this maze with its start cell replaced.
    pub fn with_start_cell(self, start: Option<Cell>) -> Result<Self> {
        if let Some(cell) = start {
            self.dimensions().check_cell(cell)?;
        }
        Ok(Maze { start, ..self })
    }

    /// Returns this maze with its goal cells replaced.
    pub fn with_goal_cells(self, goals: impl IntoIterator<Item = Cell>) -> Result<Self> {
        let dims = self.dimensions();
        let goals = goals
            .into_iter()
            .map(|cell| dims.check_cell(cell).map(|_| cell))
            .collect::<Result<BTreeSet<_>>>()?;
        Ok(Maze { goals, ..self })
    }

    /// The same special cells over a new wall layout of the same dimensions.
    pub(crate) fn with_walls(&self, walls: WallIncidence) -> Maze {
        debug_assert_eq!(walls.dimensions(), self.dimensions());
        Maze {
            walls,
            start: self.start,
            goals: self.goals.clone(),
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        self.walls.dimensions()
    }

    pub fn width(&self) -> usize {
        self.dimensions().width()
    }

    pub fn height(&self) -> usize {
        self.dimensions().height()
    }

    pub fn walls(&self) -> &WallIncidence {
        &self.walls
    }

    pub fn start_cell(&self) -> Option<Cell> {
        self.start
    }

    pub fn goal_cells(&self) -> &BTreeSet<Cell> {
        &self.goals
    }

    /// Whether `cell` is the start or one of the goals.
    pub fn is_special_cell(&self, cell: Cell) -> bool {
        self.start == Some(cell) || self.goals.contains(&cell)
    }

    /// Whether there is a wall on side `dir` of `cell`. Boundary walls are always present.
    pub fn wall(&self, cell: Cell, dir: Direction) -> Result<bool> {
        self.dimensions().check_cell(cell)?;
        Ok(self.walls.is_wall(cell, dir))
    }

    /// Wall query for renderers: out-of-bounds coordinates report no wall.
    pub fn wall_or_open(&self, x: isize, y: isize, dir: Direction) -> bool {
        self.dimensions()
            .cell_at(x, y)
            .is_some_and(|cell| self.walls.is_wall(cell, dir))
    }

    /// Number of walls around `cell`, boundary walls included.
    pub fn num_cell_walls(&self, cell: Cell) -> Result<usize> {
        self.open_count(cell).map(|open| 4 - open)
    }

    /// Number of directions in which `cell` is open.
    pub fn open_count(&self, cell: Cell) -> Result<usize> {
        self.dimensions().check_cell(cell)?;
        Ok(self.open_directions(cell).count())
    }

    /// Open directions of an in-bounds cell.
    pub(crate) fn open_directions(&self, cell: Cell) -> impl Iterator<Item = Direction> + '_ {
        Direction::ALL
            .into_iter()
            .filter(move |&d| !self.walls.is_wall(cell, d))
    }

    /// All cells with exactly three walls.
    pub fn dead_ends(&self) -> Vec<Cell> {
        self.dimensions()
            .cells()
            .filter(|&c| self.open_directions(c).count() == 1)
            .collect()
    }

    /// Pairs of adjacent cells with no wall between them.
    pub fn passages(&self) -> impl Iterator<Item = (Cell, Cell)> + '_ {
        (0..self.walls.len())
            .filter(|&r| !self.walls.get(r))
            .map(|r| self.walls.adjacent_cells(r))
    }

    pub fn passage_count(&self) -> usize {
        self.walls.len() - self.walls.count_walls()
    }

    /// Whether every cell can be reached from every other cell.
    pub fn is_connected(&self) -> bool {
        let dims = self.dimensions();
        let mut visited = Grid::new(dims, false);
        let mut stack = vec![(0, 0)];
        visited[(0, 0)] = true;
        let mut reached = 1;
        while let Some(cell) = stack.pop() {
            for dir in self.open_directions(cell) {
                if let Some(next) = dir.step(cell, dims) {
                    if !visited[next] {
                        visited[next] = true;
                        reached += 1;
                        stack.push(next);
                    }
                }
            }
        }
        reached == dims.cell_count()
    }

    /// Whether the open passages form a spanning tree: connected, with no cycles.
    pub fn is_perfect(&self) -> bool {
        self.passage_count() == self.dimensions().cell_count() - 1 && self.is_connected()
    }
}

/// Get neighbors of a cell, paired with the direction leading to them.
/// A neighbor is considered a cell that is one step away in the cardinal directions.
pub fn get_neighbors(cell: Cell, dims: Dimensions) -> impl Iterator<Item = (Direction, Cell)> {
    Direction::ALL
        .into_iter()
        .filter_map(move |d| d.step(cell, dims).map(|n| (d, n)))
}

/// Validates a set of special cells against a per-cell legality predicate.
pub(crate) fn check_special_cell(
    dims: Dimensions,
    cell: Cell,
    kind: SpecialCellType,
    legal: impl Fn(Cell) -> bool,
) -> Result<()> {
    dims.check_cell(cell)?;
    if legal(cell) {
        Ok(())
    } else {
        Err(MazeError::IllegalSpecialCellPosition { cell, kind })
    }
}
