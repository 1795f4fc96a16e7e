//! Thick mazes: grids where walls occupy whole cells.

mod colouring;

use std::collections::BTreeSet;

pub use colouring::{CandidateConfiguration, Colour, GridColouring, Offset, WallOffsets};

use crate::{
    error::{MazeError, Result, SpecialCellType},
    maze::{Cell, Dimensions, Direction, Grid, Maze, WallIncidence, check_special_cell, get_neighbors},
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellContents {
    Floor,
    #[default]
    Wall,
}

/// One logical wall, made of one or more physical cells that are opened together.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AggregateWall(Vec<Cell>);

impl AggregateWall {
    /// Returns `None` for an empty cell list.
    pub fn new(cells: Vec<Cell>) -> Option<Self> {
        (!cells.is_empty()).then_some(AggregateWall(cells))
    }

    pub fn cells(&self) -> &[Cell] {
        &self.0
    }
}

/// A maze whose cells are either floor or wall. Start and goal cells must be floor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ThickMaze {
    contents: Grid<CellContents>,
    start: Option<Cell>,
    goals: BTreeSet<Cell>,
}

impl ThickMaze {
    pub fn new(contents: Grid<CellContents>) -> Self {
        ThickMaze {
            contents,
            start: None,
            goals: BTreeSet::new(),
        }
    }

    /// Returns this maze with its start cell replaced. The start must be a floor cell.
    pub fn with_start_cell(self, start: Option<Cell>) -> Result<Self> {
        if let Some(cell) = start {
            check_special_cell(self.dimensions(), cell, SpecialCellType::Start, |c| {
                self.is_floor(c)
            })?;
        }
        Ok(ThickMaze { start, ..self })
    }

    /// Returns this maze with its goal cells replaced. Every goal must be a floor cell.
    pub fn with_goal_cells(self, goals: impl IntoIterator<Item = Cell>) -> Result<Self> {
        let goals = goals
            .into_iter()
            .map(|cell| {
                check_special_cell(self.dimensions(), cell, SpecialCellType::Goal, |c| {
                    self.is_floor(c)
                })
                .map(|_| cell)
            })
            .collect::<Result<BTreeSet<_>>>()?;
        Ok(ThickMaze { goals, ..self })
    }

    pub fn dimensions(&self) -> Dimensions {
        self.contents.dimensions()
    }

    pub fn width(&self) -> usize {
        self.contents.width()
    }

    pub fn height(&self) -> usize {
        self.contents.height()
    }

    pub fn contents(&self) -> &Grid<CellContents> {
        &self.contents
    }

    pub fn start_cell(&self) -> Option<Cell> {
        self.start
    }

    pub fn goal_cells(&self) -> &BTreeSet<Cell> {
        &self.goals
    }

    pub fn cell_contents(&self, cell: Cell) -> Result<CellContents> {
        self.dimensions().check_cell(cell)?;
        Ok(self.contents[cell])
    }

    /// Whether `cell` is an in-bounds floor cell.
    pub fn is_floor(&self, cell: Cell) -> bool {
        self.contents.get(cell) == Some(&CellContents::Floor)
    }

    pub fn floor_count(&self) -> usize {
        self.contents
            .iter()
            .filter(|&&c| c == CellContents::Floor)
            .count()
    }

    /// Floor cells orthogonally adjacent to the floor cell `cell`.
    pub fn open_neighbours(&self, cell: Cell) -> Result<Vec<Cell>> {
        if self.cell_contents(cell)? == CellContents::Wall {
            return Err(MazeError::InaccessibleCellPosition { cell });
        }
        Ok(get_neighbors(cell, self.dimensions())
            .map(|(_, n)| n)
            .filter(|&n| self.is_floor(n))
            .collect())
    }

    /// Floor cells with exactly one floor neighbour.
    pub fn dead_ends(&self) -> Vec<Cell> {
        self.dimensions()
            .cells()
            .filter(|&c| self.open_neighbours(c).is_ok_and(|n| n.len() == 1))
            .collect()
    }

    pub(crate) fn from_parts(contents: Grid<CellContents>, start: Option<Cell>, goals: BTreeSet<Cell>) -> Self {
        ThickMaze {
            contents,
            start,
            goals,
        }
    }
}

/// Lays a maze out as a (2w-1)x(2h-1) thick maze: cell (x, y) becomes floor (2x, 2y), open
/// passages become floor between them, and every other position is wall.
impl From<&Maze> for ThickMaze {
    fn from(maze: &Maze) -> Self {
        let dims = maze.dimensions();
        let mut contents = Grid::new(dims.thickened(), CellContents::Wall);
        for (x, y) in dims.cells() {
            contents[(2 * x, 2 * y)] = CellContents::Floor;
        }
        for ((x1, y1), (x2, y2)) in maze.passages() {
            contents[(x1 + x2, y1 + y2)] = CellContents::Floor;
        }
        let double = |(x, y): Cell| (2 * x, 2 * y);
        ThickMaze::from_parts(
            contents,
            maze.start_cell().map(double),
            maze.goal_cells().iter().copied().map(double).collect(),
        )
    }
}

/// Reads a thick maze laid out as by `From<&Maze>` back into a maze. Both sides must be odd and
/// every even-even position must be floor.
impl TryFrom<&ThickMaze> for Maze {
    type Error = MazeError;

    fn try_from(thick: &ThickMaze) -> Result<Self> {
        let (tw, th) = (thick.width(), thick.height());
        if tw % 2 == 0 || th % 2 == 0 {
            return Err(MazeError::IllegalDimensions {
                width: tw,
                height: th,
            });
        }
        let dims = Dimensions::new(tw.div_ceil(2), th.div_ceil(2))?;
        let mut walls = WallIncidence::new(dims, true);
        for (x, y) in dims.cells() {
            let room = (2 * x, 2 * y);
            if !thick.is_floor(room) {
                return Err(MazeError::InaccessibleCellPosition { cell: room });
            }
            if x + 1 < dims.width() && thick.is_floor((2 * x + 1, 2 * y)) {
                walls.carve((x, y), Direction::East);
            }
            if y + 1 < dims.height() && thick.is_floor((2 * x, 2 * y + 1)) {
                walls.carve((x, y), Direction::South);
            }
        }

        let halve = |cell: Cell, kind| {
            if cell.0 % 2 == 0 && cell.1 % 2 == 0 {
                Ok((cell.0 / 2, cell.1 / 2))
            } else {
                Err(MazeError::IllegalSpecialCellPosition { cell, kind })
            }
        };
        let start = thick
            .start_cell()
            .map(|c| halve(c, SpecialCellType::Start))
            .transpose()?;
        let goals = thick
            .goal_cells()
            .iter()
            .map(|&c| halve(c, SpecialCellType::Goal))
            .collect::<Result<Vec<_>>>()?;
        Maze::with_special_cells(walls, start, goals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{Generator, generate_maze};

    fn dims(w: usize, h: usize) -> Dimensions {
        Dimensions::new(w, h).unwrap()
    }

    /// A 3x3 plus sign of floor in a 3x3 grid.
    fn plus() -> ThickMaze {
        let contents = Grid::from_fn(dims(3, 3), |(x, y)| {
            if x == 1 || y == 1 {
                CellContents::Floor
            } else {
                CellContents::Wall
            }
        });
        ThickMaze::new(contents)
    }

    #[test]
    fn test_special_cells_must_be_floor() {
        let maze = plus();
        assert_eq!(
            maze.clone().with_start_cell(Some((0, 0))),
            Err(MazeError::IllegalSpecialCellPosition {
                cell: (0, 0),
                kind: SpecialCellType::Start
            })
        );
        assert_eq!(
            maze.clone().with_goal_cells([(3, 1)]),
            Err(MazeError::OutOfBounds { x: 3, y: 1 })
        );
        let maze = maze.with_start_cell(Some((1, 0))).unwrap();
        let maze = maze.with_goal_cells([(2, 1), (1, 2)]).unwrap();
        assert_eq!(maze.start_cell(), Some((1, 0)));
        assert_eq!(maze.goal_cells().len(), 2);
    }

    #[test]
    fn test_open_neighbours() {
        let maze = plus();
        assert_eq!(maze.open_neighbours((1, 1)).unwrap().len(), 4);
        assert_eq!(maze.open_neighbours((1, 0)).unwrap(), vec![(1, 1)]);
        assert_eq!(
            maze.open_neighbours((2, 2)),
            Err(MazeError::InaccessibleCellPosition { cell: (2, 2) })
        );
        assert_eq!(
            maze.open_neighbours((9, 9)),
            Err(MazeError::OutOfBounds { x: 9, y: 9 })
        );
        assert_eq!(maze.dead_ends(), vec![(1, 0), (0, 1), (2, 1), (1, 2)]);
        assert_eq!(maze.floor_count(), 5);
        assert_eq!(maze.cell_contents((0, 0)), Ok(CellContents::Wall));
        assert_eq!(maze.cell_contents((1, 2)), Ok(CellContents::Floor));
        assert_eq!(
            maze.cell_contents((3, 0)),
            Err(MazeError::OutOfBounds { x: 3, y: 0 })
        );
    }

    #[test]
    fn test_maze_round_trips_through_thick_layout() {
        let maze = generate_maze(dims(7, 5), Generator::Kruskal, Some(8))
            .unwrap()
            .with_start_cell(Some((0, 0)))
            .unwrap()
            .with_goal_cells([(6, 4)])
            .unwrap();
        let thick = ThickMaze::from(&maze);
        assert_eq!(thick.dimensions(), dims(13, 9));
        assert_eq!(thick.start_cell(), Some((0, 0)));
        assert!(thick.goal_cells().contains(&(12, 8)));
        // 35 rooms plus 34 opened walls.
        assert_eq!(thick.floor_count(), 35 + 34);
        assert_eq!(Maze::try_from(&thick), Ok(maze));
    }

    #[test]
    fn test_try_from_rejects_bad_layouts() {
        let even = ThickMaze::new(Grid::new(dims(4, 3), CellContents::Floor));
        assert!(matches!(
            Maze::try_from(&even),
            Err(MazeError::IllegalDimensions { .. })
        ));
        let walled = ThickMaze::new(Grid::new(dims(3, 3), CellContents::Wall));
        assert_eq!(
            Maze::try_from(&walled),
            Err(MazeError::InaccessibleCellPosition { cell: (0, 0) })
        );
    }

    #[test]
    fn test_aggregate_wall_is_non_empty() {
        assert!(AggregateWall::new(vec![]).is_none());
        let wall = AggregateWall::new(vec![(1, 0), (2, 0)]).unwrap();
        assert_eq!(wall.cells(), &[(1, 0), (2, 0)]);
    }
}
