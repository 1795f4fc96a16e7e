//! Symmetries of the square acting on mazes, and braiding.
//!
//! The eight transformations form the dihedral group of order 8. Each one acts faithfully on the
//! four directions, so composition is computed by composing direction maps and looking the result
//! up among the eight. The diagonal reflections swap a maze's axes and are only allowed on square
//! mazes.

use std::{fmt, str::FromStr};

use rand::Rng;

use crate::{
    error::{MazeError, Result, check_probability},
    maze::{Cell, Dimensions, Direction, Grid, Maze, WallIncidence},
    thick::ThickMaze,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transformation {
    Identity,
    /// Quarter turn clockwise.
    Rotate90,
    Rotate180,
    /// Quarter turn anticlockwise.
    Rotate270,
    /// Reflection in the horizontal axis: north and south swap.
    ReflectHorizontal,
    /// Reflection in the vertical axis: east and west swap.
    ReflectVertical,
    /// Reflection in the diagonal running from the north-east to the south-west corner.
    ReflectDiagonalNesw,
    /// Reflection in the diagonal running from the north-west to the south-east corner.
    ReflectDiagonalNwse,
}

impl Transformation {
    pub const ALL: [Transformation; 8] = [
        Transformation::Identity,
        Transformation::Rotate90,
        Transformation::Rotate180,
        Transformation::Rotate270,
        Transformation::ReflectHorizontal,
        Transformation::ReflectVertical,
        Transformation::ReflectDiagonalNesw,
        Transformation::ReflectDiagonalNwse,
    ];

    pub fn is_diagonal(self) -> bool {
        matches!(
            self,
            Transformation::ReflectDiagonalNesw | Transformation::ReflectDiagonalNwse
        )
    }

    /// Whether the transformation exchanges width and height.
    pub fn swaps_axes(self) -> bool {
        matches!(
            self,
            Transformation::Rotate90
                | Transformation::Rotate270
                | Transformation::ReflectDiagonalNesw
                | Transformation::ReflectDiagonalNwse
        )
    }

    pub fn map_direction(self, d: Direction) -> Direction {
        use Direction::*;
        match (self, d) {
            (Transformation::Identity, d) => d,
            (Transformation::Rotate90, North) => East,
            (Transformation::Rotate90, East) => South,
            (Transformation::Rotate90, South) => West,
            (Transformation::Rotate90, West) => North,
            (Transformation::Rotate180, d) => d.flip(),
            (Transformation::Rotate270, North) => West,
            (Transformation::Rotate270, East) => North,
            (Transformation::Rotate270, South) => East,
            (Transformation::Rotate270, West) => South,
            (Transformation::ReflectHorizontal, North | South) => d.flip(),
            (Transformation::ReflectHorizontal, East | West) => d,
            (Transformation::ReflectVertical, East | West) => d.flip(),
            (Transformation::ReflectVertical, North | South) => d,
            (Transformation::ReflectDiagonalNesw, North) => East,
            (Transformation::ReflectDiagonalNesw, East) => North,
            (Transformation::ReflectDiagonalNesw, South) => West,
            (Transformation::ReflectDiagonalNesw, West) => South,
            (Transformation::ReflectDiagonalNwse, North) => West,
            (Transformation::ReflectDiagonalNwse, West) => North,
            (Transformation::ReflectDiagonalNwse, East) => South,
            (Transformation::ReflectDiagonalNwse, South) => East,
        }
    }

    /// The dimensions of a grid of `dims` after this transformation.
    pub fn map_dimensions(self, dims: Dimensions) -> Dimensions {
        if self.swaps_axes() {
            dims.transposed()
        } else {
            dims
        }
    }

    /// Where `cell` of a grid of `dims` lands after this transformation.
    pub fn map_cell(self, dims: Dimensions, cell: Cell) -> Cell {
        let (w, h) = (dims.width(), dims.height());
        let (x, y) = cell;
        match self {
            Transformation::Identity => (x, y),
            Transformation::Rotate90 => (h - 1 - y, x),
            Transformation::Rotate180 => (w - 1 - x, h - 1 - y),
            Transformation::Rotate270 => (y, w - 1 - x),
            Transformation::ReflectHorizontal => (x, h - 1 - y),
            Transformation::ReflectVertical => (w - 1 - x, y),
            Transformation::ReflectDiagonalNesw => (h - 1 - y, w - 1 - x),
            Transformation::ReflectDiagonalNwse => (y, x),
        }
    }

    /// The single transformation equal to applying `first` and then `second`.
    pub fn compose(first: Transformation, second: Transformation) -> Transformation {
        let composed = Direction::ALL.map(|d| second.map_direction(first.map_direction(d)));
        Transformation::ALL
            .into_iter()
            .find(|t| Direction::ALL.map(|d| t.map_direction(d)) == composed)
            .unwrap_or_else(|| unreachable!("the dihedral group is closed under composition"))
    }

    pub fn inverse(self) -> Transformation {
        match self {
            Transformation::Rotate90 => Transformation::Rotate270,
            Transformation::Rotate270 => Transformation::Rotate90,
            t => t,
        }
    }

    /// Signals `IllegalGroupOperation` for a diagonal reflection of a non-square grid.
    pub fn check_legal(self, dims: Dimensions) -> Result<()> {
        if self.is_diagonal() && !dims.is_square() {
            return Err(MazeError::IllegalGroupOperation {
                width: dims.width(),
                height: dims.height(),
                transformation: self,
            });
        }
        Ok(())
    }

    pub fn name(self) -> &'static str {
        match self {
            Transformation::Identity => "identity",
            Transformation::Rotate90 => "rotate-90",
            Transformation::Rotate180 => "rotate-180",
            Transformation::Rotate270 => "rotate-270",
            Transformation::ReflectHorizontal => "reflect-horizontal",
            Transformation::ReflectVertical => "reflect-vertical",
            Transformation::ReflectDiagonalNesw => "reflect-nesw",
            Transformation::ReflectDiagonalNwse => "reflect-nwse",
        }
    }
}

impl fmt::Display for Transformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Transformation {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Transformation::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| format!("unknown transformation: {}", s))
    }
}

impl Maze {
    /// Returns the image of this maze under `t`, special cells included.
    pub fn apply_transformation(&self, t: Transformation) -> Result<Maze> {
        let dims = self.dimensions();
        t.check_legal(dims)?;

        let old = self.walls();
        let mut walls = WallIncidence::new(t.map_dimensions(dims), true);
        for rank in (0..old.len()).filter(|&r| !old.get(r)) {
            let (cell, dir) = old.unrank(rank);
            walls.carve(t.map_cell(dims, cell), t.map_direction(dir));
        }

        tracing::debug!("[transform] applied {} to a {} maze", t, dims);
        Maze::with_special_cells(
            walls,
            self.start_cell().map(|c| t.map_cell(dims, c)),
            self.goal_cells().iter().map(|&c| t.map_cell(dims, c)),
        )
    }

    /// Opens an extra wall in each dead end with the given probability.
    ///
    /// Only interior walls are candidates, so a dead end whose other three sides are all on the
    /// boundary stays a dead end. A dead end already opened up by a neighbouring dead end is
    /// skipped.
    pub fn braid<R: Rng>(&self, probability: f64, rng: &mut R) -> Result<Maze> {
        let probability = check_probability(probability)?;
        let mut walls = self.walls().clone();

        let mut braided = 0;
        for cell in self.dead_ends() {
            let still_dead_end = Direction::ALL
                .into_iter()
                .filter(|&d| !walls.is_wall(cell, d))
                .count()
                == 1;
            if !still_dead_end || !rng.random_bool(probability) {
                continue;
            }
            let candidates = Direction::ALL
                .into_iter()
                .filter(|&d| walls.rank(cell, d).is_some_and(|r| walls.get(r)))
                .collect::<Vec<_>>();
            if candidates.is_empty() {
                continue;
            }
            walls.carve(cell, candidates[rng.random_range(0..candidates.len())]);
            braided += 1;
        }

        tracing::debug!(
            "[braid] removed {} dead ends with probability {}",
            braided,
            probability
        );
        Ok(self.with_walls(walls))
    }
}

impl ThickMaze {
    /// Returns the image of this thick maze under `t`, special cells included.
    pub fn apply_transformation(&self, t: Transformation) -> Result<ThickMaze> {
        let dims = self.dimensions();
        t.check_legal(dims)?;

        let mut contents = Grid::new(t.map_dimensions(dims), Default::default());
        for cell in dims.cells() {
            contents[t.map_cell(dims, cell)] = self.contents()[cell];
        }
        Ok(ThickMaze::from_parts(
            contents,
            self.start_cell().map(|c| t.map_cell(dims, c)),
            self.goal_cells().iter().map(|&c| t.map_cell(dims, c)).collect(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::generators::{Generator, generate_maze, get_rng};

    fn maze(w: usize, h: usize, generator: Generator, seed: u64) -> Maze {
        generate_maze(Dimensions::new(w, h).unwrap(), generator, Some(seed)).unwrap()
    }

    fn any_transformation() -> impl Strategy<Value = Transformation> {
        prop::sample::select(Transformation::ALL.to_vec())
    }

    fn any_generator() -> impl Strategy<Value = Generator> {
        prop::sample::select(Generator::ALL.to_vec())
    }

    #[test]
    fn test_composition_table_is_a_group() {
        for a in Transformation::ALL {
            assert_eq!(Transformation::compose(Transformation::Identity, a), a);
            assert_eq!(Transformation::compose(a, Transformation::Identity), a);
            assert_eq!(
                Transformation::compose(a, a.inverse()),
                Transformation::Identity
            );
            for b in Transformation::ALL {
                for c in Transformation::ALL {
                    assert_eq!(
                        Transformation::compose(Transformation::compose(a, b), c),
                        Transformation::compose(a, Transformation::compose(b, c))
                    );
                }
            }
        }
    }

    #[test]
    fn test_known_compositions() {
        use Transformation::*;
        assert_eq!(Transformation::compose(Rotate90, Rotate90), Rotate180);
        assert_eq!(Transformation::compose(Rotate90, Rotate180), Rotate270);
        assert_eq!(
            Transformation::compose(ReflectHorizontal, ReflectVertical),
            Rotate180
        );
        assert_eq!(
            Transformation::compose(Rotate90, ReflectHorizontal),
            ReflectDiagonalNesw
        );
        assert_eq!(
            Transformation::compose(ReflectHorizontal, Rotate90),
            ReflectDiagonalNwse
        );
    }

    #[test]
    fn test_rotate_90_cell_map() {
        let dims = Dimensions::new(4, 3).unwrap();
        assert_eq!(Transformation::Rotate90.map_cell(dims, (0, 0)), (2, 0));
        assert_eq!(Transformation::Rotate90.map_cell(dims, (3, 2)), (0, 3));
        assert_eq!(
            Transformation::Rotate90.map_dimensions(dims),
            Dimensions::new(3, 4).unwrap()
        );
    }

    #[test]
    fn test_rotate_180_twice_is_identity() {
        let m = maze(5, 5, Generator::RecurBacktrack, 1);
        let twice = m
            .apply_transformation(Transformation::Rotate180)
            .and_then(|m| m.apply_transformation(Transformation::Rotate180))
            .unwrap();
        assert_eq!(twice, m);
    }

    #[test]
    fn test_rotate_90_four_times_is_identity() {
        let m = maze(7, 7, Generator::Kruskal, 2)
            .with_start_cell(Some((0, 3)))
            .unwrap()
            .with_goal_cells([(6, 6), (2, 1)])
            .unwrap();
        let mut rotated = m.clone();
        for _ in 0..4 {
            rotated = rotated.apply_transformation(Transformation::Rotate90).unwrap();
        }
        assert_eq!(rotated, m);
        let twice = m
            .apply_transformation(Transformation::Identity)
            .and_then(|m| m.apply_transformation(Transformation::Identity))
            .unwrap();
        assert_eq!(twice, m);
    }

    #[test]
    fn test_transformed_walls_follow_cells() {
        // 2x1 maze with the single wall open, rotated into a 1x2 maze.
        let mut walls = WallIncidence::new(Dimensions::new(2, 1).unwrap(), true);
        walls.carve((0, 0), Direction::East);
        let m = Maze::with_special_cells(walls, Some((0, 0)), []).unwrap();
        let r = m.apply_transformation(Transformation::Rotate90).unwrap();
        assert_eq!(r.dimensions(), Dimensions::new(1, 2).unwrap());
        assert_eq!(r.wall((0, 0), Direction::South), Ok(false));
        assert_eq!(r.start_cell(), Some((0, 0)));
    }

    #[test]
    fn test_diagonal_on_non_square_is_illegal() {
        let m = maze(6, 4, Generator::RecurDiv, 3);
        for t in [
            Transformation::ReflectDiagonalNesw,
            Transformation::ReflectDiagonalNwse,
        ] {
            assert_eq!(
                m.apply_transformation(t),
                Err(MazeError::IllegalGroupOperation {
                    width: 6,
                    height: 4,
                    transformation: t
                })
            );
        }
        // Compositions reducing to a diagonal reflection are illegal as a single step.
        for t1 in Transformation::ALL {
            for t2 in Transformation::ALL {
                let composed = Transformation::compose(t1, t2);
                if composed.is_diagonal() {
                    assert!(m.apply_transformation(composed).is_err());
                }
            }
        }
    }

    #[test]
    fn test_thick_maze_transformations() {
        let thick = ThickMaze::from(&maze(6, 4, Generator::Prim, 4));
        let turned = thick
            .apply_transformation(Transformation::Rotate90)
            .and_then(|t| t.apply_transformation(Transformation::Rotate270))
            .unwrap();
        assert_eq!(turned, thick);
        assert!(thick
            .apply_transformation(Transformation::ReflectDiagonalNwse)
            .is_err());
        // Transforming commutes with thickening.
        let m = maze(5, 5, Generator::AldousBroder, 5);
        for t in Transformation::ALL {
            assert_eq!(
                ThickMaze::from(&m.apply_transformation(t).unwrap()),
                ThickMaze::from(&m).apply_transformation(t).unwrap()
            );
        }
    }

    #[test]
    fn test_full_braid_removes_dead_ends() {
        let m = maze(12, 9, Generator::RecurBacktrack, 6);
        assert!(!m.dead_ends().is_empty());
        let braided = m.braid(1.0, &mut get_rng(Some(0))).unwrap();
        assert!(braided.dead_ends().is_empty());
        assert!(braided.is_connected());
        assert_eq!(braided.start_cell(), m.start_cell());
    }

    #[test]
    fn test_braid_zero_is_noop() {
        let m = maze(10, 10, Generator::Kruskal, 7);
        let braided = m.braid(0.0, &mut get_rng(Some(1))).unwrap();
        assert_eq!(braided.walls(), m.walls());
        assert_eq!(
            m.braid(2.0, &mut get_rng(Some(1))),
            Err(MazeError::InvalidProbability(2.0))
        );
    }

    #[test]
    fn test_braid_keeps_boundary_locked_dead_ends() {
        // In a corridor the two ends have no interior wall left to open.
        let m = maze(5, 1, Generator::RecurBacktrack, 0);
        let braided = m.braid(1.0, &mut get_rng(Some(0))).unwrap();
        assert_eq!(braided.dead_ends(), vec![(0, 0), (4, 0)]);
    }

    proptest! {
        #[test]
        fn prop_composition_law_square(
            seed in any::<u64>(),
            side in 1usize..9,
            generator in any_generator(),
            t1 in any_transformation(),
            t2 in any_transformation(),
        ) {
            let m = maze(side, side, generator, seed)
                .with_start_cell(Some((0, side / 2)))
                .and_then(|m| m.with_goal_cells([(side - 1, side - 1), (side / 2, 0)]))
                .unwrap();
            let stepwise = m.apply_transformation(t1).and_then(|m| m.apply_transformation(t2)).unwrap();
            let composed = m.apply_transformation(Transformation::compose(t1, t2)).unwrap();
            prop_assert_eq!(stepwise, composed);
        }

        #[test]
        fn prop_composition_law_rectangular(
            seed in any::<u64>(),
            width in 1usize..9,
            height in 1usize..9,
            t1 in any_transformation(),
            t2 in any_transformation(),
        ) {
            let composed = Transformation::compose(t1, t2);
            prop_assume!(width != height);
            prop_assume!(!t1.is_diagonal() && !t2.is_diagonal() && !composed.is_diagonal());
            let m = maze(width, height, Generator::RecurBacktrack, seed);
            let stepwise = m.apply_transformation(t1).and_then(|m| m.apply_transformation(t2)).unwrap();
            prop_assert_eq!(stepwise, m.apply_transformation(composed).unwrap());
        }

        #[test]
        fn prop_transformations_preserve_perfection(
            seed in any::<u64>(),
            side in 1usize..10,
            t in any_transformation(),
        ) {
            let m = maze(side, side, Generator::Kruskal, seed);
            let image = m.apply_transformation(t).unwrap();
            prop_assert!(image.is_perfect());
            prop_assert_eq!(image.dead_ends().len(), m.dead_ends().len());
        }

        #[test]
        fn prop_braid_all_leaves_no_dead_ends(
            seed in any::<u64>(),
            width in 2usize..12,
            height in 2usize..12,
            generator in any_generator(),
        ) {
            let m = maze(width, height, generator, seed);
            let braided = m.braid(1.0, &mut get_rng(Some(seed))).unwrap();
            prop_assert!(braided.dead_ends().is_empty());
        }
    }
}
