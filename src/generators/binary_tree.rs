use rand::Rng;

use crate::maze::{Dimensions, Direction, WallIncidence};

pub const DEFAULT_EAST_PROBABILITY: f64 = 0.5;

/// Binary tree method: a single row-major pass from the north-west corner.
///
/// Each cell carves east with probability `east_probability` and south otherwise. Along the
/// easternmost column only south is possible, along the southernmost row only east, and the
/// south-east corner carves nothing. Paths are biased toward the south-east; a high probability
/// gives long horizontal passages and a low one long vertical passages.
///
/// `east_probability` must lie within [0, 1].
pub fn binary_tree<R: Rng>(dims: Dimensions, east_probability: f64, rng: &mut R) -> WallIncidence {
    let mut walls = WallIncidence::new(dims, true);
    let (width, height) = (dims.width(), dims.height());

    for cell in dims.cells() {
        let can_east = cell.0 + 1 < width;
        let can_south = cell.1 + 1 < height;
        let dir = match (can_east, can_south) {
            (true, true) => {
                if rng.random_bool(east_probability) {
                    Direction::East
                } else {
                    Direction::South
                }
            }
            (true, false) => Direction::East,
            (false, true) => Direction::South,
            (false, false) => continue,
        };
        walls.carve(cell, dir);
    }

    tracing::debug!(
        "[binary_tree] carved a {} maze with east probability {}",
        dims,
        east_probability
    );
    walls
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{generators::get_rng, maze::Maze};

    #[test]
    fn test_binary_tree_is_perfect() {
        let dims = Dimensions::new(14, 9).unwrap();
        for p in [0.0, 0.25, DEFAULT_EAST_PROBABILITY, 1.0] {
            let maze = Maze::new(binary_tree(dims, p, &mut get_rng(Some(3))));
            assert!(maze.is_perfect(), "p = {}", p);
        }
    }

    #[test]
    fn test_extreme_probabilities() {
        let dims = Dimensions::new(5, 4).unwrap();
        // Always east: every row is an open corridor, joined only along the east column.
        let maze = Maze::new(binary_tree(dims, 1.0, &mut get_rng(Some(0))));
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(maze.wall((x, y), Direction::East), Ok(false));
                if y < 3 {
                    assert_eq!(maze.wall((x, y), Direction::South), Ok(true));
                }
            }
        }
        // Always south: every column is an open corridor, joined only along the south row.
        let maze = Maze::new(binary_tree(dims, 0.0, &mut get_rng(Some(0))));
        for x in 0..5 {
            for y in 0..3 {
                assert_eq!(maze.wall((x, y), Direction::South), Ok(false));
            }
        }
    }
}
