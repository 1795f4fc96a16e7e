use rand::Rng;

use crate::maze::{Dimensions, Grid, WallIncidence, get_neighbors};

/// Randomized depth-first search with an explicit stack.
/// Produces a spanning tree over all cells.
pub fn recursive_backtrack<R: Rng>(dims: Dimensions, rng: &mut R) -> WallIncidence {
    let mut walls = WallIncidence::new(dims, true);
    let mut visited = Grid::new(dims, false);

    // Initialize the starting point
    let start = (
        rng.random_range(0..dims.width()),
        rng.random_range(0..dims.height()),
    );
    visited[start] = true;

    // The stack keeps only visited cells
    let mut stack = vec![start];

    while let Some(&cell) = stack.last() {
        let neighbors = get_neighbors(cell, dims)
            .filter(|&(_, n)| !visited[n])
            .collect::<Vec<_>>();

        if neighbors.is_empty() {
            stack.pop();
            continue;
        }

        let (dir, neighbor) = neighbors[rng.random_range(0..neighbors.len())];
        walls.carve(cell, dir);
        visited[neighbor] = true;
        // Carve the maze in that neighbor's direction; this cell stays below it for later
        stack.push(neighbor);
    }

    tracing::debug!(
        "[recur_backtrack] carved {} passages in a {} maze",
        walls.len() - walls.count_walls(),
        dims
    );
    walls
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{generators::get_rng, maze::Maze};

    #[test]
    fn test_recursive_backtrack_is_perfect() {
        let dims = Dimensions::new(20, 13).unwrap();
        let maze = Maze::new(recursive_backtrack(dims, &mut get_rng(Some(7))));
        assert!(maze.is_perfect());
    }

    #[test]
    fn test_different_seeds_differ() {
        let dims = Dimensions::new(16, 16).unwrap();
        let a = recursive_backtrack(dims, &mut get_rng(Some(1)));
        let b = recursive_backtrack(dims, &mut get_rng(Some(2)));
        assert_ne!(a, b);
    }
}
