use rand::Rng;

use crate::maze::{Dimensions, Grid, WallIncidence, get_neighbors};

/// Aldous-Broder: an uninformed random walk that carves into every cell it enters for the first
/// time. The result is a uniformly random spanning tree.
///
/// The walk wanders until every cell has been visited, so its expected running time is polynomial
/// in the number of cells rather than linear. This is inherent to the algorithm.
pub fn aldous_broder<R: Rng>(dims: Dimensions, rng: &mut R) -> WallIncidence {
    let mut walls = WallIncidence::new(dims, true);
    let mut visited = Grid::new(dims, false);

    let mut current = (
        rng.random_range(0..dims.width()),
        rng.random_range(0..dims.height()),
    );
    visited[current] = true;
    let mut remaining = dims.cell_count() - 1;
    let mut steps: u64 = 0;

    while remaining > 0 {
        let neighbors = get_neighbors(current, dims).collect::<Vec<_>>();
        let (dir, next) = neighbors[rng.random_range(0..neighbors.len())];
        if !visited[next] {
            walls.carve(current, dir);
            visited[next] = true;
            remaining -= 1;
        }
        current = next;
        steps += 1;
    }

    tracing::debug!("[aldous_broder] covered a {} maze in {} steps", dims, steps);
    walls
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{generators::get_rng, maze::Maze};

    #[test]
    fn test_aldous_broder_is_perfect() {
        let dims = Dimensions::new(10, 8).unwrap();
        for seed in 0..5 {
            let maze = Maze::new(aldous_broder(dims, &mut get_rng(Some(seed))));
            assert!(maze.is_perfect());
        }
    }

    #[test]
    fn test_single_row() {
        let dims = Dimensions::new(9, 1).unwrap();
        let walls = aldous_broder(dims, &mut get_rng(Some(3)));
        // A 9x1 spanning tree is the whole corridor.
        assert_eq!(walls.count_walls(), 0);
    }
}
