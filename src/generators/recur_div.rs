use std::collections::VecDeque;

use rand::Rng;

use crate::maze::{Dimensions, Direction, WallIncidence};

/// Orientation of a dividing wall line.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Orientation {
    /// A wall line running north-south, splitting the width.
    Vertical,
    /// A wall line running east-west, splitting the height.
    Horizontal,
}

/// A sub-rectangle of the grid still to be divided.
#[derive(Debug, Clone, Copy)]
struct Chamber {
    x: usize,
    y: usize,
    width: usize,
    height: usize,
}

impl Chamber {
    /// Height 1 forces a vertical line, width 1 a horizontal one; otherwise the longer side is
    /// split, with square chambers split horizontally.
    fn orientation(&self) -> Orientation {
        if self.height == 1 || self.width > self.height {
            Orientation::Vertical
        } else {
            Orientation::Horizontal
        }
    }
}

/// Recursive division: start from an open grid and add walls, splitting chambers until every
/// chamber is a single cell. Uses a worklist instead of recursion.
pub fn recursive_division<R: Rng>(dims: Dimensions, rng: &mut R) -> WallIncidence {
    let mut walls = WallIncidence::new(dims, false);

    let mut chambers = VecDeque::from([Chamber {
        x: 0,
        y: 0,
        width: dims.width(),
        height: dims.height(),
    }]);
    let mut divisions = 0;

    while let Some(chamber) = chambers.pop_front() {
        if chamber.width == 1 && chamber.height == 1 {
            continue;
        }
        let Chamber {
            x,
            y,
            width,
            height,
        } = chamber;

        match chamber.orientation() {
            Orientation::Vertical => {
                // Wall along the east side of column x + offset; the last column is excluded
                let offset = rng.random_range(0..width - 1);
                let gap = rng.random_range(0..height);
                (0..height)
                    .filter(|&i| i != gap)
                    .for_each(|i| walls.build((x + offset, y + i), Direction::East));

                let left_width = offset + 1;
                chambers.push_back(Chamber {
                    x,
                    y,
                    width: left_width,
                    height,
                });
                chambers.push_back(Chamber {
                    x: x + left_width,
                    y,
                    width: width - left_width,
                    height,
                });
            }
            Orientation::Horizontal => {
                // Wall along the south side of row y + offset; the last row is excluded
                let offset = rng.random_range(0..height - 1);
                let gap = rng.random_range(0..width);
                (0..width)
                    .filter(|&i| i != gap)
                    .for_each(|i| walls.build((x + i, y + offset), Direction::South));

                let upper_height = offset + 1;
                chambers.push_back(Chamber {
                    x,
                    y,
                    width,
                    height: upper_height,
                });
                chambers.push_back(Chamber {
                    x,
                    y: y + upper_height,
                    width,
                    height: height - upper_height,
                });
            }
        }
        divisions += 1;
    }

    tracing::debug!("[recur_div] divided a {} maze {} times", dims, divisions);
    walls
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{generators::get_rng, maze::Maze};

    #[test]
    fn test_orientation_policy() {
        let chamber = |width, height| Chamber {
            x: 0,
            y: 0,
            width,
            height,
        };
        assert_eq!(chamber(5, 1).orientation(), Orientation::Vertical);
        assert_eq!(chamber(1, 5).orientation(), Orientation::Horizontal);
        assert_eq!(chamber(6, 3).orientation(), Orientation::Vertical);
        assert_eq!(chamber(3, 6).orientation(), Orientation::Horizontal);
        assert_eq!(chamber(4, 4).orientation(), Orientation::Horizontal);
    }

    #[test]
    fn test_recursive_division_is_perfect() {
        for (w, h) in [(2, 1), (1, 2), (2, 2), (17, 9), (30, 30)] {
            let dims = Dimensions::new(w, h).unwrap();
            let maze = Maze::new(recursive_division(dims, &mut get_rng(Some(11))));
            assert!(maze.is_perfect(), "{}x{}", w, h);
        }
    }

    #[test]
    fn test_two_by_two_has_one_wall() {
        let dims = Dimensions::new(2, 2).unwrap();
        let walls = recursive_division(dims, &mut get_rng(Some(0)));
        assert_eq!(walls.count_walls(), 1);
    }
}
