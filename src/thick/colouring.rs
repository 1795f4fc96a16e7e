use crate::{
    error::{MazeError, Result},
    maze::Direction,
};

pub type Colour = u32;

/// A relative cell position (dx, dy).
pub type Offset = (isize, isize);

/// A periodic colouring of the plane, given by one tile repeated in both axes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridColouring {
    /// Rows of the repeated tile.
    pattern: Vec<Vec<Colour>>,
}

/// Which colour marks rooms, and which colour sequences form the removable walls between them.
///
/// Each entry of `walls` describes one wall class: a chain of orthogonally adjacent cells leaving
/// a room, whose colours are given in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateConfiguration {
    pub room_colour: Colour,
    pub walls: Vec<Vec<Colour>>,
}

/// Offsets, relative to a room, of the cells making up one wall of a given class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WallOffsets {
    pub class: usize,
    pub offsets: Vec<Offset>,
}

impl GridColouring {
    /// Creates a colouring from a non-empty rectangular tile.
    pub fn new(pattern: Vec<Vec<Colour>>) -> Result<Self> {
        let cols = pattern.first().map_or(0, Vec::len);
        if cols == 0 {
            return Err(MazeError::IllegalColouring {
                reason: "the colouring pattern is empty".to_string(),
            });
        }
        if pattern.iter().any(|row| row.len() != cols) {
            return Err(MazeError::IllegalColouring {
                reason: "the colouring pattern rows differ in length".to_string(),
            });
        }
        Ok(GridColouring { pattern })
    }

    /// Rooms on even-even cells, with single-cell walls between orthogonally adjacent rooms.
    pub fn orthogonal() -> Self {
        GridColouring {
            pattern: vec![vec![0, 1], vec![2, 3]],
        }
    }

    /// Rooms every third cell, separated by walls two cells thick.
    pub fn wide_walls() -> Self {
        GridColouring {
            pattern: vec![vec![0, 1, 1], vec![2, 3, 3], vec![2, 3, 3]],
        }
    }

    pub fn num_rows(&self) -> usize {
        self.pattern.len()
    }

    pub fn num_cols(&self) -> usize {
        self.pattern[0].len()
    }

    pub fn cell_colour(&self, x: isize, y: isize) -> Colour {
        let row = y.rem_euclid(self.num_rows() as isize) as usize;
        let col = x.rem_euclid(self.num_cols() as isize) as usize;
        self.pattern[row][col]
    }

    /// Turns each wall class of `configuration` into offsets relative to a room.
    ///
    /// Every chain of orthogonally adjacent cells leaving the reference room (the first room cell
    /// of the tile in row-major order), matching the class's colour sequence and ending beside
    /// another room, yields one entry.
    pub fn map_walls_to_offsets(
        &self,
        configuration: &CandidateConfiguration,
    ) -> Result<Vec<WallOffsets>> {
        let origin = self
            .pattern
            .iter()
            .enumerate()
            .find_map(|(y, row)| {
                row.iter()
                    .position(|&c| c == configuration.room_colour)
                    .map(|x| (x as isize, y as isize))
            })
            .ok_or_else(|| MazeError::IllegalColouring {
                reason: format!(
                    "room colour {} does not appear in the colouring",
                    configuration.room_colour
                ),
            })?;

        let mut offset_map = Vec::new();
        for (class, colours) in configuration.walls.iter().enumerate() {
            if colours.is_empty() || colours.contains(&configuration.room_colour) {
                return Err(MazeError::IllegalColouring {
                    reason: format!("wall class {} must be non-empty and exclude the room colour", class),
                });
            }
            let mut chains = Vec::new();
            self.extend_chain(origin, colours, configuration.room_colour, &mut Vec::new(), &mut chains);

            let mut seen = Vec::<Vec<Offset>>::new();
            for chain in chains {
                let mut key = chain.clone();
                key.sort_unstable();
                if seen.contains(&key) {
                    continue;
                }
                seen.push(key);
                offset_map.push(WallOffsets {
                    class,
                    offsets: chain
                        .into_iter()
                        .map(|(x, y)| (x - origin.0, y - origin.1))
                        .collect(),
                });
            }
        }
        Ok(offset_map)
    }

    fn extend_chain(
        &self,
        origin: Offset,
        colours: &[Colour],
        room_colour: Colour,
        chain: &mut Vec<Offset>,
        chains: &mut Vec<Vec<Offset>>,
    ) {
        let &last = chain.last().unwrap_or(&origin);
        let step = |(x, y): Offset, d: Direction| {
            let (dx, dy) = d.delta();
            (x + dx, y + dy)
        };

        if chain.len() == colours.len() {
            let separates = Direction::ALL.into_iter().map(|d| step(last, d)).any(|n| {
                n != origin && self.cell_colour(n.0, n.1) == room_colour
            });
            if separates {
                chains.push(chain.clone());
            }
            return;
        }

        for d in Direction::ALL {
            let next = step(last, d);
            if next == origin
                || chain.contains(&next)
                || self.cell_colour(next.0, next.1) != colours[chain.len()]
            {
                continue;
            }
            chain.push(next);
            self.extend_chain(origin, colours, room_colour, chain, chains);
            chain.pop();
        }
    }
}

impl CandidateConfiguration {
    /// Configuration for [`GridColouring::orthogonal`].
    pub fn orthogonal() -> Self {
        CandidateConfiguration {
            room_colour: 0,
            walls: vec![vec![1], vec![2]],
        }
    }

    /// Configuration for [`GridColouring::wide_walls`].
    pub fn wide_walls() -> Self {
        CandidateConfiguration {
            room_colour: 0,
            walls: vec![vec![1, 1], vec![2, 2]],
        }
    }
}
