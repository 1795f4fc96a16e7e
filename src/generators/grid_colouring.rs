use rand::Rng;

use crate::{
    error::Result,
    maze::{Cell, Dimensions, Grid, get_neighbors},
    thick::{AggregateWall, CandidateConfiguration, CellContents, GridColouring, ThickMaze, WallOffsets},
};

/// Randomized Prim generalized to periodic grid colourings.
///
/// Rooms are the cells of the configuration's room colour. Walls between rooms are aggregate
/// walls whose shapes come from [`GridColouring::map_walls_to_offsets`]. With the orthogonal
/// colouring this is ordinary randomized Prim on a thick maze.
#[derive(Debug, Clone)]
pub struct GridColouringGenerator {
    colouring: GridColouring,
    configuration: CandidateConfiguration,
    offsets: Vec<WallOffsets>,
}

impl GridColouringGenerator {
    pub fn new(colouring: GridColouring, configuration: CandidateConfiguration) -> Result<Self> {
        let offsets = colouring.map_walls_to_offsets(&configuration)?;
        Ok(GridColouringGenerator {
            colouring,
            configuration,
            offsets,
        })
    }

    fn is_room(&self, cell: Cell) -> bool {
        self.colouring.cell_colour(cell.0 as isize, cell.1 as isize) == self.configuration.room_colour
    }

    pub fn generate<R: Rng>(&self, dims: Dimensions, rng: &mut R) -> ThickMaze {
        let mut contents = Grid::new(dims, CellContents::Wall);

        let rooms = dims.cells().filter(|&c| self.is_room(c)).collect::<Vec<_>>();
        if rooms.is_empty() {
            tracing::warn!("[grid_colouring] no room cells in a {} grid", dims);
            return ThickMaze::new(contents);
        }

        // Pick a room at random, mark it as floor, and add its walls to the frontier
        let start = rooms[rng.random_range(0..rooms.len())];
        contents[start] = CellContents::Floor;
        let mut frontier = self.adjacent_walls(start, dims);
        let mut opened = 0;

        while !frontier.is_empty() {
            // Swap the chosen wall with the last one and pop it
            let idx = rng.random_range(0..frontier.len());
            let wall = frontier.swap_remove(idx);

            for room in self.adjacent_rooms(&wall, dims) {
                if contents[room] != CellContents::Wall {
                    continue;
                }
                contents[room] = CellContents::Floor;
                for &cell in wall.cells() {
                    contents[cell] = CellContents::Floor;
                }
                opened += 1;
                tracing::trace!("[grid_colouring] opened room {:?}", room);
                frontier.extend(self.adjacent_walls(room, dims));
            }
        }

        tracing::debug!(
            "[grid_colouring] opened {} of {} rooms in a {} grid",
            opened + 1,
            rooms.len(),
            dims
        );
        ThickMaze::new(contents)
    }

    /// The walls around `room` that lie entirely within `dims` and match their class's colours.
    fn adjacent_walls(&self, room: Cell, dims: Dimensions) -> Vec<AggregateWall> {
        let (x, y) = (room.0 as isize, room.1 as isize);
        self.offsets
            .iter()
            .filter_map(|wall| {
                let colours = &self.configuration.walls[wall.class];
                let cells = wall
                    .offsets
                    .iter()
                    .zip(colours)
                    .map(|(&(dx, dy), &colour)| {
                        let (cx, cy) = (x + dx, y + dy);
                        dims.cell_at(cx, cy)
                            .filter(|_| self.colouring.cell_colour(cx, cy) == colour)
                    })
                    .collect::<Option<Vec<_>>>()?;
                AggregateWall::new(cells)
            })
            .collect()
    }

    /// The rooms orthogonally adjacent to any cell of `wall`.
    fn adjacent_rooms(&self, wall: &AggregateWall, dims: Dimensions) -> Vec<Cell> {
        let mut rooms = Vec::new();
        for &cell in wall.cells() {
            for (_, n) in get_neighbors(cell, dims) {
                if self.is_room(n) && !rooms.contains(&n) {
                    rooms.push(n);
                }
            }
        }
        rooms
    }
}
