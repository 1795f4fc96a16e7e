use std::{fmt, io::Write};

use crossterm::{
    queue,
    style::{self, Color, Stylize},
};

use crate::{
    maze::{Direction, Maze},
    thick::{CellContents, ThickMaze},
};

/// Box-drawing characters indexed by `north * 8 + west * 4 + south * 2 + east`, where each flag
/// says whether a wall line leaves the corner in that direction.
const BOX_CHARS: [&str; 16] = [
    " ", "╶", "╷", "┌", "╴", "─", "┐", "┬", "╵", "└", "│", "├", "┘", "┴", "┤", "┼",
];

/// Draws the maze with box-drawing characters, one line per row of wall corners.
///
/// Corner (x, y) sits at the north-west corner of cell (x, y). Each corner is followed by a
/// horizontal segment, except the last one in a row.
pub fn render_to_string(maze: &Maze) -> String {
    let (w, h) = (maze.width() as isize, maze.height() as isize);
    let wall = |x: isize, y: isize, d: Direction| maze.wall_or_open(x, y, d);

    let mut out = String::new();
    for y in 0..=h {
        for x in 0..=w {
            let north = wall(x - 1, y - 1, Direction::East) || wall(x, y - 1, Direction::West);
            let west = wall(x - 1, y - 1, Direction::South) || wall(x - 1, y, Direction::North);
            let south = wall(x - 1, y, Direction::East) || wall(x, y, Direction::West);
            let east = wall(x, y - 1, Direction::South) || wall(x, y, Direction::North);
            let idx = (north as usize) * 8 + (west as usize) * 4 + (south as usize) * 2 + east as usize;
            out.push_str(BOX_CHARS[idx]);
            if x < w {
                out.push_str(if east { BOX_CHARS[5] } else { BOX_CHARS[0] });
            }
        }
        out.push('\n');
    }
    out
}

/// One thick-maze cell as drawn in a terminal.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Tile {
    Wall,
    Floor,
    Start,
    Goal,
}

impl Tile {
    /// The width of each tile when rendered, in character widths.
    const WIDTH: usize = 2;
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let styled_symbol = match self {
            Tile::Wall => "██".with(Color::White),
            Tile::Floor => "  ".with(Color::Reset),
            Tile::Start => "🟩".with(Color::Green),
            Tile::Goal => "🟥".with(Color::Red),
        };

        #[cfg(debug_assertions)]
        {
            use unicode_width::UnicodeWidthStr;
            assert_eq!(
                styled_symbol.content().width(),
                Tile::WIDTH,
                "Each tile must occupy exactly two character widths."
            );
        }

        write!(f, "{}", styled_symbol)
    }
}

/// Writes a thick maze to a terminal, surrounded by a border of wall, with the start cell in
/// green and goal cells in red.
pub fn print_thick_maze(out: &mut impl Write, maze: &ThickMaze) -> std::io::Result<()> {
    let border = maze.width() + 2;
    for _ in 0..border {
        queue!(out, style::Print(Tile::Wall))?;
    }
    queue!(out, style::Print("\n"))?;

    for y in 0..maze.height() {
        queue!(out, style::Print(Tile::Wall))?;
        for x in 0..maze.width() {
            let cell = (x, y);
            let tile = if maze.start_cell() == Some(cell) {
                Tile::Start
            } else if maze.goal_cells().contains(&cell) {
                Tile::Goal
            } else {
                match maze.contents()[cell] {
                    CellContents::Floor => Tile::Floor,
                    CellContents::Wall => Tile::Wall,
                }
            };
            queue!(out, style::Print(tile))?;
        }
        queue!(out, style::Print(Tile::Wall), style::Print("\n"))?;
    }

    for _ in 0..border {
        queue!(out, style::Print(Tile::Wall))?;
    }
    queue!(out, style::Print("\n"))?;
    out.flush()
}

/// Writes a maze to a terminal through its thick layout.
pub fn print_maze(out: &mut impl Write, maze: &Maze) -> std::io::Result<()> {
    print_thick_maze(out, &ThickMaze::from(maze))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::{Dimensions, WallIncidence};

    fn dims(w: usize, h: usize) -> Dimensions {
        Dimensions::new(w, h).unwrap()
    }

    #[test]
    fn test_single_cell_box() {
        let maze = Maze::new(WallIncidence::new(dims(1, 1), true));
        assert_eq!(render_to_string(&maze), "┌─┐\n└─┘\n");
    }

    #[test]
    fn test_open_and_closed_walls() {
        let mut walls = WallIncidence::new(dims(2, 1), true);
        assert_eq!(render_to_string(&Maze::new(walls.clone())), "┌─┬─┐\n└─┴─┘\n");
        walls.carve((0, 0), Direction::East);
        assert_eq!(render_to_string(&Maze::new(walls)), "┌───┐\n└───┘\n");
    }

    #[test]
    fn test_rendered_size() {
        let maze = Maze::new(WallIncidence::new(dims(4, 3), false));
        let rendered = render_to_string(&maze);
        assert_eq!(rendered.lines().count(), 4);
        assert!(rendered.lines().all(|l| l.chars().count() == 9));
        // An open interior leaves the inner corners blank.
        assert_eq!(rendered.lines().nth(1), Some("│       │"));
    }

    #[test]
    fn test_print_maze_marks_special_cells() {
        let mut walls = WallIncidence::new(dims(2, 2), true);
        walls.carve((0, 0), Direction::East);
        walls.carve((0, 0), Direction::South);
        walls.carve((1, 0), Direction::South);
        let maze = Maze::with_special_cells(walls, Some((0, 0)), [(1, 1)]).unwrap();

        let mut out = Vec::new();
        print_maze(&mut out, &maze).unwrap();
        let printed = String::from_utf8(out).unwrap();
        // A 3x3 thick layout plus its border.
        assert_eq!(printed.lines().count(), 5);
        assert_eq!(printed.matches("🟩").count(), 1);
        assert_eq!(printed.matches("🟥").count(), 1);
    }
}
