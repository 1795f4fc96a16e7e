pub mod error;
pub mod generators;
pub mod maze;
pub mod render;
pub mod squash;
pub mod thick;
pub mod transform;

pub use error::{MazeError, Result};
pub use generators::{Generator, generate_maze, get_rng};
pub use maze::{Cell, Dimensions, Direction, Maze};
pub use squash::SquashedMaze;
pub use thick::ThickMaze;
pub use transform::Transformation;
