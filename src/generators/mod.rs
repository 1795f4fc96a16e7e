use rand::{Rng, SeedableRng, rngs::StdRng};

mod aldous_broder;
mod binary_tree;
pub mod grid_colouring;
mod kruskal;
mod recur_backtrack;
mod recur_div;

pub use aldous_broder::aldous_broder;
pub use binary_tree::{DEFAULT_EAST_PROBABILITY, binary_tree};
pub use grid_colouring::GridColouringGenerator;
pub use kruskal::{UnionFind, randomized_kruskal, randomized_kruskal_in_order};
pub use recur_backtrack::recursive_backtrack;
pub use recur_div::recursive_division;

use crate::{
    error::{Result, check_probability},
    maze::{Dimensions, Maze},
    thick::{CandidateConfiguration, GridColouring},
};

/// Get a random number generator, optionally seeded for reproducibility.
pub fn get_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

/// The perfect-maze generation algorithms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Generator {
    RecurBacktrack,
    AldousBroder,
    Kruskal,
    RecurDiv,
    BinaryTree { east_probability: f64 },
    /// Randomized Prim, run as grid-colouring frontier expansion over the orthogonal colouring.
    Prim,
}

impl Generator {
    pub const ALL: [Generator; 6] = [
        Generator::RecurBacktrack,
        Generator::AldousBroder,
        Generator::Kruskal,
        Generator::RecurDiv,
        Generator::BinaryTree {
            east_probability: DEFAULT_EAST_PROBABILITY,
        },
        Generator::Prim,
    ];

    /// The binary tree generator with its default east-carve probability.
    pub fn binary_tree() -> Self {
        Generator::BinaryTree {
            east_probability: DEFAULT_EAST_PROBABILITY,
        }
    }

    /// Generates a maze of the given dimensions, drawing all randomness from `rng`.
    pub fn generate<R: Rng>(&self, dims: Dimensions, rng: &mut R) -> Result<Maze> {
        tracing::debug!("[generate] {} maze with {}", dims, self);
        let walls = match *self {
            Generator::RecurBacktrack => recursive_backtrack(dims, rng),
            Generator::AldousBroder => aldous_broder(dims, rng),
            Generator::Kruskal => randomized_kruskal(dims, rng),
            Generator::RecurDiv => recursive_division(dims, rng),
            Generator::BinaryTree { east_probability } => {
                binary_tree(dims, check_probability(east_probability)?, rng)
            }
            Generator::Prim => {
                let generator = GridColouringGenerator::new(
                    GridColouring::orthogonal(),
                    CandidateConfiguration::orthogonal(),
                )?;
                let thick = generator.generate(dims.thickened(), rng);
                return Maze::try_from(&thick);
            }
        };
        Ok(Maze::new(walls))
    }
}

impl std::fmt::Display for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Generator::RecurBacktrack => write!(f, "Recursive Backtracking"),
            Generator::AldousBroder => write!(f, "Aldous-Broder Random Walk"),
            Generator::Kruskal => write!(f, "Kruskal's Algorithm"),
            Generator::RecurDiv => write!(f, "Recursive Division"),
            Generator::BinaryTree { east_probability } => {
                write!(f, "Binary Tree (east probability {})", east_probability)
            }
            Generator::Prim => write!(f, "Prim's Algorithm"),
        }
    }
}

pub fn generate_maze(dims: Dimensions, generator: Generator, seed: Option<u64>) -> Result<Maze> {
    let mut rng = get_rng(seed);
    generator.generate(dims, &mut rng)
}
