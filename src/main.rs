use mazeworks::{
    Dimensions, Generator, Maze, SquashedMaze, ThickMaze, Transformation,
    generators::{GridColouringGenerator, get_rng},
    render,
    thick::{CandidateConfiguration, GridColouring},
};
use rand::rngs::StdRng;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
Usage: mazeworks <algorithm> <width> <height> [seed] [options]

Algorithms:
  backtrack       recursive backtracking
  aldous-broder   Aldous-Broder random walk
  kruskal         randomized Kruskal
  division        recursive division
  binary-tree     binary tree (see --east)
  prim            randomized Prim
  wide-walls      grid colouring with two-cell walls (thick maze)

Options:
  --east <p>          east-carve probability for binary-tree
  --transform <name>  identity, rotate-90, rotate-180, rotate-270, reflect-horizontal,
                      reflect-vertical, reflect-nesw, reflect-nwse
  --braid <p>         open each dead end with probability p
  --squash            print corridor-graph statistics
  --box               draw with box characters instead of blocks";

#[derive(Debug)]
struct Options {
    algorithm: String,
    dims: Dimensions,
    seed: Option<u64>,
    east_probability: Option<f64>,
    transformation: Option<Transformation>,
    braid: Option<f64>,
    squash: bool,
    box_drawing: bool,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<Options, String> {
    let algorithm = args.next().ok_or("missing algorithm")?;
    let width = args
        .next()
        .and_then(|s| s.parse::<usize>().ok())
        .ok_or("width must be a positive number")?;
    let height = args
        .next()
        .and_then(|s| s.parse::<usize>().ok())
        .ok_or("height must be a positive number")?;
    let dims = Dimensions::new(width, height).map_err(|e| e.to_string())?;

    let mut options = Options {
        algorithm,
        dims,
        seed: None,
        east_probability: None,
        transformation: None,
        braid: None,
        squash: false,
        box_drawing: false,
    };

    let parse_probability = |value: Option<String>, flag: &str| {
        value
            .and_then(|s| s.parse::<f64>().ok())
            .ok_or_else(|| format!("{} needs a probability", flag))
    };
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--east" => options.east_probability = Some(parse_probability(args.next(), "--east")?),
            "--braid" => options.braid = Some(parse_probability(args.next(), "--braid")?),
            "--transform" => {
                let name = args.next().ok_or("--transform needs a name")?;
                options.transformation = Some(name.parse()?);
            }
            "--squash" => options.squash = true,
            "--box" => options.box_drawing = true,
            seed if options.seed.is_none() && !seed.starts_with("--") => {
                options.seed = Some(
                    seed.parse::<u64>()
                        .map_err(|_| format!("invalid seed: {}", seed))?,
                );
            }
            other => return Err(format!("unexpected argument: {}", other)),
        }
    }
    Ok(options)
}

fn init_logging() -> WorkerGuard {
    let file_appender = tracing_appender::rolling::never("logs", "mazeworks.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(writer)
        .with_ansi(false)
        .init();
    guard
}

fn generator_for(options: &Options) -> Option<Generator> {
    let generator = match options.algorithm.as_str() {
        "backtrack" => Generator::RecurBacktrack,
        "aldous-broder" => Generator::AldousBroder,
        "kruskal" => Generator::Kruskal,
        "division" => Generator::RecurDiv,
        "binary-tree" => match options.east_probability {
            Some(east_probability) => Generator::BinaryTree { east_probability },
            None => Generator::binary_tree(),
        },
        "prim" => Generator::Prim,
        _ => return None,
    };
    if east_is_ignored(options, generator) {
        tracing::warn!("--east applies only to binary-tree, not {}", generator);
        eprintln!("Ignoring --east for {}.", generator);
    }
    Some(generator)
}

/// Whether `--east` was given for a generator that takes no east probability.
fn east_is_ignored(options: &Options, generator: Generator) -> bool {
    options.east_probability.is_some() && !matches!(generator, Generator::BinaryTree { .. })
}

/// Generates, transforms and braids a maze, then prints it.
fn run_maze(options: &Options, generator: Generator, rng: &mut StdRng) -> mazeworks::Result<()> {
    let (w, h) = (options.dims.width(), options.dims.height());
    let mut maze = generator
        .generate(options.dims, rng)?
        .with_start_cell(Some((0, 0)))?
        .with_goal_cells([(w - 1, h - 1)])?;
    tracing::info!("Generated a {} maze with {}", options.dims, generator);

    if let Some(t) = options.transformation {
        maze = maze.apply_transformation(t)?;
    }
    if let Some(p) = options.braid {
        let dead_ends = maze.dead_ends().len();
        maze = maze.braid(p, rng)?;
        tracing::info!(
            "Braided {} of {} dead ends",
            dead_ends - maze.dead_ends().len(),
            dead_ends
        );
    }

    print(options, &maze);
    if options.squash {
        print_squash_stats(&maze);
    }
    Ok(())
}

/// Generates a wide-walled thick maze and prints it.
fn run_wide_walls(options: &Options, rng: &mut StdRng) -> mazeworks::Result<()> {
    let generator =
        GridColouringGenerator::new(GridColouring::wide_walls(), CandidateConfiguration::wide_walls())?;
    let mut thick = generator.generate(options.dims, rng);
    if let Some(t) = options.transformation {
        thick = thick.apply_transformation(t)?;
    }
    if options.braid.is_some() || options.squash || options.box_drawing || options.east_probability.is_some() {
        tracing::warn!("--braid, --squash, --box and --east apply only to ordinary mazes");
        eprintln!("Ignoring --braid, --squash, --box and --east for a thick maze.");
    }
    print_thick(&thick);
    Ok(())
}

fn print(options: &Options, maze: &Maze) {
    if options.box_drawing {
        print!("{}", render::render_to_string(maze));
    } else if let Err(e) = render::print_maze(&mut std::io::stdout(), maze) {
        eprintln!("Failed to print the maze: {}", e);
    }
}

fn print_thick(thick: &ThickMaze) {
    if let Err(e) = render::print_thick_maze(&mut std::io::stdout(), thick) {
        eprintln!("Failed to print the maze: {}", e);
    }
}

fn print_squash_stats(maze: &Maze) {
    let squashed = SquashedMaze::new(maze);
    let self_loops = squashed.edges().iter().filter(|e| e.is_self_loop()).count();
    let longest = squashed.edges().iter().map(|e| e.weight).max().unwrap_or(0);
    println!("Nodes: {}", squashed.nodes().len());
    println!("Edges: {} ({} self-loops)", squashed.edges().len(), self_loops);
    println!("Total corridor length: {}", squashed.total_weight());
    println!("Longest corridor: {}", longest);
    println!("Dead ends: {}", maze.dead_ends().len());
}

fn main() -> std::io::Result<()> {
    let _guard = init_logging();

    let mut args = std::env::args();
    args.next(); // Skip executable name
    let options = match parse_options(args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("{}\n\n{}", e, USAGE);
            return Ok(());
        }
    };
    tracing::debug!("Parsed options: {:?}", options);

    let mut rng = get_rng(options.seed);
    let result = match generator_for(&options) {
        Some(generator) => run_maze(&options, generator, &mut rng),
        None if options.algorithm == "wide-walls" => run_wide_walls(&options, &mut rng),
        None => {
            eprintln!("Unknown algorithm: {}\n\n{}", options.algorithm, USAGE);
            return Ok(());
        }
    };
    if let Err(e) = result {
        tracing::error!("Failed: {}", e);
        eprintln!("Error: {}", e);
    }
    Ok(())
}
