use std::time::Instant;

use mazeworks::{Dimensions, Generator, SquashedMaze, Transformation, get_rng};

const SIDE: usize = 255;

fn main() -> std::io::Result<()> {
    let mut args = std::env::args();
    args.next(); // Skip executable name
    let num_iters = args.next().and_then(|s| s.parse::<usize>().ok()).unwrap_or(1);

    let Ok(dims) = Dimensions::new(SIDE, SIDE) else {
        return Ok(());
    };
    let mut rng = get_rng(Some(0));
    for generator in Generator::ALL {
        let started = Instant::now();
        for _ in 0..num_iters {
            let maze = match generator.generate(dims, &mut rng) {
                Ok(maze) => maze,
                Err(e) => {
                    eprintln!("{}: {}", generator, e);
                    break;
                }
            };
            std::hint::black_box(SquashedMaze::new(&maze));
            std::hint::black_box(maze.apply_transformation(Transformation::Rotate90)).ok();
        }
        println!(
            "{}: {:?} per iteration over {} iterations",
            generator,
            started.elapsed() / num_iters.max(1) as u32,
            num_iters
        );
    }
    Ok(())
}
