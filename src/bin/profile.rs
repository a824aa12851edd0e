use std::time::Instant;

use dfsmaze::{BacktrackPolicy, Solver, generators::generate_maze, solvers::solve_maze};

const DEFAULT_SIZE: usize = 1000;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let mut args = std::env::args();
    args.next(); // Skip executable name
    let num_iters = args
        .next()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(1);
    let size = args
        .next()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(DEFAULT_SIZE);

    for iteration in 0..num_iters {
        let started = Instant::now();
        let maze = generate_maze(
            size,
            size,
            Some(iteration as u64),
            None,
            BacktrackPolicy::Newest,
        )?;
        let generated = started.elapsed();

        let started = Instant::now();
        let path = solve_maze(&maze, (0, 0), (size - 1, size - 1), Solver::Bfs)?;
        let solved = started.elapsed();

        tracing::info!(
            "[profile] iteration {}: {}x{} generated in {:?}, {}-cell path solved in {:?}",
            iteration,
            size,
            size,
            generated,
            path.len(),
            solved
        );
    }
    Ok(())
}
