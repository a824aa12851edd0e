//! Perfect maze generation and solving.
//!
//! A maze is carved into a spanning tree of its grid by randomized depth-first
//! search, so exactly one simple path joins any two cells. [`generate`] and
//! [`solve`] cover the common case; the modules expose the pieces for callers that
//! need a custom start cell, backtracking policy, random source or solver.

pub mod error;
pub mod generators;
pub mod maze;
pub mod renderer;
pub mod solvers;

pub use error::MazeError;
pub use generators::BacktrackPolicy;
pub use maze::{Cell, Coord, Direction, Maze};
pub use solvers::Solver;

/// Produces a fully carved `height` x `width` maze.
///
/// The same `seed` always yields the same maze; without one the maze is seeded from the
/// operating system. Carving starts at `start`, or `(0, 0)` if absent.
pub fn generate(
    height: usize,
    width: usize,
    seed: Option<u64>,
    start: Option<Coord>,
) -> Result<Maze, MazeError> {
    generators::generate_maze(height, width, seed, start, BacktrackPolicy::default())
}

/// Returns the unique path between `entrance` and `exit`, both endpoints included.
pub fn solve(maze: &Maze, entrance: Coord, exit: Coord) -> Result<Vec<Coord>, MazeError> {
    solvers::solve_maze(maze, entrance, exit, Solver::default())
}
