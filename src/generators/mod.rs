use rand::{SeedableRng, rngs::StdRng};

mod recur_backtrack;

pub use recur_backtrack::recursive_backtrack;

use crate::error::MazeError;
use crate::maze::{Coord, Maze};

/// Get a random number generator, optionally seeded for reproducibility.
pub fn get_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

/// Which trail cell carving resumes from once the current cell is exhausted.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum BacktrackPolicy {
    /// Resume from the most recently carved cell (classic recursive backtracker).
    #[default]
    Newest,
    /// Resume from the oldest cell still on the trail.
    Oldest,
    /// Resume from the middle of the trail.
    Middle,
}

impl BacktrackPolicy {
    /// Index into a non-empty trail of length `len`.
    pub(crate) fn pick(self, len: usize) -> usize {
        match self {
            BacktrackPolicy::Newest => len - 1,
            BacktrackPolicy::Oldest => 0,
            BacktrackPolicy::Middle => len / 2,
        }
    }
}

impl std::fmt::Display for BacktrackPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BacktrackPolicy::Newest => write!(f, "newest"),
            BacktrackPolicy::Oldest => write!(f, "oldest"),
            BacktrackPolicy::Middle => write!(f, "middle"),
        }
    }
}

impl std::str::FromStr for BacktrackPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "newest" | "last" => Ok(BacktrackPolicy::Newest),
            "oldest" | "first" => Ok(BacktrackPolicy::Oldest),
            "middle" => Ok(BacktrackPolicy::Middle),
            other => Err(format!(
                "unknown backtrack policy '{other}' (expected newest, oldest or middle)"
            )),
        }
    }
}

/// Creates a `height` x `width` maze and carves it into a spanning tree.
///
/// `start` defaults to `(0, 0)`; without a `seed` the carving is not reproducible.
pub fn generate_maze(
    height: usize,
    width: usize,
    seed: Option<u64>,
    start: Option<Coord>,
    policy: BacktrackPolicy,
) -> Result<Maze, MazeError> {
    let mut maze = Maze::new(height, width)?;
    let mut rng = get_rng(seed);
    recursive_backtrack(&mut maze, start.unwrap_or((0, 0)), policy, &mut rng)?;
    Ok(maze)
}
