use std::collections::HashMap;

mod bfs;
mod dfs;

use crate::error::MazeError;
use crate::maze::{Coord, Maze};
use bfs::solve_bfs;
use dfs::solve_dfs;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Solver {
    #[default]
    Bfs,
    Dfs,
}

impl std::fmt::Display for Solver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Solver::Bfs => write!(f, "Breadth-First Search (BFS)"),
            Solver::Dfs => write!(f, "Depth-First Search (DFS)"),
        }
    }
}

impl std::str::FromStr for Solver {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bfs" => Ok(Solver::Bfs),
            "dfs" => Ok(Solver::Dfs),
            other => Err(format!("unknown solver '{other}' (expected bfs or dfs)")),
        }
    }
}

/// Finds the path from `entrance` to `exit` through open passages only.
///
/// The returned path includes both endpoints; it is a single cell when they coincide.
/// The maze is only read, so any number of solves may share it.
pub fn solve_maze(
    maze: &Maze,
    entrance: Coord,
    exit: Coord,
    solver: Solver,
) -> Result<Vec<Coord>, MazeError> {
    maze.check_bounds(entrance)?;
    maze.check_bounds(exit)?;

    if entrance == exit {
        return Ok(vec![entrance]);
    }

    let path = match solver {
        Solver::Bfs => solve_bfs(maze, entrance, exit),
        Solver::Dfs => solve_dfs(maze, entrance, exit),
    };

    match path {
        Some(path) => {
            tracing::debug!(
                "[solve] {} found a {}-cell path from {:?} to {:?}",
                solver,
                path.len(),
                entrance,
                exit
            );
            Ok(path)
        }
        None => {
            tracing::warn!("[solve] {:?} and {:?} are not connected", entrance, exit);
            Err(MazeError::NoPathFound { entrance, exit })
        }
    }
}

/// Walks the predecessor map back from `exit` and returns the path in entrance-to-exit order.
fn reconstruct_path(
    predecessors: &HashMap<Coord, Coord>,
    entrance: Coord,
    exit: Coord,
) -> Vec<Coord> {
    let mut path = vec![exit];
    let mut current = exit;
    while current != entrance {
        match predecessors.get(&current) {
            Some(&parent) => {
                path.push(parent);
                current = parent;
            }
            None => break,
        }
    }
    path.reverse();
    path
}
