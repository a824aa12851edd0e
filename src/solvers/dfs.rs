use std::collections::{HashMap, HashSet};

use super::reconstruct_path;
use crate::maze::{Coord, Maze};

/// Depth-first search from `entrance` with an explicit stack.
///
/// On a perfect maze the result is the same unique path BFS finds; on a maze with
/// loops it is some simple path, not necessarily the shortest.
pub fn solve_dfs(maze: &Maze, entrance: Coord, exit: Coord) -> Option<Vec<Coord>> {
    let mut predecessors = HashMap::new();
    let mut visited = HashSet::from([entrance]);
    let mut stack = vec![entrance];

    while let Some(current) = stack.pop() {
        if current == exit {
            return Some(reconstruct_path(&predecessors, entrance, exit));
        }

        for neighbor in maze.open_neighbors(current) {
            if visited.insert(neighbor) {
                predecessors.insert(neighbor, current);
                stack.push(neighbor);
            }
        }
    }

    None
}
