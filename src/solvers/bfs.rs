use std::collections::{HashMap, HashSet, VecDeque};

use super::reconstruct_path;
use crate::maze::{Coord, Maze};

/// Breadth-first search from `entrance`, stopping as soon as `exit` is dequeued.
///
/// Cells are discovered in order of distance, so the path is a shortest one even on
/// a maze that is not a tree.
pub fn solve_bfs(maze: &Maze, entrance: Coord, exit: Coord) -> Option<Vec<Coord>> {
    let mut predecessors = HashMap::new();
    let mut visited = HashSet::from([entrance]);
    let mut queue = VecDeque::from([entrance]);

    while let Some(current) = queue.pop_front() {
        if current == exit {
            return Some(reconstruct_path(&predecessors, entrance, exit));
        }

        for neighbor in maze.open_neighbors(current) {
            if visited.insert(neighbor) {
                predecessors.insert(neighbor, current);
                queue.push_back(neighbor);
            }
        }
    }

    None
}
