use rand::Rng;

use crate::{
    error::MazeError,
    generators::BacktrackPolicy,
    maze::{Coord, Maze},
};

/// Cells carved so far, in carving order, with exhausted cells tombstoned in place.
///
/// Every cell is pushed at most once, so slots are bounded by the cell count. A
/// Fenwick tree over the live flags finds the k-th live slot and drops a slot in
/// O(log n), whichever end of the trail the backtrack policy reads from.
struct Trail {
    cells: Vec<Coord>,
    /// 1-indexed Fenwick tree counting live slots.
    tree: Vec<usize>,
    live: usize,
}

impl Trail {
    fn with_capacity(capacity: usize) -> Self {
        Trail {
            cells: Vec::with_capacity(capacity),
            tree: vec![0; capacity + 1],
            live: 0,
        }
    }

    fn is_empty(&self) -> bool {
        self.live == 0
    }

    fn len(&self) -> usize {
        self.live
    }

    fn capacity(&self) -> usize {
        self.tree.len() - 1
    }

    /// Appends `cell` and returns its slot.
    fn push(&mut self, cell: Coord) -> usize {
        let slot = self.cells.len();
        assert!(slot < self.capacity(), "trail holds each cell at most once");
        self.cells.push(cell);
        let mut i = slot + 1;
        while i < self.tree.len() {
            self.tree[i] += 1;
            i += i & i.wrapping_neg();
        }
        self.live += 1;
        slot
    }

    /// Tombstones a live slot.
    fn remove(&mut self, slot: usize) {
        let mut i = slot + 1;
        while i < self.tree.len() {
            self.tree[i] -= 1;
            i += i & i.wrapping_neg();
        }
        self.live -= 1;
    }

    /// Slot of the `k`-th live cell, counting from the oldest. Requires `k < len()`.
    fn nth_live(&self, k: usize) -> usize {
        let mut pos = 0;
        let mut remaining = k + 1;
        let mut step = self.capacity().checked_next_power_of_two().unwrap_or(0);
        while step > 0 {
            let next = pos + step;
            if next <= self.capacity() && self.tree[next] < remaining {
                pos = next;
                remaining -= self.tree[next];
            }
            step >>= 1;
        }
        pos
    }

    fn get(&self, slot: usize) -> Coord {
        self.cells[slot]
    }
}

/// Carves `maze` into a spanning tree by randomized depth-first search from `start`.
///
/// The maze is reset first, so any earlier carving is discarded. The search keeps an
/// explicit trail instead of recursing: the cursor cell extends the corridor into a
/// random unvisited neighbor, and an exhausted cell is dropped from the trail, after
/// which `policy` picks the trail cell to resume from. With
/// [`BacktrackPolicy::Newest`] the trail behaves as a plain stack.
pub fn recursive_backtrack<R: Rng>(
    maze: &mut Maze,
    start: Coord,
    policy: BacktrackPolicy,
    rng: &mut R,
) -> Result<(), MazeError> {
    maze.check_bounds(start)?;
    maze.reset();

    maze.mark_visited(start);
    let mut trail = Trail::with_capacity(maze.len());
    let mut cursor = trail.push(start);
    let mut carved = 0usize;
    let mut backtracks = 0usize;

    while !trail.is_empty() {
        let cell = trail.get(cursor);
        let unvisited = maze
            .neighbors(cell)
            .filter(|&c| !maze.is_visited(c))
            .collect::<Vec<_>>();

        if unvisited.is_empty() {
            // This cell's subtree is exhausted
            trail.remove(cursor);
            backtracks += 1;
            if !trail.is_empty() {
                cursor = trail.nth_live(policy.pick(trail.len()));
            }
            continue;
        }

        let neighbor = unvisited[rng.random_range(0..unvisited.len())];
        maze.open_passage(cell, neighbor)?;
        maze.mark_visited(neighbor);
        tracing::trace!("[generate] carved {:?} -> {:?}", cell, neighbor);
        carved += 1;

        cursor = trail.push(neighbor);
    }

    debug_assert_eq!(
        carved + 1,
        maze.len(),
        "every cell must be reached from the start cell"
    );
    tracing::debug!(
        "[generate] carved {}x{} maze from {:?} ({} policy): {} passages, {} backtracks",
        maze.height(),
        maze.width(),
        start,
        policy,
        carved,
        backtracks
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::get_rng;
    use crate::maze::union_find::UnionFind;
    use std::collections::VecDeque;

    const POLICIES: [BacktrackPolicy; 3] = [
        BacktrackPolicy::Newest,
        BacktrackPolicy::Oldest,
        BacktrackPolicy::Middle,
    ];

    fn carve(height: usize, width: usize, seed: u64, policy: BacktrackPolicy) -> Maze {
        let mut maze = Maze::new(height, width).unwrap();
        recursive_backtrack(&mut maze, (0, 0), policy, &mut get_rng(Some(seed))).unwrap();
        maze
    }

    /// Unions every open passage, failing on the first one that would close a cycle.
    fn assert_spanning_tree(maze: &Maze) {
        let mut uf = UnionFind::new(maze.len());
        let mut passages = 0;
        for coord in maze.coords() {
            for next in maze.open_neighbors(coord) {
                // Visit each passage from its upper-left end only
                if next < coord {
                    continue;
                }
                assert!(
                    uf.unite(maze.index_of(coord).unwrap(), maze.index_of(next).unwrap()),
                    "passage {coord:?} - {next:?} closes a cycle"
                );
                passages += 1;
            }
        }
        assert_eq!(passages, maze.len() - 1);
        assert_eq!(maze.passage_count(), passages);
    }

    fn reachable_from(maze: &Maze, start: Coord) -> usize {
        let mut seen = vec![false; maze.len()];
        seen[maze.index_of(start).unwrap()] = true;
        let mut queue = VecDeque::from([start]);
        let mut count = 1;
        while let Some(cell) = queue.pop_front() {
            for next in maze.open_neighbors(cell) {
                let idx = maze.index_of(next).unwrap();
                if !seen[idx] {
                    seen[idx] = true;
                    count += 1;
                    queue.push_back(next);
                }
            }
        }
        count
    }

    #[test]
    fn test_spanning_tree_invariant() {
        for policy in POLICIES {
            for seed in 0..20 {
                for (h, w) in [(1, 7), (7, 1), (2, 2), (5, 8), (13, 13)] {
                    let maze = carve(h, w, seed, policy);
                    assert_spanning_tree(&maze);
                    assert!(maze.is_perfect());
                }
            }
        }
    }

    #[test]
    fn test_full_coverage() {
        for policy in POLICIES {
            let maze = carve(17, 11, 3, policy);
            assert!(maze.coords().all(|c| maze[c].is_visited()));
            assert_eq!(reachable_from(&maze, (0, 0)), maze.len());
            assert_eq!(reachable_from(&maze, (16, 10)), maze.len());
        }
    }

    #[test]
    fn test_walls_are_consistent() {
        use crate::maze::Direction;
        let maze = carve(9, 9, 11, BacktrackPolicy::Newest);
        for coord in maze.coords() {
            for dir in Direction::ALL {
                match dir.step(coord).filter(|&c| maze.is_in_bounds(c)) {
                    Some(next) => assert_eq!(
                        maze[coord].has_wall(dir),
                        maze[next].has_wall(dir.opposite())
                    ),
                    // Outer boundary stays closed
                    None => assert!(maze[coord].has_wall(dir)),
                }
            }
        }
    }

    #[test]
    fn test_single_cell() {
        let maze = carve(1, 1, 0, BacktrackPolicy::Newest);
        assert_eq!(maze.passage_count(), 0);
        assert!(maze[(0, 0)].is_visited());
    }

    #[test]
    fn test_same_seed_same_maze() {
        for policy in POLICIES {
            assert_eq!(carve(20, 30, 99, policy), carve(20, 30, 99, policy));
        }
    }

    #[test]
    fn test_seeds_vary_the_maze() {
        let first = carve(10, 10, 0, BacktrackPolicy::Newest);
        assert!((1..10).any(|seed| carve(10, 10, seed, BacktrackPolicy::Newest) != first));
    }

    #[test]
    fn test_custom_start_and_invalid_start() {
        let mut maze = Maze::new(6, 4).unwrap();
        let mut rng = get_rng(Some(5));
        recursive_backtrack(&mut maze, (5, 3), BacktrackPolicy::Newest, &mut rng).unwrap();
        assert!(maze.is_perfect());

        let mut maze = Maze::new(6, 4).unwrap();
        assert_eq!(
            recursive_backtrack(&mut maze, (6, 0), BacktrackPolicy::Newest, &mut rng),
            Err(MazeError::InvalidCell((6, 0)))
        );
        // A rejected start leaves the maze untouched
        assert_eq!(maze, Maze::new(6, 4).unwrap());
    }

    #[test]
    fn test_recarving_discards_previous_passages() {
        let mut maze = Maze::new(8, 8).unwrap();
        for row in 0..8 {
            for col in 0..7 {
                maze.open_passage((row, col), (row, col + 1)).unwrap();
            }
        }
        recursive_backtrack(&mut maze, (0, 0), BacktrackPolicy::Newest, &mut get_rng(Some(1)))
            .unwrap();
        assert!(maze.is_perfect());
        assert_eq!(maze, carve(8, 8, 1, BacktrackPolicy::Newest));
    }

    #[test]
    fn test_trail_tracks_live_cells_in_order() {
        let mut trail = Trail::with_capacity(6);
        for col in 0..5 {
            assert_eq!(trail.push((0, col)), col);
        }
        trail.remove(0);
        trail.remove(2);
        // Live slots are now 1, 3, 4
        assert_eq!(trail.len(), 3);
        assert_eq!(trail.nth_live(0), 1);
        assert_eq!(trail.nth_live(1), 3);
        assert_eq!(trail.nth_live(2), 4);
        assert_eq!(trail.get(trail.nth_live(BacktrackPolicy::Middle.pick(3))), (0, 3));
        assert_eq!(trail.push((1, 0)), 5);
        assert_eq!(trail.nth_live(3), 5);
        for slot in [1, 3, 4, 5] {
            trail.remove(slot);
        }
        assert!(trail.is_empty());
    }

    #[test]
    fn test_policies_match_plain_trail_removal() {
        // Reference carving with a Vec trail and in-place removal
        fn carve_reference(
            height: usize,
            width: usize,
            seed: u64,
            policy: BacktrackPolicy,
        ) -> Maze {
            let mut maze = Maze::new(height, width).unwrap();
            let mut rng = get_rng(Some(seed));
            maze.mark_visited((0, 0));
            let mut trail = vec![(0, 0)];
            let mut cursor = 0;
            while !trail.is_empty() {
                let cell = trail[cursor];
                let unvisited = maze
                    .neighbors(cell)
                    .filter(|&c| !maze.is_visited(c))
                    .collect::<Vec<_>>();
                if unvisited.is_empty() {
                    trail.remove(cursor);
                    if !trail.is_empty() {
                        cursor = policy.pick(trail.len());
                    }
                    continue;
                }
                let neighbor = unvisited[rng.random_range(0..unvisited.len())];
                maze.open_passage(cell, neighbor).unwrap();
                maze.mark_visited(neighbor);
                trail.push(neighbor);
                cursor = trail.len() - 1;
            }
            maze
        }

        for policy in POLICIES {
            for seed in 0..5 {
                assert_eq!(carve(11, 7, seed, policy), carve_reference(11, 7, seed, policy));
            }
        }
    }

    #[test]
    fn test_large_grid_under_every_policy() {
        // A long corridor keeps the whole trail alive, so each backtrack must not
        // shift the remaining cells
        for policy in [BacktrackPolicy::Oldest, BacktrackPolicy::Middle] {
            let maze = carve(1, 200_000, 0, policy);
            assert_eq!(maze.passage_count(), 199_999);
            let maze = carve(400, 400, 1, policy);
            assert!(maze.is_perfect());
        }
    }

    #[test]
    fn test_large_grid_does_not_recurse() {
        // A 1xN corridor is the deepest possible trail
        let maze = carve(1, 200_000, 0, BacktrackPolicy::Newest);
        assert_eq!(maze.passage_count(), 199_999);
        let maze = carve(300, 300, 0, BacktrackPolicy::Newest);
        assert!(maze.is_perfect());
    }
}
