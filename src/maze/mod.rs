pub mod cell;
mod grid;
pub(crate) mod union_find;

pub use cell::{Cell, Direction};
pub use grid::Grid;
use union_find::UnionFind;

use crate::error::MazeError;

/// A cell coordinate as `(row, col)`, both 0-indexed.
pub type Coord = (usize, usize);

/// Rectangular grid of walled cells.
///
/// Every wall is stored on both sides of its boundary; `open_passage` keeps the
/// two flags in agreement. Outer boundary walls are never opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    cells: Grid<Cell>,
}

impl Maze {
    /// Creates a `height` x `width` maze with every wall closed and every cell unvisited.
    pub fn new(height: usize, width: usize) -> Result<Self, MazeError> {
        if height == 0 || width == 0 || height.checked_mul(width).is_none() {
            return Err(MazeError::InvalidDimension { height, width });
        }
        Ok(Maze {
            cells: Grid::new(height, width, Cell::CLOSED),
        })
    }

    /// Returns the height of the maze in cells.
    pub fn height(&self) -> usize {
        self.cells.height()
    }

    /// Returns the width of the maze in cells.
    pub fn width(&self) -> usize {
        self.cells.width()
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Never true for a maze built by `Maze::new`.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Checks if the given coordinate is within the bounds of the maze.
    pub fn is_in_bounds(&self, coord: Coord) -> bool {
        self.cells.is_in_bounds(coord)
    }

    pub fn cell(&self, coord: Coord) -> Option<&Cell> {
        self.cells.get(coord)
    }

    /// Row-major dense index of `coord`, for side tables keyed by cell.
    /// `None` if `coord` is outside the maze.
    pub fn index_of(&self, coord: Coord) -> Option<usize> {
        self.is_in_bounds(coord)
            .then(|| self.cells.ravel_index(coord))
    }

    /// Iterates every coordinate in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + use<> {
        let (height, width) = (self.height(), self.width());
        (0..height).flat_map(move |row| (0..width).map(move |col| (row, col)))
    }

    pub(crate) fn check_bounds(&self, coord: Coord) -> Result<(), MazeError> {
        if self.is_in_bounds(coord) {
            Ok(())
        } else {
            Err(MazeError::InvalidCell(coord))
        }
    }

    /// Get neighbors of a cell.
    /// A neighbor is a grid-adjacent cell in one of the cardinal directions, yielded in
    /// `Direction::ALL` order. An out-of-bounds coordinate has no neighbors.
    pub fn neighbors(&self, coord: Coord) -> impl Iterator<Item = Coord> + '_ {
        let in_bounds = self.is_in_bounds(coord);
        Direction::ALL
            .into_iter()
            .filter(move |_| in_bounds)
            .filter_map(move |dir| dir.step(coord))
            .filter(move |&c| self.is_in_bounds(c))
    }

    /// Neighbors reachable from `coord` without crossing a wall.
    pub fn open_neighbors(&self, coord: Coord) -> impl Iterator<Item = Coord> + '_ {
        let cell = self.cell(coord).copied();
        Direction::ALL.into_iter().filter_map(move |dir| {
            let cell = cell?;
            if cell.has_wall(dir) {
                return None;
            }
            dir.step(coord).filter(|&c| self.is_in_bounds(c))
        })
    }

    /// Removes the wall between two grid-adjacent cells, on both sides.
    ///
    /// Returns `true` if a wall was removed, `false` if the passage was already open.
    pub fn open_passage(&mut self, a: Coord, b: Coord) -> Result<bool, MazeError> {
        self.check_bounds(a)?;
        self.check_bounds(b)?;
        let dir = Direction::between(a, b).ok_or(MazeError::NotAdjacent(a, b))?;

        let was_closed = self.cells[a].has_wall(dir);
        self.cells[a].set_wall(dir, false);
        self.cells[b].set_wall(dir.opposite(), false);
        Ok(was_closed)
    }

    /// `true` if `a` and `b` are adjacent and no wall separates them.
    pub fn is_open(&self, a: Coord, b: Coord) -> bool {
        if !self.is_in_bounds(a) || !self.is_in_bounds(b) {
            return false;
        }
        match Direction::between(a, b) {
            Some(dir) => !self.cells[a].has_wall(dir),
            None => false,
        }
    }

    /// Number of open adjacencies. Each passage is counted once.
    pub fn passage_count(&self) -> usize {
        self.coords()
            .map(|coord| {
                let cell = &self.cells[coord];
                // Only count the down and right sides so each passage is seen once
                usize::from(!cell.has_wall(Direction::Down))
                    + usize::from(!cell.has_wall(Direction::Right))
            })
            .sum()
    }

    /// Checks that the open passages form a spanning tree of the grid: no passage
    /// closes a cycle and every cell is joined to every other.
    pub fn is_perfect(&self) -> bool {
        let mut uf = UnionFind::new(self.len());
        let mut joined = 0usize;
        for coord in self.coords() {
            for dir in [Direction::Down, Direction::Right] {
                if self.cells[coord].has_wall(dir) {
                    continue;
                }
                let Some(next) = dir.step(coord).filter(|&c| self.is_in_bounds(c)) else {
                    // An open outer wall is never part of a perfect maze
                    return false;
                };
                if !uf.unite(self.cells.ravel_index(coord), self.cells.ravel_index(next)) {
                    return false;
                }
                joined += 1;
            }
        }
        joined + 1 == self.len()
    }

    /// Closes every wall and clears every visited flag.
    pub fn reset(&mut self) {
        self.cells.fill(Cell::CLOSED);
    }

    pub(crate) fn mark_visited(&mut self, coord: Coord) {
        self.cells[coord].mark_visited();
    }

    pub(crate) fn is_visited(&self, coord: Coord) -> bool {
        self.cells[coord].is_visited()
    }
}

impl std::ops::Index<Coord> for Maze {
    type Output = Cell;

    fn index(&self, index: Coord) -> &Self::Output {
        &self.cells[index]
    }
}
