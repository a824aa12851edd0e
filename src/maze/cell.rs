use std::fmt;

/// One of the four sides of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Fixed iteration order used by `Maze::neighbors`.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// The side of the neighbouring cell that faces this one.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Steps `(row, col)` one cell in this direction.
    ///
    /// Returns `None` on underflow; overflow past the grid is left to the
    /// caller's bounds check.
    pub fn step(self, (row, col): (usize, usize)) -> Option<(usize, usize)> {
        match self {
            Direction::Up => row.checked_sub(1).map(|r| (r, col)),
            Direction::Down => row.checked_add(1).map(|r| (r, col)),
            Direction::Left => col.checked_sub(1).map(|c| (row, c)),
            Direction::Right => col.checked_add(1).map(|c| (row, c)),
        }
    }

    /// Direction leading from `from` to the grid-adjacent `to`, if they are adjacent.
    pub fn between(from: (usize, usize), to: (usize, usize)) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|dir| dir.step(from) == Some(to))
    }

    fn index(self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
            Direction::Left => write!(f, "left"),
            Direction::Right => write!(f, "right"),
        }
    }
}

/// A single maze cell: four wall flags plus the generation-time visited mark.
///
/// A wall flag of `true` means the wall is present and there is no passage on
/// that side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    walls: [bool; 4],
    visited: bool,
}

impl Cell {
    /// A fully walled, unvisited cell.
    pub const CLOSED: Cell = Cell {
        walls: [true; 4],
        visited: false,
    };

    pub fn has_wall(&self, dir: Direction) -> bool {
        self.walls[dir.index()]
    }

    /// Wall flags in `(up, down, left, right)` order.
    pub fn walls(&self) -> (bool, bool, bool, bool) {
        let [up, down, left, right] = self.walls;
        (up, down, left, right)
    }

    pub fn is_visited(&self) -> bool {
        self.visited
    }

    /// Number of open sides.
    pub fn openings(&self) -> usize {
        self.walls.iter().filter(|&&wall| !wall).count()
    }

    pub(crate) fn set_wall(&mut self, dir: Direction, present: bool) {
        self.walls[dir.index()] = present;
    }

    pub(crate) fn mark_visited(&mut self) {
        self.visited = true;
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::CLOSED
    }
}
