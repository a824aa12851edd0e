use thiserror::Error;

use crate::maze::Coord;

/// Errors raised by maze construction, carving and solving.
///
/// All of them are raised synchronously at the offending call and are never
/// retryable: they signal a violated precondition, not a transient condition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MazeError {
    #[error("invalid maze dimensions {height}x{width}: both must be positive")]
    InvalidDimension { height: usize, width: usize },
    #[error("cell {0:?} is outside the maze bounds")]
    InvalidCell(Coord),
    #[error("cells {0:?} and {1:?} are not adjacent")]
    NotAdjacent(Coord, Coord),
    #[error("no path from {entrance:?} to {exit:?}")]
    NoPathFound { entrance: Coord, exit: Coord },
}
