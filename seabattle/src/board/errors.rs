//! Errors used by the [`Board`][crate::board::Board].

use thiserror::Error;

/// Reason why a ship could not be placed on the requested cells.
///
/// The grid is never mutated when one of these is returned; the caller is
/// expected to re-prompt for the same ship.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum CannotPlaceReason {
    /// One or both endpoints are off the grid.
    #[error("the requested cells are off the grid")]
    OutOfBounds,
    /// The endpoints do not describe a straight horizontal or vertical run.
    #[error("the ship must lie in a straight horizontal or vertical line")]
    Misaligned,
    /// The run between the endpoints does not match the ship's length.
    #[error("the ship is {expected} cells long but {actual} cells were requested")]
    WrongLength {
        /// Length of the ship class being placed.
        expected: usize,
        /// Length of the requested run.
        actual: usize,
    },
    /// Another ship occupies or borders the requested cells. Ships must keep
    /// at least one cell of open water between them, diagonals included.
    #[error("the requested cells touch another ship")]
    TooClose,
}

/// Reason why a shot could not be resolved. The grid is never mutated when
/// this is returned and the shot does not consume a turn.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum CannotShootReason {
    /// The target cell is off the grid.
    #[error("the target cell is off the grid")]
    OutOfBounds,
}
