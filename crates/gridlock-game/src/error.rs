//! Game session error type.

use derive_more::{Display, Error};
use gridlock_core::GridError;

/// Error returned by session commands.
///
/// All variants are recoverable: the session is unchanged when a command
/// fails, and the caller can surface the condition (or disable the
/// corresponding control) and continue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum GameError {
    /// A coordinate was outside the 0-8 range.
    #[display("position ({x}, {y}) is out of range")]
    InvalidPosition {
        /// The column that was passed.
        x: u8,
        /// The row that was passed.
        y: u8,
    },
    /// The target cell is a fixed clue.
    #[display("cannot modify a given cell")]
    GivenCellLocked,
    /// Undo was requested with an empty past stack.
    #[display("nothing to undo")]
    NothingToUndo,
    /// Redo was requested with an empty future stack.
    #[display("nothing to redo")]
    NothingToRedo,
}

impl From<GridError> for GameError {
    fn from(error: GridError) -> Self {
        match error {
            GridError::GivenCellLocked => Self::GivenCellLocked,
        }
    }
}
