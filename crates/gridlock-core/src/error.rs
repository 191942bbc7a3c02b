//! Error types for grid operations.

use derive_more::{Display, Error};

/// Error returned by mutating operations on a [`Grid`](crate::Grid).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum GridError {
    /// The target cell is a fixed clue and the requested value differs
    /// from it.
    #[display("cannot modify a given cell")]
    GivenCellLocked,
}

/// Error returned when parsing a grid from its 81-character string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum ParseGridError {
    /// The input was not exactly 81 characters long.
    #[display("expected 81 characters, got {len}")]
    BadLength {
        /// The actual input length.
        len: usize,
    },
    /// The input contained a character other than `1`-`9`, `0`, or `.`.
    #[display("invalid character {character:?} at index {index}")]
    InvalidCharacter {
        /// The offending character.
        character: char,
        /// Its index in the input.
        index: usize,
    },
}
