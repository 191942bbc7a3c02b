//! Core data structures for the Gridlock Sudoku engine.
//!
//! This crate provides the fundamental types the solver, generator, and
//! game crates operate on:
//!
//! - [`Digit`]: type-safe Sudoku digits 1-9
//! - [`DigitSet`]: a 9-bit set of digits, used for both candidate masks
//!   and row/column/box occupancy masks
//! - [`Position`]: a board coordinate, valid by construction
//! - [`Cell`]: the state of one board cell (empty, given clue, or
//!   player-filled)
//! - [`Grid`]: the 9x9 board together with its constraint state
//!
//! Every [`Grid`] owns a [`Constraints`] instance that tracks which
//! digits occupy each row, column, and box. The constraint state is
//! updated on every mutation and never recomputed from scratch, so
//! candidate queries are always current.
//!
//! # Examples
//!
//! ```
//! use gridlock_core::{Digit, Grid, Position};
//!
//! let mut grid = Grid::new();
//! grid.set(Position::new(4, 4), Some(Digit::D5))?;
//!
//! // 5 is no longer a candidate anywhere in row 4, column 4, or the
//! // center box.
//! let candidates = grid.candidates_at(Position::new(4, 0));
//! assert!(!candidates.contains(Digit::D5));
//! # Ok::<(), gridlock_core::GridError>(())
//! ```

pub use self::{
    cell::Cell,
    constraint::Constraints,
    digit::Digit,
    digit_set::DigitSet,
    error::{GridError, ParseGridError},
    grid::Grid,
    position::Position,
};

mod cell;
mod constraint;
mod digit;
mod digit_set;
mod error;
mod grid;
mod position;
