//! Backtracking search for the Gridlock Sudoku engine.
//!
//! The solver runs a minimum-remaining-values (MRV) backtracking search
//! over a [`Grid`](gridlock_core::Grid), using the grid's occupancy
//! masks for forward checking: at each step it expands the empty cell
//! with the fewest candidates, which keeps the branching factor small
//! enough that ordinary puzzles resolve within a few thousand
//! assignments.
//!
//! Three public operations cover the engine's needs:
//!
//! - [`Backtracker::solve`]: find a completion or report that none
//!   exists
//! - [`Backtracker::count_solutions`]: count completions up to a cap
//!   (the uniqueness check used by puzzle generation)
//! - [`Backtracker::first_assignment`]: the first placement the search
//!   commits to, used as a last-resort hint
//!
//! Long searches can be bounded with a [`Deadline`]; an expired search
//! returns [`SolveError::Cancelled`] rather than a partial result.

pub use self::{
    backtrack::Backtracker,
    deadline::Deadline,
    error::SolveError,
};

mod backtrack;
mod deadline;
mod error;
