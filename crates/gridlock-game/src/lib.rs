//! Game session management for the Gridlock Sudoku engine.
//!
//! A [`Session`] wraps one live [`Grid`](gridlock_core::Grid) with a
//! move-history stack and exposes the full surface a display layer
//! needs: cell edits with given-cell protection, undo/redo, hints,
//! auto-solve, and solution checking. Each session owns its grid
//! exclusively; grids are never shared between sessions.

pub use gridlock_solver::SolveError;

pub use self::{
    error::GameError,
    hint::{Hint, HintError, HintKind},
    history::Move,
    session::Session,
};

mod error;
mod hint;
mod history;
mod session;
