//! The game session: one live grid plus its move history.

use gridlock_core::{Cell, Digit, DigitSet, Grid, Position};
use gridlock_generator::{Difficulty, GeneratedPuzzle};
use gridlock_solver::{Backtracker, SolveError};

use crate::{
    GameError, Hint, HintError, HintKind,
    history::{Move, MoveHistory},
};

/// A Sudoku game session.
///
/// Owns one live [`Grid`] exclusively and mediates every mutation so the
/// move history stays in lockstep with the board: a recorded move is an
/// edit that actually changed a cell, and replaying the past stack
/// against the givens-only baseline reproduces the current grid exactly.
///
/// Commands that take raw coordinates validate them here;
/// [`GameError::InvalidPosition`] is never clamped or ignored.
///
/// # Examples
///
/// ```
/// use gridlock_game::Session;
/// use gridlock_generator::{Difficulty, PuzzleGenerator};
///
/// let puzzle = PuzzleGenerator::from_seed(1).generate(Difficulty::Easy);
/// let mut session = Session::new(&puzzle);
///
/// assert_eq!(session.difficulty(), Some(Difficulty::Easy));
/// assert!(!session.check_solution());
///
/// session.auto_solve().unwrap();
/// assert!(session.check_solution());
/// ```
#[derive(Debug, Clone)]
pub struct Session {
    grid: Grid,
    difficulty: Option<Difficulty>,
    history: MoveHistory,
}

impl Session {
    /// Starts a session on a generated puzzle.
    #[must_use]
    pub fn new(puzzle: &GeneratedPuzzle) -> Self {
        Self {
            grid: puzzle.problem.clone(),
            difficulty: Some(puzzle.difficulty),
            history: MoveHistory::new(),
        }
    }

    /// Starts a session on an imported grid (for example one parsed from
    /// its 81-character form). The difficulty label is derived from the
    /// given-cell count where it falls into a configured band.
    #[must_use]
    pub fn from_grid(grid: Grid) -> Self {
        let difficulty = Difficulty::classify(grid.filled_cell_count());
        Self {
            grid,
            difficulty,
            history: MoveHistory::new(),
        }
    }

    /// Replaces the board with a new puzzle and clears the history.
    pub fn new_game(&mut self, puzzle: &GeneratedPuzzle) {
        self.grid = puzzle.problem.clone();
        self.difficulty = Some(puzzle.difficulty);
        self.history.clear();
    }

    /// Returns the live grid.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Returns the session's difficulty label, if one is known.
    #[must_use]
    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    /// Returns the cell at `pos`.
    #[must_use]
    pub fn cell(&self, pos: Position) -> Cell {
        self.grid.cell(pos)
    }

    /// Returns the candidate mask of the cell at `pos`, for pencil-mark
    /// rendering.
    #[must_use]
    pub fn candidates_at(&self, pos: Position) -> DigitSet {
        self.grid.candidates_at(pos)
    }

    /// Returns `true` if every cell is filled.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.grid.is_complete()
    }

    /// Returns `true` if no row, column, or box holds a duplicate.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.grid.is_consistent()
    }

    /// Returns the number of cells still to fill.
    #[must_use]
    pub fn empty_cell_count(&self) -> usize {
        self.grid.empty_cell_count()
    }

    /// Returns `true` if the board is a valid complete solution.
    ///
    /// Any consistent completion counts, not only the generator's
    /// recorded solution; a puzzle imported with multiple solutions is
    /// still checkable.
    #[must_use]
    pub fn check_solution(&self) -> bool {
        self.grid.is_complete() && self.grid.is_consistent()
    }

    /// Places `digit` at column `x`, row `y`, recording the move.
    ///
    /// # Errors
    ///
    /// - [`GameError::InvalidPosition`] if either coordinate is out of
    ///   the 0-8 range
    /// - [`GameError::GivenCellLocked`] if the cell is a fixed clue
    ///
    /// The grid, occupancy masks, and history are unchanged on error.
    pub fn set_cell(&mut self, x: u8, y: u8, digit: Digit) -> Result<(), GameError> {
        let pos = Self::position(x, y)?;
        self.apply_at(pos, Some(digit))
    }

    /// Clears the cell at column `x`, row `y`, recording the move.
    ///
    /// Clearing an already-empty cell succeeds without recording
    /// anything.
    ///
    /// # Errors
    ///
    /// Same as [`set_cell`](Self::set_cell).
    pub fn clear_cell(&mut self, x: u8, y: u8) -> Result<(), GameError> {
        let pos = Self::position(x, y)?;
        self.apply_at(pos, None)
    }

    /// Returns `true` if there is a move to undo.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Returns `true` if there is an undone move to redo.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Reverts the most recent move and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NothingToUndo`] if the past stack is empty.
    pub fn undo(&mut self) -> Result<Move, GameError> {
        let Some(m) = self.history.undo() else {
            return Err(GameError::NothingToUndo);
        };
        match self.grid.set(m.position, m.previous) {
            Ok(()) => Ok(m),
            Err(_) => unreachable!("history never records moves on given cells"),
        }
    }

    /// Re-applies the most recently undone move and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NothingToRedo`] if the future stack is
    /// empty.
    pub fn redo(&mut self) -> Result<Move, GameError> {
        let Some(m) = self.history.redo() else {
            return Err(GameError::NothingToRedo);
        };
        match self.grid.set(m.position, m.next) {
            Ok(()) => Ok(m),
            Err(_) => unreachable!("history never records moves on given cells"),
        }
    }

    /// Returns the applied moves, oldest first.
    #[must_use]
    pub fn past_moves(&self) -> &[Move] {
        self.history.past()
    }

    /// Returns the undone moves available to redo.
    #[must_use]
    pub fn future_moves(&self) -> &[Move] {
        self.history.future()
    }

    /// Computes a hint for the current board.
    ///
    /// The first naked single in row-major order is preferred: an empty
    /// cell whose candidate mask holds exactly one digit, a deduction
    /// the player could have made. When none exists the solver's first
    /// committed placement is returned instead, marked
    /// [`HintKind::Guess`] because it may not follow from single-cell
    /// logic.
    ///
    /// This is a pure query: asking twice without an intervening edit
    /// returns the same hint.
    ///
    /// # Errors
    ///
    /// - [`HintError::Inconsistent`] if a duplicate must be fixed first
    /// - [`HintError::Complete`] if there is nothing left to fill
    /// - [`HintError::Unsolvable`] if the current entries admit no
    ///   completion
    pub fn request_hint(&self) -> Result<Hint, HintError> {
        if !self.grid.is_consistent() {
            return Err(HintError::Inconsistent);
        }
        if self.grid.is_complete() {
            return Err(HintError::Complete);
        }
        if let Some((position, digit)) = self.grid.naked_singles().next() {
            return Ok(Hint {
                position,
                digit,
                kind: HintKind::NakedSingle,
            });
        }
        match Backtracker::new().first_assignment(&self.grid) {
            Ok(Some((position, digit))) => Ok(Hint {
                position,
                digit,
                kind: HintKind::Guess,
            }),
            Ok(None) => unreachable!("grid has empty cells"),
            Err(SolveError::Unsolvable) => Err(HintError::Unsolvable),
            Err(SolveError::Invalid) => unreachable!("consistency was checked"),
            Err(SolveError::Cancelled) => unreachable!("no deadline was set"),
        }
    }

    /// Solves the board from its current state, recording each placement
    /// as an ordinary move (so the fill can be undone step by step).
    ///
    /// # Errors
    ///
    /// - [`SolveError::Invalid`] if the board holds a duplicate
    /// - [`SolveError::Unsolvable`] if the current entries admit no
    ///   completion
    ///
    /// The board and history are unchanged on error.
    pub fn auto_solve(&mut self) -> Result<(), SolveError> {
        let solution = Backtracker::new().solve(&self.grid)?;
        for pos in Position::ALL {
            if self.grid.cell(pos).is_empty() {
                let Some(digit) = solution.digit_at(pos) else {
                    unreachable!("solved grid has no empty cells");
                };
                match self.apply_at(pos, Some(digit)) {
                    Ok(()) => {}
                    Err(_) => unreachable!("solver only fills empty cells"),
                }
            }
        }
        Ok(())
    }

    fn position(x: u8, y: u8) -> Result<Position, GameError> {
        Position::try_new(x, y).ok_or(GameError::InvalidPosition { x, y })
    }

    /// Applies an edit and records it if it changed the cell.
    fn apply_at(&mut self, pos: Position, next: Option<Digit>) -> Result<(), GameError> {
        let previous = self.grid.digit_at(pos);
        self.grid.set(pos, next)?;
        if previous != next {
            self.history.record(pos, previous, next);
        }
        Ok(())
    }
}
