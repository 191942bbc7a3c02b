//! Hint types.

use derive_more::{Display, Error};
use gridlock_core::{Digit, Position};

/// How a hint was derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintKind {
    /// A pure deduction: the cell's candidate mask holds exactly one
    /// digit.
    NakedSingle,
    /// No single-cell deduction was available; the placement comes from
    /// the first committed branch of a backtracking search and may rest
    /// on a guess.
    Guess,
}

/// A suggested placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hint {
    /// The cell to fill.
    pub position: Position,
    /// The digit to place there.
    pub digit: Digit,
    /// Whether the placement is a deduction or a search result.
    pub kind: HintKind,
}

/// Reason no hint is available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum HintError {
    /// Some row, column, or box holds a duplicate; the conflicting
    /// entry must be fixed before a hint makes sense.
    #[display("grid is inconsistent")]
    Inconsistent,
    /// Every cell is already filled.
    #[display("grid is complete")]
    Complete,
    /// The current grid state has no valid completion.
    #[display("grid is unsolvable from its current state")]
    Unsolvable,
}
