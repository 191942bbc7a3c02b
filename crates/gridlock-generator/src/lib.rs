//! Puzzle generation for the Gridlock Sudoku engine.
//!
//! Generation runs in two phases. A full solution grid is produced by
//! running the backtracking solver over an empty grid with candidates
//! tried in shuffled order, which yields a uniformly varied solved grid
//! instead of the search's canonical one. Cells are then carved out one
//! at a time in random order, re-verifying after each removal that the
//! puzzle still has exactly one completion; a removal that breaks
//! uniqueness is restored and that cell is left in place for the rest of
//! the attempt.
//!
//! Carving stops inside the given-cell band configured for the requested
//! [`Difficulty`]. All randomness flows from a single [`Pcg64Mcg`]
//! stream seeded by a `u64` that is carried on every
//! [`GeneratedPuzzle`], so any puzzle can be regenerated exactly.
//!
//! [`Pcg64Mcg`]: rand_pcg::Pcg64Mcg
//!
//! # Examples
//!
//! ```
//! use gridlock_generator::{Difficulty, PuzzleGenerator};
//!
//! let mut generator = PuzzleGenerator::from_seed(42);
//! let puzzle = generator.generate(Difficulty::Medium);
//!
//! assert!(Difficulty::Medium
//!     .givens_band()
//!     .contains(puzzle.problem.filled_cell_count()));
//! ```

pub use self::{
    difficulty::{Difficulty, GivensBand},
    generator::{GenerateError, GeneratedPuzzle, PuzzleGenerator},
};

mod difficulty;
mod generator;
