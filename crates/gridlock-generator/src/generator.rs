//! Seeded puzzle generation.

use derive_more::{Display, Error};
use gridlock_core::{Grid, Position};
use gridlock_solver::{Backtracker, Deadline, SolveError};
use log::debug;
use rand::{RngExt, SeedableRng, seq::SliceRandom};
use rand_pcg::Pcg64Mcg;

use crate::{Difficulty, GivensBand};

/// Error returned by deadline-bounded generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum GenerateError {
    /// The caller-provided deadline expired before a puzzle was carved.
    #[display("generation exceeded its deadline")]
    Cancelled,
}

/// A generated puzzle: the givens-only problem grid, its solution, the
/// difficulty it was carved for, and the seed that reproduces it.
///
/// The puzzle is immutable once generated; a game session clones the
/// problem grid into its own live copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPuzzle {
    /// The puzzle as handed to the player: given clues only.
    pub problem: Grid,
    /// The complete solution the puzzle was carved from.
    pub solution: Grid,
    /// The difficulty band the puzzle was generated for.
    pub difficulty: Difficulty,
    /// Seed that reproduces this puzzle exactly via
    /// [`PuzzleGenerator::from_seed`].
    pub seed: u64,
}

/// Sudoku puzzle generator.
///
/// All randomness comes from one [`Pcg64Mcg`] stream, so a generator
/// built with [`from_seed`](Self::from_seed) replays the exact sequence
/// of puzzles. [`new`](Self::new) draws a fresh seed from the thread's
/// entropy source and records it.
///
/// # Examples
///
/// ```
/// use gridlock_generator::{Difficulty, PuzzleGenerator};
///
/// let mut generator = PuzzleGenerator::from_seed(1);
/// let puzzle = generator.generate(Difficulty::Easy);
///
/// let mut replay = PuzzleGenerator::from_seed(1);
/// assert_eq!(replay.generate(Difficulty::Easy), puzzle);
/// ```
#[derive(Debug, Clone)]
pub struct PuzzleGenerator {
    rng: Pcg64Mcg,
    seed: u64,
}

impl Default for PuzzleGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl PuzzleGenerator {
    /// Creates a generator seeded from entropy. The drawn seed is
    /// recorded and carried on every generated puzzle.
    #[must_use]
    pub fn new() -> Self {
        Self::from_seed(rand::random())
    }

    /// Creates a generator that replays the puzzle sequence for `seed`.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: Pcg64Mcg::seed_from_u64(seed),
            seed,
        }
    }

    /// Returns the seed this generator was built from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Produces a complete random solution grid.
    ///
    /// This runs the ordinary backtracking search over an empty grid,
    /// but with candidates tried in shuffled order, so the first
    /// completion found varies uniformly with the RNG stream instead of
    /// always being the search's canonical grid.
    pub fn generate_solution(&mut self) -> Grid {
        match self.solution_with_deadline(Deadline::NONE) {
            Ok(solution) => solution,
            Err(_) => unreachable!("no deadline was set"),
        }
    }

    /// Generates a puzzle for `difficulty`.
    ///
    /// Equivalent to [`generate_with_deadline`] with no deadline, which
    /// cannot fail: every carve attempt has a fresh chance of landing in
    /// the band, and the RNG stream advances between attempts.
    ///
    /// [`generate_with_deadline`]: Self::generate_with_deadline
    pub fn generate(&mut self, difficulty: Difficulty) -> GeneratedPuzzle {
        match self.generate_with_deadline(difficulty, Deadline::NONE) {
            Ok(puzzle) => puzzle,
            Err(GenerateError::Cancelled) => unreachable!("no deadline was set"),
        }
    }

    /// Generates a puzzle for `difficulty`, giving up once `deadline`
    /// passes.
    ///
    /// Starting from a random solution grid, still-filled cells are
    /// cleared in random order; each removal is kept only if the puzzle
    /// still has a unique solution, otherwise the cell is restored and
    /// protected for the rest of the attempt. Carving stops at a target
    /// given-cell count sampled inside the difficulty's band. An attempt
    /// that runs out of removable cells above the band is discarded and
    /// generation restarts from a fresh solution.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::Cancelled`] if the deadline expires at
    /// any point; no partial result is returned.
    pub fn generate_with_deadline(
        &mut self,
        difficulty: Difficulty,
        deadline: Deadline,
    ) -> Result<GeneratedPuzzle, GenerateError> {
        let band = difficulty.givens_band();
        let mut attempt = 1u32;
        loop {
            let solution = self.solution_with_deadline(deadline)?;
            if let Some(problem) = self.carve(&solution, band, deadline)? {
                debug!(
                    "generated {difficulty} puzzle with {} givens on attempt {attempt}",
                    problem.filled_cell_count()
                );
                return Ok(GeneratedPuzzle {
                    problem,
                    solution,
                    difficulty,
                    seed: self.seed,
                });
            }
            debug!("carve attempt {attempt} stalled above the {difficulty} band, retrying");
            attempt += 1;
        }
    }

    fn solution_with_deadline(&mut self, deadline: Deadline) -> Result<Grid, GenerateError> {
        let solver = Backtracker::with_deadline(deadline);
        let rng = &mut self.rng;
        match solver.solve_with_order(&Grid::new(), |digits: &mut [u8]| digits.shuffle(&mut *rng)) {
            Ok(solution) => Ok(solution),
            Err(SolveError::Cancelled) => Err(GenerateError::Cancelled),
            Err(SolveError::Invalid | SolveError::Unsolvable) => {
                unreachable!("an empty grid always has a completion")
            }
        }
    }

    /// One carve attempt. Returns the frozen problem grid, or `None` if
    /// the attempt ran out of removable cells above the band.
    fn carve(
        &mut self,
        solution: &Grid,
        band: GivensBand,
        deadline: Deadline,
    ) -> Result<Option<Grid>, GenerateError> {
        let solver = Backtracker::with_deadline(deadline);
        let mut grid = solution.clone();
        let mut givens = grid.filled_cell_count();
        let target = usize::from(self.rng.random_range(band.min..=band.max));

        let mut order = Position::ALL;
        order.shuffle(&mut self.rng);

        for pos in order {
            if givens == target {
                break;
            }
            let digit = grid.erase(pos);
            match solver.has_unique_solution(&grid) {
                Ok(true) => givens -= 1,
                Ok(false) => grid.fill(pos, digit),
                Err(SolveError::Cancelled) => return Err(GenerateError::Cancelled),
                Err(SolveError::Invalid | SolveError::Unsolvable) => {
                    unreachable!("carving a solution grid keeps it solvable")
                }
            }
        }

        if band.contains(givens) {
            grid.freeze_givens();
            Ok(Some(grid))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_generate_solution_is_complete_and_consistent() {
        let mut generator = PuzzleGenerator::from_seed(1);
        let solution = generator.generate_solution();
        assert!(solution.is_complete());
        assert!(solution.is_consistent());
    }

    #[test]
    fn test_generate_solution_varies_with_seed() {
        let a = PuzzleGenerator::from_seed(1).generate_solution();
        let b = PuzzleGenerator::from_seed(2).generate_solution();
        assert_ne!(a.to_string(), b.to_string());
    }

    #[test]
    fn test_generation_is_deterministic_per_seed() {
        let a = PuzzleGenerator::from_seed(7).generate(Difficulty::Medium);
        let b = PuzzleGenerator::from_seed(7).generate(Difficulty::Medium);
        assert_eq!(a, b);
        assert_eq!(a.seed, 7);
    }

    #[test]
    fn test_puzzle_respects_band_and_uniqueness() {
        let solver = Backtracker::new();
        for difficulty in Difficulty::ALL {
            let mut generator = PuzzleGenerator::from_seed(11);
            let puzzle = generator.generate(difficulty);
            let givens = puzzle.problem.filled_cell_count();

            assert!(
                difficulty.givens_band().contains(givens),
                "{difficulty}: {givens} givens outside band"
            );
            assert!(solver.has_unique_solution(&puzzle.problem).unwrap());
            assert_eq!(Difficulty::classify(givens), Some(difficulty));
        }
    }

    #[test]
    fn test_solution_solves_problem() {
        let mut generator = PuzzleGenerator::from_seed(3);
        let puzzle = generator.generate(Difficulty::Hard);

        assert!(puzzle.solution.is_complete());
        assert!(puzzle.solution.is_consistent());

        // The problem's unique completion is the recorded solution.
        let solved = Backtracker::new().solve(&puzzle.problem).unwrap();
        assert_eq!(solved.to_string(), puzzle.solution.to_string());

        // Problem cells are given clues drawn from the solution.
        for pos in Position::ALL {
            match puzzle.problem.digit_at(pos) {
                Some(digit) => {
                    assert!(puzzle.problem.cell(pos).is_given());
                    assert_eq!(puzzle.solution.digit_at(pos), Some(digit));
                }
                None => assert!(puzzle.problem.cell(pos).is_empty()),
            }
        }
    }

    #[test]
    fn test_expert_band_over_seeds() {
        let solver = Backtracker::new();
        let band = Difficulty::Expert.givens_band();
        for seed in 0..5 {
            let mut generator = PuzzleGenerator::from_seed(seed);
            let puzzle = generator.generate(Difficulty::Expert);
            let givens = puzzle.problem.filled_cell_count();
            assert!(band.contains(givens), "seed {seed}: {givens} givens");
            assert!(solver.has_unique_solution(&puzzle.problem).unwrap());
        }
    }

    #[test]
    #[ignore = "long-running sweep; run with --ignored"]
    fn test_expert_band_exhaustive() {
        let solver = Backtracker::new();
        let band = Difficulty::Expert.givens_band();
        for seed in 0..1000 {
            let mut generator = PuzzleGenerator::from_seed(seed);
            let puzzle = generator.generate(Difficulty::Expert);
            let givens = puzzle.problem.filled_cell_count();
            assert!(band.contains(givens), "seed {seed}: {givens} givens");
            assert!(solver.has_unique_solution(&puzzle.problem).unwrap());
        }
    }

    #[test]
    fn test_expired_deadline_cancels() {
        let mut generator = PuzzleGenerator::from_seed(1);
        let result =
            generator.generate_with_deadline(Difficulty::Easy, Deadline::after(Duration::ZERO));
        assert_eq!(result, Err(GenerateError::Cancelled));
    }
}
