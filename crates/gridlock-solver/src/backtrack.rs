//! MRV backtracking search.

use gridlock_core::{Digit, DigitSet, Grid, Position};
use tinyvec::ArrayVec;

use crate::{Deadline, SolveError};

/// Search nodes between deadline polls. The first node always polls, so
/// an already-expired deadline cancels before any work is done.
const DEADLINE_POLL_INTERVAL: u64 = 1024;

/// Backtracking Sudoku solver with minimum-remaining-values ordering.
///
/// At every step the search expands the empty cell with the fewest
/// candidates (ties broken by lowest row-major index), trying candidate
/// digits in ascending order and reverting the cell and its occupancy
/// masks before moving to the next candidate. The solver always works on
/// a clone; the caller's grid is never mutated.
///
/// # Examples
///
/// ```
/// use gridlock_core::Grid;
/// use gridlock_solver::Backtracker;
///
/// let puzzle: Grid =
///     "53..7....6..195....98....6.8...6...34..8.3..17...2...6.6....28....419..5....8..79"
///         .parse()
///         .unwrap();
///
/// let solver = Backtracker::new();
/// let solution = solver.solve(&puzzle)?;
/// assert!(solution.is_complete() && solution.is_consistent());
/// assert!(solver.has_unique_solution(&puzzle)?);
/// # Ok::<(), gridlock_solver::SolveError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Backtracker {
    deadline: Deadline,
}

impl Backtracker {
    /// Creates a solver with no deadline.
    #[must_use]
    pub fn new() -> Self {
        Self {
            deadline: Deadline::NONE,
        }
    }

    /// Creates a solver that abandons any search once `deadline` passes.
    #[must_use]
    pub fn with_deadline(deadline: Deadline) -> Self {
        Self { deadline }
    }

    /// Finds a completion of `grid`, trying candidates in ascending
    /// order.
    ///
    /// The returned grid is a completed copy; previously empty cells are
    /// filled, given cells are untouched.
    ///
    /// # Errors
    ///
    /// - [`SolveError::Invalid`] if the grid violates a constraint
    ///   before the search begins
    /// - [`SolveError::Unsolvable`] if no completion exists
    /// - [`SolveError::Cancelled`] if the deadline expired mid-search
    pub fn solve(&self, grid: &Grid) -> Result<Grid, SolveError> {
        self.solve_with_order(grid, |_digits: &mut [u8]| {})
    }

    /// Finds a completion of `grid`, passing each cell's candidate
    /// digits through `order` before trying them.
    ///
    /// The closure receives the candidate digit values (1-9) in
    /// ascending order and may reorder them in place; the search tries
    /// them front to back. Shuffling here is how the generator produces
    /// varied solution grids from the same deterministic search.
    ///
    /// # Errors
    ///
    /// Same as [`solve`](Self::solve).
    pub fn solve_with_order<F>(&self, grid: &Grid, order: F) -> Result<Grid, SolveError>
    where
        F: FnMut(&mut [u8]),
    {
        if !grid.is_consistent() {
            return Err(SolveError::Invalid);
        }
        let mut search = Search {
            grid: grid.clone(),
            order,
            deadline: self.deadline,
            nodes: 0,
        };
        if search.solve_rec()? {
            Ok(search.grid)
        } else {
            Err(SolveError::Unsolvable)
        }
    }

    /// Counts completions of `grid`, stopping as soon as `limit` are
    /// found.
    ///
    /// With `limit == 2` this is the uniqueness check: the search stops
    /// the moment a second distinct completion is found and never
    /// enumerates exhaustively.
    ///
    /// # Errors
    ///
    /// - [`SolveError::Invalid`] if the grid violates a constraint
    ///   before the search begins
    /// - [`SolveError::Cancelled`] if the deadline expired mid-search
    pub fn count_solutions(&self, grid: &Grid, limit: usize) -> Result<usize, SolveError> {
        if !grid.is_consistent() {
            return Err(SolveError::Invalid);
        }
        if limit == 0 {
            return Ok(0);
        }
        let mut search = Search {
            grid: grid.clone(),
            order: |_digits: &mut [u8]| {},
            deadline: self.deadline,
            nodes: 0,
        };
        let mut found = 0;
        search.count_rec(limit, &mut found)?;
        Ok(found)
    }

    /// Returns `true` if `grid` has exactly one completion.
    ///
    /// # Errors
    ///
    /// Same as [`count_solutions`](Self::count_solutions).
    pub fn has_unique_solution(&self, grid: &Grid) -> Result<bool, SolveError> {
        Ok(self.count_solutions(grid, 2)? == 1)
    }

    /// Returns the first placement a solve of `grid` would commit to:
    /// the MRV-selected cell of the current state and the digit it holds
    /// in the completion found by the first successful branch.
    ///
    /// Returns `Ok(None)` if the grid has no empty cells.
    ///
    /// This backs the hint system's fallback when no naked single
    /// exists; the placement may rest on a guess rather than a pure
    /// deduction, which the caller must surface.
    ///
    /// # Errors
    ///
    /// Same as [`solve`](Self::solve).
    pub fn first_assignment(
        &self,
        grid: &Grid,
    ) -> Result<Option<(Position, Digit)>, SolveError> {
        if !grid.is_consistent() {
            return Err(SolveError::Invalid);
        }
        let Some((pos, _)) = mrv_cell(grid) else {
            return Ok(None);
        };
        let solution = self.solve(grid)?;
        let Some(digit) = solution.digit_at(pos) else {
            unreachable!("solved grid has no empty cells");
        };
        Ok(Some((pos, digit)))
    }
}

/// Returns the empty cell with the fewest candidates and its candidate
/// set, or `None` if the grid has no empty cells.
///
/// Ties are broken by lowest row-major index. The scan stops early at a
/// cell with at most one candidate: a forced cell is already minimal and
/// a zero-candidate cell is a dead end either way.
fn mrv_cell(grid: &Grid) -> Option<(Position, DigitSet)> {
    let mut best: Option<(Position, DigitSet)> = None;
    for pos in Position::ALL {
        if !grid.cell(pos).is_empty() {
            continue;
        }
        let candidates = grid.candidates_at(pos);
        if candidates.len() <= 1 {
            return Some((pos, candidates));
        }
        match best {
            Some((_, other)) if other.len() <= candidates.len() => {}
            _ => best = Some((pos, candidates)),
        }
    }
    best
}

struct Search<F> {
    grid: Grid,
    order: F,
    deadline: Deadline,
    nodes: u64,
}

impl<F: FnMut(&mut [u8])> Search<F> {
    fn tick(&mut self) -> Result<(), SolveError> {
        if self.nodes % DEADLINE_POLL_INTERVAL == 0 && self.deadline.is_expired() {
            return Err(SolveError::Cancelled);
        }
        self.nodes += 1;
        Ok(())
    }

    fn solve_rec(&mut self) -> Result<bool, SolveError> {
        self.tick()?;
        let Some((pos, candidates)) = mrv_cell(&self.grid) else {
            return Ok(true);
        };
        let mut order: ArrayVec<[u8; 9]> = candidates.iter().map(Digit::value).collect();
        (self.order)(&mut order);
        for value in order {
            self.grid.fill(pos, Digit::from_value(value));
            if self.solve_rec()? {
                return Ok(true);
            }
            self.grid.erase(pos);
        }
        Ok(false)
    }

    fn count_rec(&mut self, limit: usize, found: &mut usize) -> Result<(), SolveError> {
        self.tick()?;
        let Some((pos, candidates)) = mrv_cell(&self.grid) else {
            *found += 1;
            return Ok(());
        };
        for digit in candidates {
            self.grid.fill(pos, digit);
            self.count_rec(limit, found)?;
            self.grid.erase(pos);
            if *found >= limit {
                return Ok(());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    const EXAMPLE_PUZZLE: &str =
        "53..7....6..195....98....6.8...6...34..8.3..17...2...6.6....28....419..5....8..79";
    const EXAMPLE_SOLUTION: &str =
        "534678912672195348198342567859761423426853791713924856961537284287419635345286179";

    fn example_puzzle() -> Grid {
        EXAMPLE_PUZZLE.parse().unwrap()
    }

    /// The example solution with an unavoidable rectangle cleared:
    /// positions (5, 3), (8, 3), (5, 4), (8, 4) held the digits 1/3 and
    /// 3/1, so exactly two completions exist.
    fn two_solution_grid() -> Grid {
        let mut s = EXAMPLE_SOLUTION.to_string();
        for index in [3 * 9 + 5, 3 * 9 + 8, 4 * 9 + 5, 4 * 9 + 8] {
            s.replace_range(index..=index, ".");
        }
        s.parse().unwrap()
    }

    #[test]
    fn test_solve_example_puzzle() {
        let solution = Backtracker::new().solve(&example_puzzle()).unwrap();
        assert!(solution.is_complete());
        assert!(solution.is_consistent());
        assert_eq!(solution.to_string(), EXAMPLE_SOLUTION);
    }

    #[test]
    fn test_solve_preserves_givens() {
        let puzzle = example_puzzle();
        let solution = Backtracker::new().solve(&puzzle).unwrap();
        for pos in Position::ALL {
            if let Some(digit) = puzzle.digit_at(pos) {
                assert!(puzzle.cell(pos).is_given());
                assert_eq!(solution.digit_at(pos), Some(digit));
            } else {
                assert!(solution.cell(pos).is_filled());
            }
        }
    }

    #[test]
    fn test_solve_empty_grid_is_deterministic() {
        let solver = Backtracker::new();
        let first = solver.solve(&Grid::new()).unwrap();
        let second = solver.solve(&Grid::new()).unwrap();
        assert!(first.is_complete());
        assert!(first.is_consistent());
        assert_eq!(first, second);
    }

    #[test]
    fn test_solve_rejects_inconsistent_grid() {
        let grid: Grid = format!("55{}", ".".repeat(79)).parse().unwrap();
        let solver = Backtracker::new();
        assert_eq!(solver.solve(&grid), Err(SolveError::Invalid));
        assert_eq!(solver.count_solutions(&grid, 2), Err(SolveError::Invalid));
        assert_eq!(solver.first_assignment(&grid), Err(SolveError::Invalid));
    }

    #[test]
    fn test_unsolvable_grid() {
        // Row 0 holds 1-8; the 9 in column 8 leaves (8, 0) without a
        // single candidate.
        let grid: Grid = format!("12345678.{}9{}", ".".repeat(8), ".".repeat(63))
            .parse()
            .unwrap();
        assert!(grid.is_consistent());
        assert_eq!(
            Backtracker::new().solve(&grid),
            Err(SolveError::Unsolvable)
        );
        assert_eq!(Backtracker::new().count_solutions(&grid, 2), Ok(0));
    }

    #[test]
    fn test_count_solutions_unique_puzzle() {
        let solver = Backtracker::new();
        assert_eq!(solver.count_solutions(&example_puzzle(), 2), Ok(1));
        assert!(solver.has_unique_solution(&example_puzzle()).unwrap());
    }

    #[test]
    fn test_count_solutions_stops_at_limit() {
        let solver = Backtracker::new();
        let grid = two_solution_grid();
        assert_eq!(solver.count_solutions(&grid, 1), Ok(1));
        assert_eq!(solver.count_solutions(&grid, 2), Ok(2));
        assert!(!solver.has_unique_solution(&grid).unwrap());
        // An empty grid has a vast number of completions; the cap must
        // stop the search immediately.
        assert_eq!(solver.count_solutions(&Grid::new(), 3), Ok(3));
    }

    #[test]
    fn test_count_solutions_zero_limit() {
        assert_eq!(
            Backtracker::new().count_solutions(&example_puzzle(), 0),
            Ok(0)
        );
    }

    #[test]
    fn test_first_assignment_matches_solution() {
        let puzzle = example_puzzle();
        let (pos, digit) = Backtracker::new()
            .first_assignment(&puzzle)
            .unwrap()
            .unwrap();
        assert!(puzzle.cell(pos).is_empty());

        let solution: Grid = EXAMPLE_SOLUTION.parse().unwrap();
        assert_eq!(solution.digit_at(pos), Some(digit));
    }

    #[test]
    fn test_first_assignment_mrv_tie_break() {
        // All four rectangle cells have the candidate pair {1, 3}; the
        // tie breaks to the lowest row-major index, and ascending order
        // tries 1 first, which completes.
        let grid = two_solution_grid();
        let first = Backtracker::new().first_assignment(&grid).unwrap();
        assert_eq!(first, Some((Position::new(5, 3), Digit::D1)));
    }

    #[test]
    fn test_first_assignment_on_complete_grid() {
        let solution: Grid = EXAMPLE_SOLUTION.parse().unwrap();
        assert_eq!(Backtracker::new().first_assignment(&solution), Ok(None));
    }

    #[test]
    fn test_expired_deadline_cancels() {
        let solver = Backtracker::with_deadline(Deadline::after(Duration::ZERO));
        assert_eq!(solver.solve(&example_puzzle()), Err(SolveError::Cancelled));
        assert_eq!(
            solver.count_solutions(&example_puzzle(), 2),
            Err(SolveError::Cancelled)
        );
    }

    #[test]
    fn test_solve_with_order_reversed_still_solves() {
        let solver = Backtracker::new();
        let solution = solver
            .solve_with_order(&example_puzzle(), |digits: &mut [u8]| digits.reverse())
            .unwrap();
        // The puzzle is unique, so candidate order cannot change the
        // result.
        assert_eq!(solution.to_string(), EXAMPLE_SOLUTION);
    }

    #[test]
    fn test_mrv_prefers_fewest_candidates() {
        // (8, 0) is forced after row 0 holds 1-8 except one cell.
        let grid: Grid = format!("12345678.{}", ".".repeat(72)).parse().unwrap();
        let (pos, candidates) = mrv_cell(&grid).unwrap();
        assert_eq!(pos, Position::new(8, 0));
        assert_eq!(candidates.as_single(), Some(Digit::D9));
    }
}
