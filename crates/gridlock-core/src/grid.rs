//! The 9x9 board and its constraint state.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use crate::{Cell, Constraints, Digit, DigitSet, GridError, ParseGridError, Position};

/// The 9x9 board: 81 cells plus the occupancy masks derived from them.
///
/// Every `Grid` owns its [`Constraints`] instance; the two are created
/// together, mutated together, and dropped together, so candidate
/// queries never observe stale masks. Grids are freely cloneable; the
/// solver and generator work on clones and never mutate a caller's grid.
///
/// A grid may hold an inconsistent state (the player typed a digit that
/// conflicts with a peer). Such a state is displayable and editable, but
/// [`is_consistent`](Self::is_consistent) reports it and the solver
/// refuses to search from it.
///
/// # Examples
///
/// ```
/// use gridlock_core::{Digit, Grid, Position};
///
/// let mut grid = Grid::new();
/// grid.set(Position::new(0, 0), Some(Digit::D5))?;
///
/// assert_eq!(grid.digit_at(Position::new(0, 0)), Some(Digit::D5));
/// assert!(!grid.candidates_at(Position::new(8, 0)).contains(Digit::D5));
/// assert!(grid.is_consistent());
/// # Ok::<(), gridlock_core::GridError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: [Cell; 81],
    constraints: Constraints,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    /// Creates an empty grid.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; 81],
            constraints: Constraints::new(),
        }
    }

    /// Returns the cell at `pos`.
    #[must_use]
    pub fn cell(&self, pos: Position) -> Cell {
        self.cells[pos.cell_index()]
    }

    /// Returns the digit at `pos`, if any.
    #[must_use]
    pub fn digit_at(&self, pos: Position) -> Option<Digit> {
        self.cell(pos).digit()
    }

    /// Sets or clears the cell at `pos`.
    ///
    /// `Some(digit)` places a digit (replacing any previous player
    /// value), `None` clears the cell. Occupancy masks for the affected
    /// row, column, and box are updated before the call returns.
    ///
    /// Setting a given cell to its own value is an accepted no-op, so a
    /// caller replaying moves does not need to special-case clues.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::GivenCellLocked`] if the cell is a fixed
    /// clue and `digit` differs from it. The grid is unchanged on error.
    pub fn set(&mut self, pos: Position, digit: Option<Digit>) -> Result<(), GridError> {
        match (self.cell(pos), digit) {
            (Cell::Given(given), Some(new)) if given == new => Ok(()),
            (Cell::Given(_), _) => Err(GridError::GivenCellLocked),
            (Cell::Empty, None) => Ok(()),
            (Cell::Empty, Some(new)) => {
                self.fill(pos, new);
                Ok(())
            }
            (Cell::Filled(_), None) => {
                self.erase(pos);
                Ok(())
            }
            (Cell::Filled(old), Some(new)) => {
                if old != new {
                    self.erase(pos);
                    self.fill(pos, new);
                }
                Ok(())
            }
        }
    }

    /// Places `digit` into the empty cell at `pos`.
    ///
    /// This is the unchecked fast path used by the search and carving
    /// loops, which already know the cell state.
    ///
    /// # Panics
    ///
    /// Panics if the cell is not empty.
    pub fn fill(&mut self, pos: Position, digit: Digit) {
        assert!(self.cell(pos).is_empty(), "fill on a non-empty cell");
        self.cells[pos.cell_index()] = Cell::Filled(digit);
        self.constraints.place(pos, digit);
    }

    /// Reverts the filled cell at `pos` to empty, returning the digit it
    /// held.
    ///
    /// # Panics
    ///
    /// Panics if the cell is not player-filled (empty or given).
    pub fn erase(&mut self, pos: Position) -> Digit {
        let Cell::Filled(digit) = self.cell(pos) else {
            panic!("erase on a cell that is not player-filled");
        };
        self.cells[pos.cell_index()] = Cell::Empty;
        self.constraints.unplace(pos, digit);
        digit
    }

    /// Converts every filled cell into a given clue.
    ///
    /// Used once at the end of puzzle generation to fix the surviving
    /// cells. Occupancy masks are unaffected.
    pub fn freeze_givens(&mut self) {
        for cell in &mut self.cells {
            if let Cell::Filled(digit) = *cell {
                *cell = Cell::Given(digit);
            }
        }
    }

    /// Returns the candidate mask of the cell at `pos`: every digit not
    /// excluded by a peer in its row, column, or box.
    ///
    /// An occupied cell has no candidates.
    #[must_use]
    pub fn candidates_at(&self, pos: Position) -> DigitSet {
        if self.cell(pos).is_empty() {
            self.constraints.candidates_at(pos)
        } else {
            DigitSet::EMPTY
        }
    }

    /// Returns the constraint state of this grid.
    #[must_use]
    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    /// Returns an iterator over naked singles in row-major order: empty
    /// cells whose candidate mask holds exactly one digit.
    ///
    /// This is the unit of deduction the hint system surfaces first.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridlock_core::Grid;
    ///
    /// let grid = Grid::new();
    /// assert_eq!(grid.naked_singles().count(), 0);
    /// ```
    pub fn naked_singles(&self) -> impl Iterator<Item = (Position, Digit)> + '_ {
        Position::ALL.into_iter().filter_map(|pos| {
            let digit = self.candidates_at(pos).as_single()?;
            Some((pos, digit))
        })
    }

    /// Returns `true` if every cell holds a digit.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    /// Returns `true` if no row, column, or box holds the same digit
    /// twice.
    ///
    /// O(1): answered from the constraint state, not by re-scanning
    /// cells.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.constraints.is_consistent()
    }

    /// Returns the number of empty cells.
    #[must_use]
    pub fn empty_cell_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_empty()).count()
    }

    /// Returns the number of cells holding a digit.
    #[must_use]
    pub fn filled_cell_count(&self) -> usize {
        81 - self.empty_cell_count()
    }
}

impl Display for Grid {
    /// Formats the grid as 81 characters in row-major order, `.` for
    /// empty cells.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for pos in Position::ALL {
            match self.digit_at(pos) {
                Some(digit) => write!(f, "{digit}")?,
                None => write!(f, ".")?,
            }
        }
        Ok(())
    }
}

impl FromStr for Grid {
    type Err = ParseGridError;

    /// Parses the 81-character row-major form. Digits `1`-`9` become
    /// given clues; `.` and `0` are empty cells. Whitespace is ignored,
    /// so fixtures may be laid out as nine rows.
    ///
    /// Duplicate digits are accepted: the parsed grid simply reports
    /// `is_consistent() == false`, and the solver rejects it before
    /// searching.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut grid = Self::new();
        let mut cells = 0;
        for (index, character) in s.char_indices() {
            if character.is_whitespace() {
                continue;
            }
            match character {
                '.' | '0' => {}
                '1'..='9' => {
                    if cells < 81 {
                        let digit = Digit::from_value(character as u8 - b'0');
                        let pos = Position::ALL[cells];
                        grid.cells[pos.cell_index()] = Cell::Given(digit);
                        grid.constraints.place(pos, digit);
                    }
                }
                _ => {
                    return Err(ParseGridError::InvalidCharacter { character, index });
                }
            }
            cells += 1;
        }
        if cells != 81 {
            return Err(ParseGridError::BadLength { len: cells });
        }
        Ok(grid)
    }
}
