//! Solver error type.

use derive_more::{Display, Error};

/// Error returned by the backtracking search.
///
/// Every failure mode of a search is explicit; none is approximated or
/// silently swallowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum SolveError {
    /// The grid already violated a constraint before the search began
    /// (some row, column, or box holds a digit twice).
    #[display("grid violates a constraint before search")]
    Invalid,
    /// The search space was exhausted without finding a completion.
    #[display("no assignment satisfies all constraints")]
    Unsolvable,
    /// The caller-provided deadline expired before the search finished.
    #[display("search exceeded its deadline")]
    Cancelled,
}
