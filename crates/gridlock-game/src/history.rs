//! Move history with undo/redo stacks.

use gridlock_core::{Digit, Position};

/// One recorded cell edit.
///
/// Applying a move means setting `position` to `next`; undoing it means
/// setting `position` back to `previous`. The sequence number orders
/// moves across the life of a session and survives undo/redo cycles, so
/// a serialized history replays identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    /// The edited cell.
    pub position: Position,
    /// The digit the cell held before the edit, if any.
    pub previous: Option<Digit>,
    /// The digit the cell holds after the edit, if any.
    pub next: Option<Digit>,
    /// Monotonic order of the edit within its session.
    pub sequence: u32,
}

/// Past and future move stacks.
///
/// Invariant: replaying every past move in order against the session's
/// givens-only baseline reproduces the current grid exactly. Recording a
/// new move discards the future stack; branching history is not kept.
#[derive(Debug, Clone, Default)]
pub(crate) struct MoveHistory {
    past: Vec<Move>,
    future: Vec<Move>,
    next_sequence: u32,
}

impl MoveHistory {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Records an applied edit, discarding any undone moves.
    pub(crate) fn record(
        &mut self,
        position: Position,
        previous: Option<Digit>,
        next: Option<Digit>,
    ) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.past.push(Move {
            position,
            previous,
            next,
            sequence,
        });
        self.future.clear();
    }

    pub(crate) fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub(crate) fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Moves the most recent past move to the future stack and returns
    /// it.
    pub(crate) fn undo(&mut self) -> Option<Move> {
        let m = self.past.pop()?;
        self.future.push(m);
        Some(m)
    }

    /// Moves the most recently undone move back to the past stack and
    /// returns it.
    pub(crate) fn redo(&mut self) -> Option<Move> {
        let m = self.future.pop()?;
        self.past.push(m);
        Some(m)
    }

    pub(crate) fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
        self.next_sequence = 0;
    }

    pub(crate) fn past(&self) -> &[Move] {
        &self.past
    }

    pub(crate) fn future(&self) -> &[Move] {
        &self.future
    }
}
