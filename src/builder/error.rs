//! Build errors for transition tables.

use crate::core::StateId;
use thiserror::Error;

/// A single problem found while validating a table under construction.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TableViolation {
    #[error("no command for {from} -> {to}")]
    Missing { from: StateId, to: StateId },

    #[error("cell {from} -> {to} is outside a table of size {size}")]
    OutOfRange {
        from: StateId,
        to: StateId,
        size: usize,
    },

    #[error("command for {from} -> {to} defined more than once")]
    Duplicate { from: StateId, to: StateId },
}

/// Errors that can occur when building transition tables.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Transition table has no states")]
    Empty,

    #[error("Row {row} has {len} commands, expected {expected}")]
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("Transition table is invalid ({} violations)", violations.len())]
    InvalidTable { violations: Vec<TableViolation> },
}
