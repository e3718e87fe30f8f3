//! Square command table indexed by (current state, new state).

use crate::builder::BuildError;
use crate::core::StateId;
use crate::transition::command::{CommandRef, TransitionCommand};
use crate::transition::engine::TransitionError;
use std::fmt;
use std::sync::Arc;

/// An N x N matrix of commands. Row is the current state, column the
/// state being moved to. Every cell is populated and the table never
/// changes after construction.
pub struct TransitionTable<H: ?Sized> {
    size: usize,
    cells: Vec<CommandRef<H>>,
}

impl<H: ?Sized> TransitionTable<H> {
    /// Build a table from fully populated rows.
    ///
    /// Fails when there are no rows or any row length differs from the
    /// number of rows.
    pub fn from_rows(rows: Vec<Vec<CommandRef<H>>>) -> Result<Self, BuildError> {
        let size = rows.len();
        if size == 0 {
            return Err(BuildError::Empty);
        }

        if let Some((row, cells)) = rows.iter().enumerate().find(|(_, r)| r.len() != size) {
            return Err(BuildError::NotSquare {
                row,
                len: cells.len(),
                expected: size,
            });
        }

        Ok(Self {
            size,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Table where every cell runs the same command.
    pub fn uniform<C>(size: usize, command: C) -> Result<Self, BuildError>
    where
        C: TransitionCommand<H> + 'static,
    {
        if size == 0 {
            return Err(BuildError::Empty);
        }
        let command: CommandRef<H> = Arc::new(command);
        Ok(Self {
            size,
            cells: vec![command; size * size],
        })
    }

    /// Used by the builder once every cell has been validated.
    pub(crate) fn from_cells(size: usize, cells: Vec<CommandRef<H>>) -> Self {
        debug_assert_eq!(cells.len(), size * size);
        Self { size, cells }
    }

    /// Number of states the table covers.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Command for moving from `current` to `new_state`.
    ///
    /// An index outside the table is a programming error and is reported
    /// as `TransitionError::UnknownState`.
    pub fn command(
        &self,
        current: StateId,
        new_state: StateId,
    ) -> Result<&CommandRef<H>, TransitionError> {
        for state in [current, new_state] {
            if state >= self.size {
                return Err(TransitionError::UnknownState {
                    state,
                    size: self.size,
                });
            }
        }
        Ok(&self.cells[current * self.size + new_state])
    }
}

impl<H: ?Sized> Clone for TransitionTable<H> {
    fn clone(&self) -> Self {
        Self {
            size: self.size,
            cells: self.cells.clone(),
        }
    }
}

impl<H: ?Sized> fmt::Debug for TransitionTable<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionTable")
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}
