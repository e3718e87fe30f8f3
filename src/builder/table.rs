//! Builder for constructing transition tables.

use crate::builder::error::{BuildError, TableViolation};
use crate::core::{StateId, StateSet};
use crate::transition::{CommandRef, NoCommand, RejectCommand, TransitionCommand, TransitionTable};
use std::sync::Arc;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Builder for transition tables with a fluent API.
///
/// Problems are collected rather than reported one at a time: `build()`
/// lists every missing, duplicated and out-of-range cell in a single
/// `BuildError::InvalidTable`.
pub struct TransitionTableBuilder<H: ?Sized> {
    size: usize,
    cells: Vec<Option<CommandRef<H>>>,
    violations: Vec<TableViolation>,
    fallback: Option<CommandRef<H>>,
}

impl<H: ?Sized> TransitionTableBuilder<H> {
    /// Create a builder for a table covering `size` states.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: (0..size * size).map(|_| None).collect(),
            violations: Vec::new(),
            fallback: None,
        }
    }

    /// Create a builder sized for every state in `S`.
    pub fn for_states<S: StateSet>() -> Self {
        Self::new(S::COUNT)
    }

    /// Set the command for one cell.
    pub fn on<C>(self, from: impl Into<StateId>, to: impl Into<StateId>, command: C) -> Self
    where
        C: TransitionCommand<H> + 'static,
    {
        self.on_shared(from, to, Arc::new(command))
    }

    /// Set one cell to a command that may also live in other cells.
    pub fn on_shared(
        mut self,
        from: impl Into<StateId>,
        to: impl Into<StateId>,
        command: CommandRef<H>,
    ) -> Self {
        self.set(from.into(), to.into(), command);
        self
    }

    /// Allow a transition with no side effects.
    pub fn allow(self, from: impl Into<StateId>, to: impl Into<StateId>) -> Self {
        self.on(from, to, NoCommand)
    }

    /// Forbid a transition.
    pub fn reject(self, from: impl Into<StateId>, to: impl Into<StateId>) -> Self {
        self.on(from, to, RejectCommand::default())
    }

    /// Use `command` for every still-unset cell on the diagonal.
    pub fn same_state<C>(mut self, command: C) -> Self
    where
        C: TransitionCommand<H> + 'static,
    {
        let command: CommandRef<H> = Arc::new(command);
        for state in 0..self.size {
            let cell = &mut self.cells[state * self.size + state];
            if cell.is_none() {
                *cell = Some(Arc::clone(&command));
            }
        }
        self
    }

    /// Use `command` for every cell left unset when `build()` runs.
    pub fn otherwise<C>(mut self, command: C) -> Self
    where
        C: TransitionCommand<H> + 'static,
    {
        self.fallback = Some(Arc::new(command));
        self
    }

    /// Build the table.
    /// Returns an error listing every problem if any cell is invalid.
    pub fn build(self) -> Result<TransitionTable<H>, BuildError> {
        let Self {
            size,
            cells,
            violations,
            fallback,
        } = self;

        if size == 0 {
            return Err(BuildError::Empty);
        }

        let cells: Vec<Option<CommandRef<H>>> = match fallback {
            Some(fallback) => cells
                .into_iter()
                .map(|cell| cell.or_else(|| Some(Arc::clone(&fallback))))
                .collect(),
            None => cells,
        };

        let mut checks: Vec<Validation<(), NonEmptyVec<TableViolation>>> = violations
            .into_iter()
            .map(|violation| Validation::fail(violation))
            .collect();

        for (index, cell) in cells.iter().enumerate() {
            let check = match cell {
                Some(_) => Validation::success(()),
                None => Validation::fail(TableViolation::Missing {
                    from: index / size,
                    to: index % size,
                }),
            };
            checks.push(check);
        }

        match Validation::all_vec(checks) {
            Validation::Success(_) => Ok(TransitionTable::from_cells(
                size,
                cells.into_iter().flatten().collect(),
            )),
            Validation::Failure(errors) => Err(BuildError::InvalidTable {
                violations: errors.iter().cloned().collect(),
            }),
        }
    }

    fn set(&mut self, from: StateId, to: StateId, command: CommandRef<H>) {
        if from >= self.size || to >= self.size {
            self.violations.push(TableViolation::OutOfRange {
                from,
                to,
                size: self.size,
            });
            return;
        }

        let cell = &mut self.cells[from * self.size + to];
        if cell.is_some() {
            self.violations.push(TableViolation::Duplicate { from, to });
            return;
        }
        *cell = Some(command);
    }
}
