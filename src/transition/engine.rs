//! Engine that executes guarded state changes from a transition table.

use crate::config::{EngineConfig, MissingResourcePolicy};
use crate::core::{StateHolder, StateId};
use crate::transition::command::{CommandError, HookPhase};
use crate::transition::table::TransitionTable;
use crate::BoxError;
use tracing::{debug, warn};

/// Result of a transition that did not fail hard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// Both hooks ran and the target is now in `to`.
    Applied { from: StateId, to: StateId },

    /// A hook rejected the transition. When the before hook rejected,
    /// the state is still `from`; when the after hook did, it is `to`.
    Rejected {
        from: StateId,
        to: StateId,
        phase: HookPhase,
        reason: String,
    },

    /// A hook could not reach a resource it needed and the engine is
    /// configured to log and carry on.
    Abandoned {
        from: StateId,
        to: StateId,
        phase: HookPhase,
        resource: String,
    },
}

impl TransitionOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}

/// Hard failures surfaced to the caller of `do_transition`.
#[derive(Debug, thiserror::Error)]
pub enum TransitionError {
    #[error("state {state} is outside the transition table (size {size})")]
    UnknownState { state: StateId, size: usize },

    #[error("resource '{resource}' not found during {phase} hook of {from} -> {to}")]
    ResourceNotFound {
        from: StateId,
        to: StateId,
        phase: HookPhase,
        resource: String,
    },

    #[error("{phase} hook of {from} -> {to} failed: {source}")]
    CommandFailed {
        from: StateId,
        to: StateId,
        phase: HookPhase,
        #[source]
        source: BoxError,
    },
}

/// Runs state changes against any `StateHolder` using a command table.
///
/// The engine holds no per-target state. Concurrent transitions on the same
/// target must be serialized by the caller; the table itself is read-only.
///
/// # Example
///
/// ```rust
/// use turnstile::builder::TransitionTableBuilder;
/// use turnstile::core::{StateHolder, StateId};
/// use turnstile::transition::{NoCommand, TransitionEngine};
///
/// #[derive(Default)]
/// struct Record {
///     state: StateId,
/// }
///
/// impl StateHolder for Record {
///     fn state(&self) -> StateId {
///         self.state
///     }
///
///     fn set_state(&mut self, state: StateId) {
///         self.state = state;
///     }
/// }
///
/// let table = TransitionTableBuilder::new(2)
///     .reject(1usize, 0usize)
///     .otherwise(NoCommand)
///     .build()
///     .unwrap();
/// let engine = TransitionEngine::new(table);
///
/// let mut record = Record::default();
/// assert!(engine.do_transition(1usize, &mut record).unwrap().is_applied());
/// assert!(engine.do_transition(0usize, &mut record).unwrap().is_rejected());
/// assert_eq!(record.state(), 1);
/// ```
pub struct TransitionEngine<H: ?Sized> {
    table: TransitionTable<H>,
    config: EngineConfig,
}

impl<H: StateHolder + ?Sized> TransitionEngine<H> {
    /// Create an engine with the default configuration.
    pub fn new(table: TransitionTable<H>) -> Self {
        Self::with_config(table, EngineConfig::default())
    }

    pub fn with_config(table: TransitionTable<H>, config: EngineConfig) -> Self {
        Self { table, config }
    }

    pub fn table(&self) -> &TransitionTable<H> {
        &self.table
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Swap in a whole new table, returning the previous one.
    pub fn replace_table(&mut self, table: TransitionTable<H>) -> TransitionTable<H> {
        std::mem::replace(&mut self.table, table)
    }

    /// Move `target` to `new_state`.
    ///
    /// Runs the before hook, sets the state, then runs the after hook of the
    /// command at `table[target.state()][new_state]`. Rejections are logged
    /// and returned as `TransitionOutcome::Rejected`; only unknown states,
    /// hook failures and (when configured) missing resources are errors.
    pub fn do_transition(
        &self,
        new_state: impl Into<StateId>,
        target: &mut H,
    ) -> Result<TransitionOutcome, TransitionError> {
        let to = new_state.into();
        let from = target.state();
        let command = self.table.command(from, to)?;

        if let Err(err) = command.execute_before(target) {
            return self.settle(from, to, HookPhase::Before, err);
        }

        target.set_state(to);

        if let Err(err) = command.execute_after(target) {
            return self.settle(from, to, HookPhase::After, err);
        }

        debug!(from, to, "state changed");
        Ok(TransitionOutcome::Applied { from, to })
    }

    fn settle(
        &self,
        from: StateId,
        to: StateId,
        phase: HookPhase,
        err: CommandError,
    ) -> Result<TransitionOutcome, TransitionError> {
        match err {
            CommandError::IllegalTransition { reason }
            | CommandError::Unsupported { operation: reason } => {
                warn!(from, to, %phase, %reason, "failure to change state");
                Ok(TransitionOutcome::Rejected {
                    from,
                    to,
                    phase,
                    reason,
                })
            }
            CommandError::ResourceNotFound { resource } => match self.config.missing_resource {
                MissingResourcePolicy::Log => {
                    warn!(from, to, %phase, %resource, "transition abandoned, resource not found");
                    Ok(TransitionOutcome::Abandoned {
                        from,
                        to,
                        phase,
                        resource,
                    })
                }
                MissingResourcePolicy::Propagate => Err(TransitionError::ResourceNotFound {
                    from,
                    to,
                    phase,
                    resource,
                }),
            },
            CommandError::Failed(source) => Err(TransitionError::CommandFailed {
                from,
                to,
                phase,
                source,
            }),
        }
    }
}
