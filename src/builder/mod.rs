//! Builder API for transition tables.
//!
//! This module provides a fluent table builder, the `state_ids!` macro for
//! naming states, and small helpers for common command shapes.

pub mod error;
pub mod macros;
pub mod table;

pub use error::{BuildError, TableViolation};
pub use table::TransitionTableBuilder;

use crate::core::Guard;
use crate::transition::{GuardedCommand, TransitionCommand};
use std::sync::Arc;

/// Wrap `command` so it only runs when `predicate` accepts the target.
///
/// # Example
///
/// ```
/// use turnstile::builder::{guarded, TransitionTableBuilder};
/// use turnstile::core::{StateHolder, StateId};
/// use turnstile::transition::{NoCommand, TransitionEngine};
///
/// struct Invoice {
///     state: StateId,
///     approved: bool,
/// }
///
/// impl StateHolder for Invoice {
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
///     .on(0usize, 1usize, guarded(|i: &Invoice| i.approved, NoCommand))
///     .otherwise(NoCommand)
///     .build()
///     .unwrap();
/// let engine = TransitionEngine::new(table);
///
/// let mut draft = Invoice { state: 0, approved: false };
/// assert!(engine.do_transition(1usize, &mut draft).unwrap().is_rejected());
/// ```
pub fn guarded<H, F, C>(predicate: F, command: C) -> GuardedCommand<H>
where
    H: ?Sized,
    F: Fn(&H) -> bool + Send + Sync + 'static,
    C: TransitionCommand<H> + 'static,
{
    GuardedCommand::new(Guard::new(predicate), Arc::new(command))
}
