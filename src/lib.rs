//! Turnstile: table-driven state transitions and a typed notification bus
//!
//! Two small coordination engines for in-process use:
//!
//! - **Transitions**: a `TransitionEngine` looks up the command for an
//!   entity's (current, new) state pair in a square table, runs its before
//!   hook, changes the state, then runs its after hook. Rejected transitions
//!   are logged and reported, never fatal.
//! - **Notifications**: a `NotificationBus` delivers events to subscribers
//!   registered for an (event tag, publisher tag) pair, with safe concurrent
//!   registration.
//!
//! # Example
//!
//! ```rust
//! use turnstile::builder::TransitionTableBuilder;
//! use turnstile::core::{StateHolder, StateId};
//! use turnstile::state_ids;
//! use turnstile::transition::{FnCommand, NoCommand, TransitionEngine};
//!
//! state_ids! {
//!     enum EditState {
//!         NoState,
//!         ReadOnly,
//!         Add,
//!     }
//! }
//!
//! #[derive(Default)]
//! struct Grid {
//!     state: StateId,
//!     loaded: bool,
//! }
//!
//! impl StateHolder for Grid {
//!     fn state(&self) -> StateId {
//!         self.state
//!     }
//!
//!     fn set_state(&mut self, state: StateId) {
//!         self.state = state;
//!     }
//! }
//!
//! let load = FnCommand::new().before(|grid: &mut Grid| {
//!     grid.loaded = true;
//!     Ok(())
//! });
//!
//! let table = TransitionTableBuilder::for_states::<EditState>()
//!     .on(EditState::NoState, EditState::ReadOnly, load)
//!     .reject(EditState::ReadOnly, EditState::Add)
//!     .otherwise(NoCommand)
//!     .build()
//!     .unwrap();
//! let engine = TransitionEngine::new(table);
//!
//! let mut grid = Grid::default();
//! engine.do_transition(EditState::ReadOnly, &mut grid).unwrap();
//! engine.do_transition(EditState::Add, &mut grid).unwrap();
//!
//! assert!(grid.loaded);
//! assert_eq!(grid.state(), StateId::from(EditState::ReadOnly));
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod notification;
pub mod transition;

/// Boxed error raised by user code (hooks, subscribers).
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

// Re-export commonly used types
pub use builder::{BuildError, TransitionTableBuilder};
pub use config::{ConfigError, EngineConfig, MissingResourcePolicy};
pub use crate::core::{ChangeState, Guard, StateHolder, StateId, StateSet, TransitionParam};
pub use notification::{Event, NotificationBus, PublishError, Publisher, Subscriber};
pub use transition::{
    CommandError, TransitionCommand, TransitionEngine, TransitionError, TransitionOutcome,
    TransitionTable,
};
