//! Table-driven state transitions.
//!
//! # Key Concepts
//!
//! - **Commands**: `TransitionCommand` pairs a before hook and an after hook
//! - **Table**: `TransitionTable` maps (current, new) state pairs to commands
//! - **Engine**: `TransitionEngine` runs one transition against a `StateHolder`
//!
//! Rejections raised by a command are logged and reported through
//! `TransitionOutcome`; they never fail the caller. Unknown state indices
//! and genuine hook failures are returned as `TransitionError`.

mod command;
mod engine;
mod table;

pub use command::{
    CommandError, CommandRef, FnCommand, GuardedCommand, HookPhase, NoCommand,
    RejectCommand, TransitionCommand,
};
pub use engine::{TransitionEngine, TransitionError, TransitionOutcome};
pub use table::TransitionTable;
