//! Core types shared by the transition engine.
//!
//! - State identifiers and named state sets via `StateId` / `StateSet`
//! - The `StateHolder` contract implemented by application entities
//! - Guard predicates over holders

mod guard;
mod holder;
mod state;

pub use guard::Guard;
pub use holder::{ChangeState, StateHolder};
pub use state::{StateId, StateSet, TransitionParam};
