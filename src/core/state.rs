//! State identifiers.
//!
//! The transition engine treats a state as an opaque index into a square
//! command table. Applications that want named states describe them with
//! the `StateSet` trait, usually through the `state_ids!` macro.

use std::fmt::Debug;

/// Index of a lifecycle stage inside a transition table.
pub type StateId = usize;

/// Free-form value a holder carries between the before and after hooks
/// of a single transition (a reason string, a payload, ...).
pub type TransitionParam = serde_json::Value;

/// A closed, ordered set of named states.
///
/// Each variant maps to a dense index starting at zero, so `COUNT` is also
/// the side length of a transition table covering the whole set.
///
/// # Example
///
/// ```rust
/// use turnstile::core::{StateId, StateSet};
///
/// #[derive(Clone, Copy, PartialEq, Debug)]
/// enum DoorState {
///     Closed,
///     Open,
/// }
///
/// impl StateSet for DoorState {
///     const COUNT: usize = 2;
///
///     fn all() -> &'static [Self] {
///         &[Self::Closed, Self::Open]
///     }
///
///     fn id(self) -> StateId {
///         self as StateId
///     }
///
///     fn name(self) -> &'static str {
///         match self {
///             Self::Closed => "Closed",
///             Self::Open => "Open",
///         }
///     }
/// }
///
/// assert_eq!(DoorState::from_id(1), Some(DoorState::Open));
/// assert_eq!(DoorState::from_id(2), None);
/// ```
pub trait StateSet: Copy + PartialEq + Debug + Send + Sync + 'static {
    /// Number of states in the set.
    const COUNT: usize;

    /// Every state, ordered by id.
    fn all() -> &'static [Self];

    /// Table index of this state.
    fn id(self) -> StateId;

    /// Name for display/logging.
    fn name(self) -> &'static str;

    /// Look a state up by its table index.
    fn from_id(id: StateId) -> Option<Self> {
        Self::all().get(id).copied()
    }
}
