//! The contract for entities whose lifecycle is driven by a transition table.

use super::state::{StateId, TransitionParam};
use crate::transition::{TransitionEngine, TransitionError, TransitionOutcome};

/// An entity that reports and accepts an integer state.
///
/// The transition parameter is optional: holders that never pass context
/// between hooks can ignore both parameter methods.
///
/// # Example
///
/// ```rust
/// use turnstile::core::{StateHolder, StateId, TransitionParam};
///
/// #[derive(Default)]
/// struct Document {
///     state: StateId,
///     param: Option<TransitionParam>,
/// }
///
/// impl StateHolder for Document {
///     fn state(&self) -> StateId {
///         self.state
///     }
///
///     fn set_state(&mut self, state: StateId) {
///         self.state = state;
///     }
///
///     fn transition_param(&self) -> Option<&TransitionParam> {
///         self.param.as_ref()
///     }
///
///     fn set_transition_param(&mut self, param: Option<TransitionParam>) {
///         self.param = param;
///     }
/// }
/// ```
pub trait StateHolder {
    /// Current state.
    fn state(&self) -> StateId;

    /// Overwrite the current state. Called by the engine between hooks.
    fn set_state(&mut self, state: StateId);

    /// Value passed between the hooks of the transition in progress.
    fn transition_param(&self) -> Option<&TransitionParam> {
        None
    }

    /// Store or clear the transition parameter.
    fn set_transition_param(&mut self, _param: Option<TransitionParam>) {}
}

/// Lets a holder drive its own transitions through an engine.
///
/// Implemented for every `StateHolder`.
pub trait ChangeState: StateHolder {
    /// Move this holder to `new_state` using `engine`'s table.
    fn change_state_to(
        &mut self,
        engine: &TransitionEngine<Self>,
        new_state: impl Into<StateId>,
    ) -> Result<TransitionOutcome, TransitionError> {
        engine.do_transition(new_state, self)
    }
}

impl<H: StateHolder + ?Sized> ChangeState for H {}
