//! Commands run around a state change, plus the stock commands every
//! table needs.

use crate::core::Guard;
use crate::BoxError;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// Shared handle to a command stored in a transition table.
pub type CommandRef<H> = Arc<dyn TransitionCommand<H>>;

/// Which hook of a command was running.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HookPhase {
    Before,
    After,
}

impl fmt::Display for HookPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Before => f.write_str("before"),
            Self::After => f.write_str("after"),
        }
    }
}

/// Errors a transition hook can signal.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// The transition is not allowed for this target.
    #[error("illegal transition: {reason}")]
    IllegalTransition { reason: String },

    /// The command refuses the operation outright (reject cells).
    #[error("unsupported operation: {operation}")]
    Unsupported { operation: String },

    /// Backing storage or another resource the hook needed is gone.
    #[error("resource not found: {resource}")]
    ResourceNotFound { resource: String },

    /// Any other hook failure. Always propagated to the caller.
    #[error(transparent)]
    Failed(BoxError),
}

impl CommandError {
    pub fn illegal(reason: impl Into<String>) -> Self {
        Self::IllegalTransition {
            reason: reason.into(),
        }
    }

    pub fn unsupported(operation: impl Into<String>) -> Self {
        Self::Unsupported {
            operation: operation.into(),
        }
    }

    pub fn resource_not_found(resource: impl Into<String>) -> Self {
        Self::ResourceNotFound {
            resource: resource.into(),
        }
    }

    pub fn failed(source: impl Into<BoxError>) -> Self {
        Self::Failed(source.into())
    }
}

/// Pair of hooks run immediately before and after a state mutation.
///
/// Both hooks default to doing nothing, so a command only overrides the
/// side it cares about.
pub trait TransitionCommand<H: ?Sized>: Send + Sync {
    /// Runs before the state changes. An error here cancels the mutation
    /// and the after hook.
    fn execute_before(&self, _target: &mut H) -> Result<(), CommandError> {
        Ok(())
    }

    /// Runs after the state has changed.
    fn execute_after(&self, _target: &mut H) -> Result<(), CommandError> {
        Ok(())
    }
}

/// Command for transitions that need no side effect.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoCommand;

impl<H: ?Sized> TransitionCommand<H> for NoCommand {}

/// Command for transitions that must never happen.
#[derive(Clone, Debug)]
pub struct RejectCommand {
    message: Cow<'static, str>,
}

impl RejectCommand {
    pub fn new(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for RejectCommand {
    fn default() -> Self {
        Self::new("wrong transition")
    }
}

impl<H: ?Sized> TransitionCommand<H> for RejectCommand {
    fn execute_before(&self, _target: &mut H) -> Result<(), CommandError> {
        Err(CommandError::unsupported(self.message.as_ref()))
    }
}

type Hook<H> = Box<dyn Fn(&mut H) -> Result<(), CommandError> + Send + Sync>;

/// Command assembled from closures.
///
/// # Example
///
/// ```rust
/// use turnstile::core::{StateHolder, StateId};
/// use turnstile::transition::{FnCommand, TransitionCommand};
///
/// struct Form {
///     state: StateId,
///     dirty: bool,
/// }
///
/// impl StateHolder for Form {
///     fn state(&self) -> StateId {
///         self.state
///     }
///
///     fn set_state(&mut self, state: StateId) {
///         self.state = state;
///     }
/// }
///
/// let mark_dirty = FnCommand::new().before(|form: &mut Form| {
///     form.dirty = true;
///     Ok(())
/// });
///
/// let mut form = Form { state: 0, dirty: false };
/// mark_dirty.execute_before(&mut form).unwrap();
/// assert!(form.dirty);
/// ```
pub struct FnCommand<H: ?Sized> {
    before: Option<Hook<H>>,
    after: Option<Hook<H>>,
}

impl<H: ?Sized> FnCommand<H> {
    pub fn new() -> Self {
        Self {
            before: None,
            after: None,
        }
    }

    /// Set the before hook.
    pub fn before<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut H) -> Result<(), CommandError> + Send + Sync + 'static,
    {
        self.before = Some(Box::new(hook));
        self
    }

    /// Set the after hook.
    pub fn after<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut H) -> Result<(), CommandError> + Send + Sync + 'static,
    {
        self.after = Some(Box::new(hook));
        self
    }
}

impl<H: ?Sized> Default for FnCommand<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: ?Sized> TransitionCommand<H> for FnCommand<H> {
    fn execute_before(&self, target: &mut H) -> Result<(), CommandError> {
        self.before.as_ref().map_or(Ok(()), |hook| hook(target))
    }

    fn execute_after(&self, target: &mut H) -> Result<(), CommandError> {
        self.after.as_ref().map_or(Ok(()), |hook| hook(target))
    }
}

/// Runs `inner` only when `guard` accepts the target; otherwise the
/// transition is rejected as illegal before anything changes.
pub struct GuardedCommand<H: ?Sized> {
    guard: Guard<H>,
    inner: CommandRef<H>,
    reason: Cow<'static, str>,
}

impl<H: ?Sized> GuardedCommand<H> {
    pub fn new(guard: Guard<H>, inner: CommandRef<H>) -> Self {
        Self {
            guard,
            inner,
            reason: Cow::Borrowed("guard blocked transition"),
        }
    }

    /// Message reported when the guard blocks.
    pub fn with_reason(mut self, reason: impl Into<Cow<'static, str>>) -> Self {
        self.reason = reason.into();
        self
    }
}

impl<H: ?Sized> TransitionCommand<H> for GuardedCommand<H> {
    fn execute_before(&self, target: &mut H) -> Result<(), CommandError> {
        if !self.guard.check(target) {
            return Err(CommandError::illegal(self.reason.as_ref()));
        }
        self.inner.execute_before(target)
    }

    fn execute_after(&self, target: &mut H) -> Result<(), CommandError> {
        self.inner.execute_after(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter {
        before: usize,
        after: usize,
        allowed: bool,
    }

    fn counter() -> Counter {
        Counter {
            before: 0,
            after: 0,
            allowed: true,
        }
    }

    #[test]
    fn no_command_does_nothing() {
        let mut c = counter();
        assert!(NoCommand.execute_before(&mut c).is_ok());
        assert!(NoCommand.execute_after(&mut c).is_ok());
    }

    #[test]
    fn reject_command_fails_before_hook_only() {
        let mut c = counter();
        let reject = RejectCommand::default();

        let err = reject.execute_before(&mut c).unwrap_err();
        assert!(matches!(err, CommandError::Unsupported { ref operation } if operation == "wrong transition"));
        assert!(reject.execute_after(&mut c).is_ok());
    }

    #[test]
    fn fn_command_runs_configured_hooks() {
        let command = FnCommand::new()
            .before(|c: &mut Counter| {
                c.before += 1;
                Ok(())
            })
            .after(|c: &mut Counter| {
                c.after += 1;
                Ok(())
            });
        let mut c = counter();

        command.execute_before(&mut c).unwrap();
        command.execute_after(&mut c).unwrap();

        assert_eq!(c.before, 1);
        assert_eq!(c.after, 1);
    }

    #[test]
    fn fn_command_without_hooks_is_a_no_op() {
        let command = FnCommand::<Counter>::default();
        let mut c = counter();
        assert!(command.execute_before(&mut c).is_ok());
        assert!(command.execute_after(&mut c).is_ok());
    }

    #[test]
    fn guarded_command_blocks_when_guard_fails() {
        let inner: CommandRef<Counter> = Arc::new(FnCommand::new().before(|c: &mut Counter| {
            c.before += 1;
            Ok(())
        }));
        let command = GuardedCommand::new(Guard::new(|c: &Counter| c.allowed), inner)
            .with_reason("not allowed");

        let mut blocked = counter();
        blocked.allowed = false;
        let err = command.execute_before(&mut blocked).unwrap_err();
        assert!(matches!(err, CommandError::IllegalTransition { ref reason } if reason == "not allowed"));
        assert_eq!(blocked.before, 0);

        let mut open = counter();
        command.execute_before(&mut open).unwrap();
        assert_eq!(open.before, 1);
    }

    #[test]
    fn hook_phase_displays_lowercase() {
        assert_eq!(HookPhase::Before.to_string(), "before");
        assert_eq!(HookPhase::After.to_string(), "after");
    }
}
