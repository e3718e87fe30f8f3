//! Guard predicates over state holders.
//!
//! A guard is a pure boolean check evaluated against the target before a
//! guarded command runs its hooks. See `GuardedCommand`.

use std::sync::Arc;

/// Pure predicate deciding whether a holder may leave its current state.
///
/// # Example
///
/// ```rust
/// use turnstile::core::{Guard, StateHolder, StateId};
///
/// struct Order {
///     state: StateId,
///     paid: bool,
/// }
///
/// impl StateHolder for Order {
///     fn state(&self) -> StateId {
///         self.state
///     }
///
///     fn set_state(&mut self, state: StateId) {
///         self.state = state;
///     }
/// }
///
/// let is_paid = Guard::new(|order: &Order| order.paid);
///
/// assert!(is_paid.check(&Order { state: 0, paid: true }));
/// assert!(!is_paid.check(&Order { state: 0, paid: false }));
/// ```
pub struct Guard<H: ?Sized> {
    predicate: Arc<dyn Fn(&H) -> bool + Send + Sync>,
}

impl<H: ?Sized> Guard<H> {
    /// Create a guard from a pure predicate function.
    ///
    /// The predicate must be deterministic and thread-safe (Send + Sync).
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&H) -> bool + Send + Sync + 'static,
    {
        Self {
            predicate: Arc::new(predicate),
        }
    }

    /// Evaluate the guard against a holder.
    pub fn check(&self, target: &H) -> bool {
        (self.predicate)(target)
    }
}

impl<H: ?Sized> Clone for Guard<H> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<H: ?Sized> std::fmt::Debug for Guard<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Guard").finish_non_exhaustive()
    }
}
