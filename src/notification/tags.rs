//! Type tags identifying what happened and who raised it.
//!
//! Tags are plain values decided at compile time, usually fieldless enums.
//! The bus keys its registry on tags and never inspects the event or
//! publisher instances themselves.

use std::fmt::Debug;
use std::hash::Hash;

/// A registry key.
pub trait Tag: Copy + Eq + Hash + Debug + Send + Sync + 'static {}

impl<T> Tag for T where T: Copy + Eq + Hash + Debug + Send + Sync + 'static {}

/// Something that happened.
///
/// # Example
///
/// ```rust
/// use turnstile::notification::Event;
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
/// enum EventKind {
///     OrderCreated,
///     OrderCancelled,
/// }
///
/// struct OrderCreated {
///     order_id: u64,
/// }
///
/// impl Event for OrderCreated {
///     type Tag = EventKind;
///
///     fn event_tag(&self) -> EventKind {
///         EventKind::OrderCreated
///     }
/// }
///
/// assert_eq!(OrderCreated { order_id: 7 }.event_tag(), EventKind::OrderCreated);
/// ```
pub trait Event: Send + Sync {
    type Tag: Tag;

    fn event_tag(&self) -> Self::Tag;
}

/// The component an event came from.
pub trait Publisher: Send + Sync {
    type Tag: Tag;

    fn publisher_tag(&self) -> Self::Tag;
}
