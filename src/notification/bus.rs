//! Registry routing events to subscribers by (event tag, publisher tag).

use crate::notification::error::PublishError;
use crate::notification::subscriber::{Subscriber, SubscriberList, SubscriberRef};
use crate::notification::tags::{Event, Publisher};
use dashmap::DashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// Publish/subscribe registry keyed on event and publisher tags.
///
/// All operations take `&self` and are safe to call from many threads at
/// once. A publish delivers to a snapshot of the subscriber list taken when
/// it starts, so subscribers may subscribe or unsubscribe (even from inside
/// `update`) while delivery is in progress.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use turnstile::notification::{Event, NotificationBus, Publisher};
/// use turnstile::BoxError;
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
/// enum EventKind { OrderCreated }
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
/// enum Service { Orders, Inventory }
///
/// struct OrderCreated;
/// impl Event for OrderCreated {
///     type Tag = EventKind;
///     fn event_tag(&self) -> EventKind { EventKind::OrderCreated }
/// }
///
/// struct ServiceHandle(Service);
/// impl Publisher for ServiceHandle {
///     type Tag = Service;
///     fn publisher_tag(&self) -> Service { self.0 }
/// }
///
/// let bus: NotificationBus<OrderCreated, ServiceHandle> = NotificationBus::new();
/// let seen = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&seen);
/// bus.subscribe_fn(
///     EventKind::OrderCreated,
///     Service::Orders,
///     move |_: &OrderCreated, _: &ServiceHandle| -> Result<(), BoxError> {
///         counter.fetch_add(1, Ordering::SeqCst);
///         Ok(())
///     },
/// );
///
/// assert_eq!(bus.publish(&OrderCreated, &ServiceHandle(Service::Orders)).unwrap(), 1);
/// assert_eq!(bus.publish(&OrderCreated, &ServiceHandle(Service::Inventory)).unwrap(), 0);
/// assert_eq!(seen.load(Ordering::SeqCst), 1);
/// ```
pub struct NotificationBus<E, P>
where
    E: Event + ?Sized,
    P: Publisher + ?Sized,
{
    registry: DashMap<E::Tag, DashMap<P::Tag, SubscriberList<E, P>>>,
}

impl<E, P> NotificationBus<E, P>
where
    E: Event + ?Sized,
    P: Publisher + ?Sized,
{
    pub fn new() -> Self {
        Self {
            registry: DashMap::new(),
        }
    }

    /// Register `subscriber` for events tagged `event_tag` raised by
    /// publishers tagged `publisher_tag`.
    ///
    /// Registering the same subscriber twice makes it receive each event
    /// twice.
    pub fn subscribe(
        &self,
        event_tag: E::Tag,
        publisher_tag: P::Tag,
        subscriber: SubscriberRef<E, P>,
    ) {
        let publishers = self.registry.entry(event_tag).or_default().downgrade();
        publishers
            .entry(publisher_tag)
            .or_default()
            .downgrade()
            .push(subscriber);
        debug!(event = ?event_tag, publisher = ?publisher_tag, "subscribed");
    }

    /// Register a closure and return the handle needed to unsubscribe it.
    pub fn subscribe_fn<F>(
        &self,
        event_tag: E::Tag,
        publisher_tag: P::Tag,
        subscriber: F,
    ) -> SubscriberRef<E, P>
    where
        F: Subscriber<E, P> + 'static,
    {
        let handle: SubscriberRef<E, P> = Arc::new(subscriber);
        self.subscribe(event_tag, publisher_tag, Arc::clone(&handle));
        handle
    }

    /// Remove one registration of `subscriber` for the pair. Returns whether
    /// anything was removed; unknown pairs are ignored.
    pub fn unsubscribe(
        &self,
        event_tag: E::Tag,
        publisher_tag: P::Tag,
        subscriber: &SubscriberRef<E, P>,
    ) -> bool {
        let removed = self
            .registry
            .get(&event_tag)
            .and_then(|publishers| {
                publishers
                    .get(&publisher_tag)
                    .map(|list| list.remove(subscriber))
            })
            .unwrap_or(false);

        if removed {
            debug!(event = ?event_tag, publisher = ?publisher_tag, "unsubscribed");
        }
        removed
    }

    /// Deliver `event` to every subscriber registered for its tag and the
    /// publisher's tag, in registration order.
    ///
    /// Returns how many subscribers were called. A pair nobody subscribed
    /// to, including a wholly unknown event tag, delivers to nobody and
    /// returns `Ok(0)`. The first subscriber error stops delivery.
    pub fn publish(&self, event: &E, publisher: &P) -> Result<usize, PublishError> {
        let event_tag = event.event_tag();
        let publisher_tag = publisher.publisher_tag();

        let Some(subscribers) = self.snapshot(event_tag, publisher_tag) else {
            trace!(event = ?event_tag, publisher = ?publisher_tag, "no subscribers");
            return Ok(0);
        };

        for (position, subscriber) in subscribers.iter().enumerate() {
            subscriber
                .update(event, publisher)
                .map_err(|source| PublishError::SubscriberFailed { position, source })?;
        }

        debug!(
            event = ?event_tag,
            publisher = ?publisher_tag,
            delivered = subscribers.len(),
            "published"
        );
        Ok(subscribers.len())
    }

    /// Drop every subscription.
    pub fn clear(&self) {
        self.registry.clear();
        debug!("notification registry cleared");
    }

    /// Number of registrations for the pair.
    pub fn subscriber_count(&self, event_tag: E::Tag, publisher_tag: P::Tag) -> usize {
        self.registry
            .get(&event_tag)
            .and_then(|publishers| publishers.get(&publisher_tag).map(|list| list.len()))
            .unwrap_or(0)
    }

    /// True when no pair has any subscriber.
    pub fn is_empty(&self) -> bool {
        self.registry
            .iter()
            .all(|publishers| publishers.iter().all(|list| list.len() == 0))
    }

    /// Clone the list for the pair so no map lock is held while delivering.
    fn snapshot(
        &self,
        event_tag: E::Tag,
        publisher_tag: P::Tag,
    ) -> Option<Arc<Vec<SubscriberRef<E, P>>>> {
        self.registry
            .get(&event_tag)
            .and_then(|publishers| publishers.get(&publisher_tag).map(|list| list.snapshot()))
    }
}

impl<E, P> Default for NotificationBus<E, P>
where
    E: Event + ?Sized,
    P: Publisher + ?Sized,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E, P> fmt::Debug for NotificationBus<E, P>
where
    E: Event + ?Sized,
    P: Publisher + ?Sized,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationBus")
            .field("event_tags", &self.registry.len())
            .finish_non_exhaustive()
    }
}
