//! Subscribers and the copy-on-write list that holds them.

use crate::BoxError;
use parking_lot::RwLock;
use std::sync::Arc;

/// Receives events raised by publishers it subscribed to.
pub trait Subscriber<E: ?Sized, P: ?Sized>: Send + Sync {
    /// Called once per matching publish. An error stops delivery to the
    /// remaining subscribers and is returned to the publisher.
    fn update(&self, event: &E, publisher: &P) -> Result<(), BoxError>;
}

impl<E, P, F> Subscriber<E, P> for F
where
    E: ?Sized,
    P: ?Sized,
    F: Fn(&E, &P) -> Result<(), BoxError> + Send + Sync,
{
    fn update(&self, event: &E, publisher: &P) -> Result<(), BoxError> {
        self(event, publisher)
    }
}

/// Shared handle to a subscriber. Unsubscribing matches on the pointer,
/// so keep the handle returned by (or given to) `subscribe`.
pub type SubscriberRef<E, P> = Arc<dyn Subscriber<E, P>>;

/// True when both handles point at the same subscriber instance.
pub(crate) fn same_subscriber<E: ?Sized, P: ?Sized>(
    a: &SubscriberRef<E, P>,
    b: &SubscriberRef<E, P>,
) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

/// Ordered subscriber list with copy-on-write mutation.
///
/// Readers take a snapshot (`Arc` clone) and iterate it without holding the
/// lock. Writers copy the vector only while a snapshot is still alive.
pub(crate) struct SubscriberList<E: ?Sized, P: ?Sized> {
    entries: RwLock<Arc<Vec<SubscriberRef<E, P>>>>,
}

impl<E: ?Sized, P: ?Sized> SubscriberList<E, P> {
    pub(crate) fn push(&self, subscriber: SubscriberRef<E, P>) {
        let mut entries = self.entries.write();
        Arc::make_mut(&mut entries).push(subscriber);
    }

    /// Remove the first entry that is `subscriber`.
    pub(crate) fn remove(&self, subscriber: &SubscriberRef<E, P>) -> bool {
        let mut entries = self.entries.write();
        let Some(position) = entries.iter().position(|s| same_subscriber(s, subscriber)) else {
            return false;
        };
        Arc::make_mut(&mut entries).remove(position);
        true
    }

    pub(crate) fn snapshot(&self) -> Arc<Vec<SubscriberRef<E, P>>> {
        Arc::clone(&self.entries.read())
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.read().len()
    }
}

impl<E: ?Sized, P: ?Sized> Default for SubscriberList<E, P> {
    fn default() -> Self {
        Self {
            entries: RwLock::new(Arc::new(Vec::new())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    type Handle = SubscriberRef<str, str>;

    fn counting(counter: &Arc<AtomicUsize>) -> Handle {
        let counter = Arc::clone(counter);
        Arc::new(move |_: &str, _: &str| -> Result<(), BoxError> {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
    }

    #[test]
    fn push_preserves_order_and_duplicates() {
        let list = SubscriberList::<str, str>::default();
        let hits = Arc::new(AtomicUsize::new(0));
        let a = counting(&hits);
        let b = counting(&hits);

        list.push(Arc::clone(&a));
        list.push(Arc::clone(&b));
        list.push(Arc::clone(&a));

        let snapshot = list.snapshot();
        assert_eq!(snapshot.len(), 3);
        assert!(same_subscriber(&snapshot[0], &a));
        assert!(same_subscriber(&snapshot[1], &b));
        assert!(same_subscriber(&snapshot[2], &a));
    }

    #[test]
    fn remove_takes_first_exact_match_only() {
        let list = SubscriberList::<str, str>::default();
        let hits = Arc::new(AtomicUsize::new(0));
        let a = counting(&hits);
        let b = counting(&hits);
        list.push(Arc::clone(&a));
        list.push(Arc::clone(&b));
        list.push(Arc::clone(&a));

        assert!(list.remove(&a));
        let snapshot = list.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert!(same_subscriber(&snapshot[0], &b));
        assert!(same_subscriber(&snapshot[1], &a));

        let stranger = counting(&hits);
        assert!(!list.remove(&stranger));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn snapshot_is_unaffected_by_later_mutation() {
        let list = SubscriberList::<str, str>::default();
        let hits = Arc::new(AtomicUsize::new(0));
        let a = counting(&hits);
        list.push(Arc::clone(&a));

        let before = list.snapshot();
        list.push(counting(&hits));
        list.remove(&a);

        assert_eq!(before.len(), 1);
        assert!(same_subscriber(&before[0], &a));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn closures_are_subscribers() {
        let hits = Arc::new(AtomicUsize::new(0));
        let subscriber = counting(&hits);

        subscriber.update("created", "orders").unwrap();
        subscriber.update("created", "orders").unwrap();

        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }
}
