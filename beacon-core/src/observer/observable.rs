//! Observable Implementation
//!
//! An Observable pairs a [`Signal`] with a registry of subscriber
//! connections. The registry is what gives observers identity: a subscriber
//! registers at most once, and unregistering drops the only strong handle
//! to its slot.
//!
//! # Lock Order
//!
//! `register` and `unregister` hold the registry lock while they call into
//! the signal, so the registry lock is always taken before the signal lock.
//! Observers take their own tracked-set lock before either. Nothing in the
//! crate acquires these locks in the opposite order.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tracing::{debug, trace};

use super::subscriber::{ObservableId, Subscriber, SubscriberId};
use crate::signal::{Connection, Signal};

/// Anything that publishes notifications through an [`Observable`].
///
/// Observers register with a `Publisher` rather than with a concrete type,
/// so wrappers such as [`ObservableValue`](crate::value::ObservableValue)
/// can be observed directly.
pub trait Publisher {
    /// The argument type delivered to subscribers.
    type Args;

    /// The observable notifications flow through.
    fn observable(&self) -> &Observable<Self::Args>;
}

/// The part of an observable an observer needs to detach itself.
///
/// Erased over the argument type so an observer can track observables of
/// different argument types in one set.
pub(crate) trait Registry: Send + Sync {
    fn unregister(&self, subscriber: SubscriberId);
}

/// Shared state of an observable.
///
/// Observers reach it through weak references only, so dropping the
/// [`Observable`] tears it down.
pub(crate) struct Subject<A> {
    id: ObservableId,
    signal: Signal<A>,
    connections: Mutex<HashMap<SubscriberId, Connection<A>>>,
}

impl<A: 'static> Subject<A> {
    /// Connect a subscriber unless it is already registered.
    ///
    /// Returns `true` if a new connection was made.
    pub(crate) fn register(&self, id: SubscriberId, subscriber: Weak<dyn Subscriber<A>>) -> bool {
        let mut connections = self.connections.lock();
        if connections.contains_key(&id) {
            trace!(observable = ?self.id, subscriber = ?id, "already registered");
            return false;
        }

        let connection = self.signal.connect_reporting(move |args: &A| {
            match subscriber.upgrade() {
                Some(subscriber) => {
                    subscriber.on_notify(args);
                    true
                }
                None => false,
            }
        });
        connections.insert(id, connection);

        debug!(observable = ?self.id, subscriber = ?id, "subscriber registered");
        true
    }
}

impl<A: 'static> Registry for Subject<A> {
    fn unregister(&self, subscriber: SubscriberId) {
        let mut connections = self.connections.lock();
        match connections.remove(&subscriber) {
            Some(connection) => {
                self.signal.disconnect(&connection);
                debug!(observable = ?self.id, subscriber = ?subscriber, "subscriber unregistered");
            }
            None => {
                trace!(observable = ?self.id, subscriber = ?subscriber, "not registered");
            }
        }
    }
}

/// A subject that observers can register with.
///
/// # Example
///
/// ```rust
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use beacon_core::observer::{Observable, Observer, Subscriber};
///
/// struct Counter(AtomicUsize);
///
/// impl Subscriber<&'static str> for Counter {
///     fn on_notify(&self, _event: &&'static str) {
///         self.0.fetch_add(1, Ordering::SeqCst);
///     }
/// }
///
/// let events = Observable::new();
/// let counter = Observer::new(Counter(AtomicUsize::new(0)));
///
/// counter.register_with(&events);
/// events.notify("saved");
///
/// assert_eq!(counter.0.load(Ordering::SeqCst), 1);
/// ```
pub struct Observable<A> {
    subject: Arc<Subject<A>>,
}

impl<A> Observable<A> {
    /// Create an observable with no subscribers.
    pub fn new() -> Self {
        Self {
            subject: Arc::new(Subject {
                id: ObservableId::new(),
                signal: Signal::new(),
                connections: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Get the observable's unique ID.
    pub fn id(&self) -> ObservableId {
        self.subject.id
    }

    /// Notify every registered subscriber.
    ///
    /// Returns the number of subscribers whose `on_notify` ran. A subscriber
    /// dropped while the notification is in flight is not counted, and a
    /// registration racing this call may or may not be included.
    pub fn notify(&self, args: A) -> usize {
        self.subject.signal.emit(args)
    }

    /// Number of registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subject.connections.lock().len()
    }

    /// Whether the given subscriber is registered.
    pub fn is_registered(&self, subscriber: SubscriberId) -> bool {
        self.subject.connections.lock().contains_key(&subscriber)
    }

    pub(crate) fn subject(&self) -> &Arc<Subject<A>> {
        &self.subject
    }
}

impl<A> Default for Observable<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Publisher for Observable<A> {
    type Args = A;

    fn observable(&self) -> &Observable<A> {
        self
    }
}

impl<A> Drop for Observable<A> {
    fn drop(&mut self) {
        let remaining = self.subject.connections.lock().len();
        if remaining > 0 {
            debug!(observable = ?self.subject.id, remaining, "observable dropped with registered subscribers");
        }
    }
}

impl<A> Debug for Observable<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observable")
            .field("id", &self.subject.id)
            .field("subscriber_count", &self.subscriber_count())
            .finish()
    }
}
