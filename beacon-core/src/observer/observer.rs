//! Observer Implementation
//!
//! An Observer owns a subscriber and remembers every observable it has
//! registered with. Dropping the observer unregisters it from all of them,
//! so no observable keeps a slot pointing at a subscriber that is gone.
//!
//! Dropping an observer stops future notifications only. A `notify` already
//! in flight on another thread may still call the subscriber, which stays
//! alive for that call through the notifying thread's reference.
//!
//! The tracked set holds weak references. If an observable is dropped
//! first, its entry simply stops resolving and is pruned the next time the
//! set is touched.

use std::collections::HashMap;
use std::fmt::Debug;
use std::ops::Deref;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tracing::debug;

use super::observable::{Publisher, Registry};
use super::subscriber::{ObservableId, Subscriber, SubscriberId};

/// A subscriber together with its registrations.
///
/// `Observer` dereferences to the subscriber it wraps.
///
/// # Example
///
/// ```rust
/// use std::sync::atomic::{AtomicI64, Ordering};
/// use beacon_core::observer::{Observable, Observer, Subscriber};
///
/// struct Sum(AtomicI64);
///
/// impl Subscriber<i64> for Sum {
///     fn on_notify(&self, value: &i64) {
///         self.0.fetch_add(*value, Ordering::SeqCst);
///     }
/// }
///
/// let prices = Observable::new();
/// {
///     let sum = Observer::new(Sum(AtomicI64::new(0)));
///     sum.register_with(&prices);
///     prices.notify(7);
///     assert_eq!(sum.0.load(Ordering::SeqCst), 7);
/// }
///
/// // The observer unregistered itself when it went out of scope
/// assert_eq!(prices.subscriber_count(), 0);
/// ```
pub struct Observer<S> {
    id: SubscriberId,
    subscriber: Arc<S>,
    /// Observables this observer is registered with.
    observables: Mutex<HashMap<ObservableId, Weak<dyn Registry>>>,
}

impl<S> Observer<S> {
    /// Wrap a subscriber.
    pub fn new(subscriber: S) -> Self {
        Self::from_arc(Arc::new(subscriber))
    }

    /// Wrap a subscriber that is already shared.
    ///
    /// Other clones of the `Arc` keep the subscriber alive, but only this
    /// observer's registrations deliver notifications to it.
    pub fn from_arc(subscriber: Arc<S>) -> Self {
        Self {
            id: SubscriberId::new(),
            subscriber,
            observables: Mutex::new(HashMap::new()),
        }
    }

    /// Get the observer's subscriber ID.
    pub fn id(&self) -> SubscriberId {
        self.id
    }

    /// Get the wrapped subscriber.
    pub fn subscriber(&self) -> &Arc<S> {
        &self.subscriber
    }

    /// Start receiving notifications from `publisher`.
    ///
    /// Registering twice with the same publisher has no further effect.
    pub fn register_with<P>(&self, publisher: &P)
    where
        P: Publisher + ?Sized,
        P::Args: 'static,
        S: Subscriber<P::Args> + 'static,
    {
        let observable = publisher.observable();
        let subject = observable.subject();

        let mut tracked = self.observables.lock();
        tracked.retain(|_, registry| registry.strong_count() > 0);

        let subscriber: Arc<dyn Subscriber<P::Args>> = self.subscriber.clone();
        subject.register(self.id, Arc::downgrade(&subscriber));

        let registry: Arc<dyn Registry> = subject.clone();
        tracked.insert(observable.id(), Arc::downgrade(&registry));
    }

    /// Stop receiving notifications from `publisher`.
    ///
    /// Does nothing if the observer is not registered with it. A `notify`
    /// already running on another thread may still reach the subscriber
    /// after this returns.
    pub fn unregister_with<P>(&self, publisher: &P)
    where
        P: Publisher + ?Sized,
        P::Args: 'static,
    {
        let observable = publisher.observable();

        let mut tracked = self.observables.lock();
        observable.subject().unregister(self.id);
        tracked.remove(&observable.id());
    }

    /// Whether this observer is registered with `publisher`.
    pub fn is_registered_with<P>(&self, publisher: &P) -> bool
    where
        P: Publisher + ?Sized,
    {
        let id = publisher.observable().id();
        self.observables.lock().contains_key(&id)
    }

    /// Number of live observables this observer is registered with.
    pub fn observable_count(&self) -> usize {
        let mut tracked = self.observables.lock();
        tracked.retain(|_, registry| registry.strong_count() > 0);
        tracked.len()
    }
}

impl<S> Deref for Observer<S> {
    type Target = S;

    fn deref(&self) -> &S {
        &self.subscriber
    }
}

impl<S> Drop for Observer<S> {
    fn drop(&mut self) {
        let tracked = std::mem::take(self.observables.get_mut());
        let mut detached = 0usize;

        for registry in tracked.values().filter_map(Weak::upgrade) {
            registry.unregister(self.id);
            detached += 1;
        }

        if !tracked.is_empty() {
            debug!(
                subscriber = ?self.id,
                detached,
                expired = tracked.len() - detached,
                "observer dropped"
            );
        }
    }
}

impl<S> Debug for Observer<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observer")
            .field("id", &self.id)
            .field("observable_count", &self.observables.lock().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::Observable;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Hits(AtomicUsize);

    impl Subscriber<()> for Hits {
        fn on_notify(&self, _: &()) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    impl Subscriber<String> for Hits {
        fn on_notify(&self, _: &String) {
            self.0.fetch_add(100, Ordering::SeqCst);
        }
    }

    fn hits(observer: &Observer<Hits>) -> usize {
        observer.0.load(Ordering::SeqCst)
    }

    #[test]
    fn register_with_twice_notifies_once() {
        let observable = Observable::<()>::new();
        let observer = Observer::new(Hits::default());

        observer.register_with(&observable);
        observer.register_with(&observable);

        assert_eq!(observable.subscriber_count(), 1);
        assert_eq!(observable.notify(()), 1);
        assert_eq!(hits(&observer), 1);
    }

    #[test]
    fn unregister_with_stops_notifications() {
        let observable = Observable::<()>::new();
        let observer = Observer::new(Hits::default());

        observer.register_with(&observable);
        assert!(observer.is_registered_with(&observable));

        observer.unregister_with(&observable);
        assert!(!observer.is_registered_with(&observable));

        observable.notify(());
        assert_eq!(hits(&observer), 0);
    }

    #[test]
    fn unregister_during_notify_applies_to_next_notify() {
        struct Unhook {
            target: Arc<Observable<()>>,
            other: Arc<Observer<Hits>>,
        }

        impl Subscriber<()> for Unhook {
            fn on_notify(&self, _: &()) {
                self.other.unregister_with(&*self.target);
            }
        }

        let observable = Arc::new(Observable::<()>::new());
        let other = Arc::new(Observer::new(Hits::default()));
        let unhook = Observer::new(Unhook {
            target: observable.clone(),
            other: other.clone(),
        });
        unhook.register_with(&*observable);
        other.register_with(&*observable);

        // The in-flight notification may still reach the other observer
        observable.notify(());
        let after_first = hits(&other);
        assert!(after_first <= 1);
        assert!(!other.is_registered_with(&*observable));

        observable.notify(());
        assert_eq!(hits(&other), after_first);
    }

    #[test]
    fn unregister_without_register_is_noop() {
        let observable = Observable::<()>::new();
        let observer = Observer::new(Hits::default());

        observer.unregister_with(&observable);
        assert_eq!(observer.observable_count(), 0);
        assert_eq!(observable.subscriber_count(), 0);
    }

    #[test]
    fn drop_unregisters_from_every_observable() {
        let first = Observable::<()>::new();
        let second = Observable::<()>::new();
        let observer = Observer::new(Hits::default());

        observer.register_with(&first);
        observer.register_with(&second);
        let id = observer.id();

        drop(observer);

        assert!(!first.is_registered(id));
        assert!(!second.is_registered(id));
        assert_eq!(first.notify(()), 0);
        assert_eq!(second.notify(()), 0);
    }

    #[test]
    fn dropped_observable_is_pruned_from_tracked_set() {
        let kept = Observable::<()>::new();
        let observer = Observer::new(Hits::default());

        {
            let short_lived = Observable::<()>::new();
            observer.register_with(&short_lived);
            observer.register_with(&kept);
            assert_eq!(observer.observable_count(), 2);
        }

        assert_eq!(observer.observable_count(), 1);
        assert_eq!(kept.notify(()), 1);
    }

    #[test]
    fn one_subscriber_many_argument_types() {
        let ticks = Observable::<()>::new();
        let names = Observable::<String>::new();
        let observer = Observer::new(Hits::default());

        observer.register_with(&ticks);
        observer.register_with(&names);

        ticks.notify(());
        names.notify("x".to_string());
        assert_eq!(hits(&observer), 101);

        drop(observer);
        assert_eq!(ticks.subscriber_count(), 0);
        assert_eq!(names.subscriber_count(), 0);
    }

    #[test]
    fn shared_subscriber_outlives_observer_without_notifications() {
        let observable = Observable::<()>::new();
        let shared = Arc::new(Hits::default());

        let observer = Observer::from_arc(shared.clone());
        observer.register_with(&observable);
        observable.notify(());
        drop(observer);

        observable.notify(());
        assert_eq!(shared.0.load(Ordering::SeqCst), 1);
    }
}
